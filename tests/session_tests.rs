// Integration tests for the meeting session
//
// The session is driven directly through its event-handler methods, the
// same path the bus event loop uses. Collaborators are replaced with
// in-memory doubles.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use meeting_assistant::{
    AgentEvent, MeetingSession, Phase, QuestionPolicy, Responder, SessionConfig,
    SessionEventHandler, SideChannel,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::{sleep, timeout};

/// Responder double that records prompts and signals each completion
#[derive(Default)]
struct RecordingResponder {
    prompts: Mutex<Vec<String>>,
    done: Notify,
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn generate(&self, prompt: &str) -> Result<()> {
        self.prompts.lock().await.push(prompt.to_string());
        self.done.notify_one();
        Ok(())
    }
}

/// Responder double that blocks until released, for in-flight tests
#[derive(Default)]
struct BlockingResponder {
    prompts: Mutex<Vec<String>>,
    started: Notify,
    release: Notify,
}

#[async_trait]
impl Responder for BlockingResponder {
    async fn generate(&self, prompt: &str) -> Result<()> {
        self.prompts.lock().await.push(prompt.to_string());
        self.started.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

/// Side-channel double counting open() calls
#[derive(Default)]
struct CountingSideChannel {
    opens: AtomicUsize,
}

#[async_trait]
impl SideChannel for CountingSideChannel {
    async fn open(&self) -> Result<()> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn test_config(policy: QuestionPolicy) -> SessionConfig {
    SessionConfig {
        call_id: "test-call".to_string(),
        question_policy: policy,
        ..SessionConfig::default()
    }
}

fn transcription(speaker: &str, text: &str) -> AgentEvent {
    AgentEvent::Transcription {
        text: text.to_string(),
        participant_id: Some(speaker.to_string()),
        timestamp: Some(Utc::now()),
    }
}

#[tokio::test]
async fn test_lifecycle_runs_once_through() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        responder,
        side_channel,
    );

    assert_eq!(session.phase().await, Phase::Idle);
    assert!(!session.is_active().await);

    session.handle_event(AgentEvent::SessionStarted).await;
    assert!(session.is_active().await);

    session.handle_event(AgentEvent::SessionEnded).await;
    assert!(!session.is_active().await);
    assert_eq!(session.phase().await, Phase::Ended);
}

#[tokio::test]
async fn test_duplicate_start_is_idempotent() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        responder,
        Arc::clone(&side_channel) as Arc<dyn SideChannel>,
    );

    session.handle_event(AgentEvent::SessionStarted).await;
    session.handle_event(AgentEvent::SessionStarted).await;

    assert!(session.is_active().await);
    // Setup side effects must not repeat.
    assert_eq!(side_channel.opens.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_end_before_start_is_ignored() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        responder,
        side_channel,
    );

    session.handle_event(AgentEvent::SessionEnded).await;

    assert_eq!(session.phase().await, Phase::Idle);
    assert!(!session.is_active().await);
}

#[tokio::test]
async fn test_transcription_outside_active_phase_is_still_recorded() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        responder,
        side_channel,
    );

    // Arrives before the start signal, best-effort recording applies.
    session
        .handle_event(transcription("alice", "early utterance"))
        .await;

    assert_eq!(session.phase().await, Phase::Idle);
    assert_eq!(session.transcript().await.len(), 1);
}

#[tokio::test]
async fn test_empty_transcription_is_discarded() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        responder,
        side_channel,
    );

    session.handle_event(AgentEvent::SessionStarted).await;
    session.handle_event(transcription("alice", "   ")).await;
    session
        .handle_event(AgentEvent::Transcription {
            text: String::new(),
            participant_id: None,
            timestamp: None,
        })
        .await;

    assert!(session.transcript().await.is_empty());
}

#[tokio::test]
async fn test_missing_participant_id_becomes_unknown() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        responder,
        side_channel,
    );

    session
        .handle_event(AgentEvent::Transcription {
            text: "who said that".to_string(),
            participant_id: None,
            timestamp: None,
        })
        .await;

    let transcript = session.transcript().await;
    assert_eq!(transcript[0].speaker, "Unknown");
}

#[tokio::test]
async fn test_wake_phrase_question_reaches_responder() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        Arc::clone(&responder) as Arc<dyn Responder>,
        side_channel,
    );

    session.handle_event(AgentEvent::SessionStarted).await;
    session
        .handle_event(transcription("alice", "Let's discuss budget"))
        .await;
    session
        .handle_event(transcription(
            "bob",
            "Hey Assistant, what are the action items?",
        ))
        .await;

    // Both utterances are stored, including the trigger itself.
    assert_eq!(session.transcript().await.len(), 2);

    timeout(Duration::from_secs(1), responder.done.notified())
        .await
        .expect("responder was never invoked");

    let prompts = responder.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("[alice]: Let's discuss budget"));
    assert!(prompt.contains("[bob]: Hey Assistant, what are the action items?"));
    assert!(prompt.contains("USER QUESTION: what are the action items?"));

    assert_eq!(session.stats().await.questions_asked, 1);
}

#[tokio::test]
async fn test_wake_phrase_alone_produces_no_response() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        Arc::clone(&responder) as Arc<dyn Responder>,
        side_channel,
    );

    session.handle_event(AgentEvent::SessionStarted).await;
    session
        .handle_event(transcription("alice", "Hey Assistant"))
        .await;

    // The utterance is still recorded, but no prompt is dispatched.
    sleep(Duration::from_millis(50)).await;
    assert_eq!(session.transcript().await.len(), 1);
    assert!(responder.prompts.lock().await.is_empty());
    assert_eq!(session.stats().await.questions_asked, 0);
}

#[tokio::test]
async fn test_drop_policy_ignores_overlapping_question() {
    let responder = Arc::new(BlockingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Drop),
        Arc::clone(&responder) as Arc<dyn Responder>,
        side_channel,
    );

    session.handle_event(AgentEvent::SessionStarted).await;
    session
        .handle_event(transcription("alice", "hey assistant first question"))
        .await;

    timeout(Duration::from_secs(1), responder.started.notified())
        .await
        .expect("first response never started");

    // A second trigger while the first is in flight is dropped.
    session
        .handle_event(transcription("bob", "hey assistant second question"))
        .await;

    responder.release.notify_one();
    sleep(Duration::from_millis(50)).await;

    let prompts = responder.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("USER QUESTION: first question"));
    assert_eq!(session.stats().await.questions_asked, 1);
}

#[tokio::test]
async fn test_queue_policy_answers_questions_serially() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Queue),
        Arc::clone(&responder) as Arc<dyn Responder>,
        side_channel,
    );

    session.handle_event(AgentEvent::SessionStarted).await;
    session
        .handle_event(transcription("alice", "hey assistant first question"))
        .await;
    session
        .handle_event(transcription("bob", "hey assistant second question"))
        .await;

    // Both questions drain through the queue worker, in order.
    for _ in 0..50 {
        if responder.prompts.lock().await.len() == 2 {
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }

    let prompts = responder.prompts.lock().await;
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("USER QUESTION: first question"));
    assert!(prompts[1].contains("USER QUESTION: second question"));
}

#[tokio::test]
async fn test_roster_excludes_the_assistant() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let config = test_config(QuestionPolicy::Concurrent);
    let bot_id = config.bot_id.clone();
    let session = MeetingSession::new(config, responder, side_channel);

    session
        .handle_event(AgentEvent::ParticipantJoined {
            participant_id: bot_id,
            participant_name: "Meeting Assistant".to_string(),
        })
        .await;
    session
        .handle_event(AgentEvent::ParticipantJoined {
            participant_id: "user-1".to_string(),
            participant_name: "Alice".to_string(),
        })
        .await;

    assert_eq!(session.stats().await.participants, 1);

    session
        .handle_event(AgentEvent::ParticipantLeft {
            participant_id: "user-1".to_string(),
            participant_name: "Alice".to_string(),
        })
        .await;

    assert_eq!(session.stats().await.participants, 0);
}

#[tokio::test]
async fn test_observability_events_do_not_disturb_state() {
    let responder = Arc::new(RecordingResponder::default());
    let side_channel = Arc::new(CountingSideChannel::default());
    let session = MeetingSession::new(
        test_config(QuestionPolicy::Concurrent),
        responder,
        side_channel,
    );

    session.handle_event(AgentEvent::SessionStarted).await;
    session
        .handle_event(AgentEvent::ResponseChunk {
            delta: "partial answer".to_string(),
        })
        .await;
    session
        .handle_event(AgentEvent::PluginError {
            message: "transcriber hiccup".to_string(),
            is_fatal: false,
        })
        .await;
    session
        .handle_event(AgentEvent::PluginError {
            message: "transcriber gone".to_string(),
            is_fatal: true,
        })
        .await;

    // Errors are logged, never escalated to a state change.
    assert!(session.is_active().await);
    assert!(session.transcript().await.is_empty());
}
