use super::config::{QuestionPolicy, SessionConfig};
use super::handler::SessionEventHandler;
use super::stats::SessionStats;
use crate::prompt::PromptAssembler;
use crate::responder::{Responder, SideChannel};
use crate::transcript::{TranscriptEntry, TranscriptStore};
use crate::wake::{Detection, WakeWordDetector};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

/// Lifecycle phase of a call session. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Ended,
}

/// A meeting session that accumulates the transcript, watches for the
/// wake phrase, and delegates question answering to the responder.
///
/// All state lives on the session instance; there is no process-wide
/// singleton. Handlers run on the single event-loop task, so mutations
/// are serialized; response generation is spawned and never blocks
/// ingestion.
pub struct MeetingSession {
    /// Session configuration
    config: SessionConfig,

    /// Delegated answer generation
    responder: Arc<dyn Responder>,

    /// Messaging side channel, opened once when the call starts
    side_channel: Arc<dyn SideChannel>,

    /// Wake-phrase matcher
    detector: WakeWordDetector,

    /// Prompt construction
    assembler: PromptAssembler,

    /// Append-only transcript log
    transcript: TranscriptStore,

    /// Lifecycle phase, Idle until the start signal
    phase: Arc<Mutex<Phase>>,

    /// When the session was created
    started_at: DateTime<Utc>,

    /// Participants currently in the call (id -> name), assistant excluded
    roster: Arc<Mutex<HashMap<String, String>>>,

    /// Questions dispatched to the responder
    questions_asked: Arc<AtomicUsize>,

    /// Responses currently being generated (used by the Drop policy)
    in_flight: Arc<AtomicUsize>,

    /// Question queue, present only under the Queue policy
    queue_tx: Option<mpsc::Sender<String>>,
}

impl MeetingSession {
    /// Create a new meeting session.
    ///
    /// Under the `Queue` policy this spawns the worker task that drains
    /// queued questions, so it must be called inside a runtime.
    pub fn new(
        config: SessionConfig,
        responder: Arc<dyn Responder>,
        side_channel: Arc<dyn SideChannel>,
    ) -> Self {
        info!("Creating meeting session: {}", config.call_id);

        let queue_tx = match config.question_policy {
            QuestionPolicy::Queue => {
                let (tx, mut rx) = mpsc::channel::<String>(16);
                let worker_responder = Arc::clone(&responder);

                tokio::spawn(async move {
                    while let Some(prompt) = rx.recv().await {
                        if let Err(e) = worker_responder.generate(&prompt).await {
                            error!("Response generation failed: {}", e);
                        }
                    }
                });

                Some(tx)
            }
            _ => None,
        };

        Self {
            detector: WakeWordDetector::new(config.wake_phrase.clone()),
            assembler: PromptAssembler::new(),
            config,
            responder,
            side_channel,
            transcript: TranscriptStore::new(),
            phase: Arc::new(Mutex::new(Phase::Idle)),
            started_at: Utc::now(),
            roster: Arc::new(Mutex::new(HashMap::new())),
            questions_asked: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            queue_tx,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub async fn is_active(&self) -> bool {
        *self.phase.lock().await == Phase::Active
    }

    pub async fn phase(&self) -> Phase {
        *self.phase.lock().await
    }

    /// Full ordered transcript accumulated so far
    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.snapshot().await
    }

    /// Current session statistics
    pub async fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);

        SessionStats {
            call_id: self.config.call_id.clone(),
            is_active: self.is_active().await,
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            transcript_entries: self.transcript.len().await,
            participants: self.roster.lock().await.len(),
            questions_asked: self.questions_asked.load(Ordering::SeqCst),
        }
    }

    /// Consume agent events from the bus until the stream closes
    pub async fn run(self: Arc<Self>, mut events: async_nats::Subscriber) {
        info!("Event loop started for call {}", self.config.call_id);

        while let Some(msg) = events.next().await {
            match serde_json::from_slice::<crate::bus::AgentEvent>(&msg.payload) {
                Ok(event) => self.handle_event(event).await,
                Err(e) => {
                    warn!("Failed to parse agent event: {}", e);
                }
            }
        }

        info!("Event stream closed for call {}", self.config.call_id);
    }

    /// Hand a question off to the responder according to the configured
    /// policy. Never blocks the event-handling path.
    async fn dispatch_question(&self, prompt: String) {
        match self.config.question_policy {
            QuestionPolicy::Concurrent => {
                self.questions_asked.fetch_add(1, Ordering::SeqCst);

                let responder = Arc::clone(&self.responder);
                tokio::spawn(async move {
                    if let Err(e) = responder.generate(&prompt).await {
                        error!("Response generation failed: {}", e);
                    }
                });
            }
            QuestionPolicy::Drop => {
                if self.in_flight.load(Ordering::SeqCst) > 0 {
                    warn!("Response already in flight, dropping question");
                    return;
                }

                self.questions_asked.fetch_add(1, Ordering::SeqCst);
                self.in_flight.fetch_add(1, Ordering::SeqCst);

                let responder = Arc::clone(&self.responder);
                let in_flight = Arc::clone(&self.in_flight);
                tokio::spawn(async move {
                    if let Err(e) = responder.generate(&prompt).await {
                        error!("Response generation failed: {}", e);
                    }
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                });
            }
            QuestionPolicy::Queue => {
                if let Some(tx) = &self.queue_tx {
                    match tx.try_send(prompt) {
                        Ok(()) => {
                            self.questions_asked.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(e) => {
                            warn!("Question queue full, dropping question: {}", e);
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl SessionEventHandler for MeetingSession {
    /// Idle -> Active. A repeated start signal is idempotent; the side
    /// channel is only opened once.
    async fn on_session_started(&self) {
        {
            let mut phase = self.phase.lock().await;
            match *phase {
                Phase::Active => {
                    warn!("Session already active, ignoring start signal");
                    return;
                }
                Phase::Ended => {
                    warn!("Session already ended, ignoring start signal");
                    return;
                }
                Phase::Idle => *phase = Phase::Active,
            }
        }

        info!("Meeting started: {}", self.config.call_id);

        // Side-channel failure is transient; the session continues.
        if let Err(e) = self.side_channel.open().await {
            error!("Side channel error: {}", e);
        } else {
            info!("Messaging side channel initialized");
        }
    }

    /// Active -> Ended (terminal). An end signal before any start is
    /// ignored.
    async fn on_session_ended(&self) {
        {
            let mut phase = self.phase.lock().await;
            match *phase {
                Phase::Idle => {
                    warn!("Session never started, ignoring end signal");
                    return;
                }
                Phase::Ended => {
                    return;
                }
                Phase::Active => *phase = Phase::Ended,
            }
        }

        info!("Meeting ended: {}", self.config.call_id);
        info!(
            "Final stats: {} transcript entries, {} questions answered",
            self.transcript.len().await,
            self.questions_asked.load(Ordering::SeqCst)
        );
    }

    async fn on_participant_joined(&self, participant_id: &str, participant_name: &str) {
        if participant_id == self.config.bot_id {
            return;
        }

        let mut roster = self.roster.lock().await;
        roster.insert(participant_id.to_string(), participant_name.to_string());

        info!("Participant joined: {}", participant_name);
    }

    async fn on_participant_left(&self, participant_id: &str, participant_name: &str) {
        if participant_id == self.config.bot_id {
            return;
        }

        let mut roster = self.roster.lock().await;
        roster.remove(participant_id);

        info!("Participant left: {}", participant_name);
    }

    /// Record the utterance, then check it for the wake phrase. Entries
    /// arriving outside the Active phase are still recorded best-effort.
    async fn on_transcription(
        &self,
        text: &str,
        participant_id: Option<&str>,
        timestamp: Option<DateTime<Utc>>,
    ) {
        if text.trim().is_empty() {
            debug!("Discarding empty transcription event");
            return;
        }

        let speaker = participant_id.unwrap_or("Unknown");
        self.transcript
            .append(TranscriptEntry::new(speaker, text, timestamp))
            .await;

        info!("[{}]: {}", speaker, text);

        match self.detector.detect(text) {
            Detection::Question(question) => {
                info!("Q&A triggered: {}", question);

                let snapshot = self.transcript.snapshot().await;
                let prompt = self.assembler.assemble(&snapshot, &question);
                self.dispatch_question(prompt).await;
            }
            Detection::PhraseOnly => {
                info!("Wake phrase heard with no question, staying silent");
            }
            Detection::None => {}
        }
    }

    async fn on_response_chunk(&self, delta: &str) {
        if !delta.is_empty() {
            info!("Agent: {}", delta);
        }
    }

    async fn on_plugin_error(&self, message: &str, is_fatal: bool) {
        if is_fatal {
            error!("Fatal plugin error: {}", message);
        } else {
            error!("Plugin error: {}", message);
        }
    }
}
