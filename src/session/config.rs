use crate::wake::DEFAULT_WAKE_PHRASE;
use serde::{Deserialize, Serialize};

/// Policy for a wake-phrase trigger that arrives while a previous
/// response is still being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionPolicy {
    /// Dispatch every question immediately, letting responses overlap
    #[default]
    Concurrent,

    /// Ignore new triggers until the in-flight response completes
    Drop,

    /// Serialize questions through a queue, one response at a time
    Queue,
}

/// Configuration for a meeting session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Opaque call identifier, set once at session creation
    pub call_id: String,

    /// Phrase that must open an utterance for it to be treated as a
    /// question to the assistant
    pub wake_phrase: String,

    /// The assistant's own participant id, filtered from join/leave
    /// handling
    pub bot_id: String,

    /// Display name announced when joining the call
    pub bot_name: String,

    /// Handling of overlapping wake-phrase triggers
    pub question_policy: QuestionPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            call_id: format!("meeting-{}", uuid::Uuid::new_v4()),
            wake_phrase: DEFAULT_WAKE_PHRASE.to_string(),
            bot_id: "meeting-assistant-bot".to_string(),
            bot_name: "Meeting Assistant".to_string(),
            question_policy: QuestionPolicy::default(),
        }
    }
}
