use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event published by the agent platform on `call.events.<call_id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Call session began
    SessionStarted,

    /// Call session ended
    SessionEnded,

    ParticipantJoined {
        participant_id: String,
        participant_name: String,
    },

    ParticipantLeft {
        participant_id: String,
        participant_name: String,
    },

    /// A finished speech-to-text segment
    Transcription {
        text: String,
        participant_id: Option<String>,
        timestamp: Option<DateTime<Utc>>,
    },

    /// Streaming delta of an in-flight assistant response
    ResponseChunk { delta: String },

    /// Error surfaced by a platform plugin
    PluginError { message: String, is_fatal: bool },
}

/// Prompt submitted to the response generator on `llm.prompt.<call_id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub call_id: String,
    pub prompt: String,
    pub timestamp: String, // RFC3339 timestamp
}

/// Presence announce published when the assistant joins a call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceMessage {
    pub call_id: String,
    pub user_id: String,
    pub user_name: String,
    /// Behavioral instructions for the platform-side agent
    pub instructions: String,
    pub timestamp: String,
}

/// Request to open the messaging side channel for a call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideChannelMessage {
    pub call_id: String,
    pub channel_type: String,
    pub timestamp: String,
}
