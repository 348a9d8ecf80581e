use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a meeting session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Call this session is attached to
    pub call_id: String,

    /// Whether the call is currently active
    pub is_active: bool,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Number of transcript entries recorded
    pub transcript_entries: usize,

    /// Participants currently in the call (excluding the assistant)
    pub participants: usize,

    /// Wake-phrase questions dispatched to the responder
    pub questions_asked: usize,
}
