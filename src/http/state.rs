use crate::session::MeetingSession;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The meeting session this process is attached to
    pub session: Arc<MeetingSession>,
}

impl AppState {
    pub fn new(session: Arc<MeetingSession>) -> Self {
        Self { session }
    }
}
