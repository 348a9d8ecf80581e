//! Meeting session management
//!
//! This module provides the `MeetingSession` abstraction that manages:
//! - Session lifecycle (Idle -> Active -> Ended)
//! - Transcript accumulation from transcription events
//! - Wake-phrase detection and delegated Q&A
//! - Participant roster tracking
//! - Session statistics

mod config;
mod handler;
mod session;
mod stats;

pub use config::{QuestionPolicy, SessionConfig};
pub use handler::SessionEventHandler;
pub use session::{MeetingSession, Phase};
pub use stats::SessionStats;
