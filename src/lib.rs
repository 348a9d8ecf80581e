pub mod bus;
pub mod config;
pub mod http;
pub mod prompt;
pub mod responder;
pub mod session;
pub mod summary;
pub mod transcript;
pub mod wake;

pub use bus::{AgentEvent, BusClient, PresenceMessage, PromptMessage, SideChannelMessage};
pub use config::Config;
pub use http::{create_router, AppState};
pub use prompt::PromptAssembler;
pub use responder::{BusResponder, BusSideChannel, Responder, SideChannel};
pub use session::{
    MeetingSession, Phase, QuestionPolicy, SessionConfig, SessionEventHandler, SessionStats,
};
pub use summary::SummaryReporter;
pub use transcript::{TranscriptEntry, TranscriptStore};
pub use wake::{Detection, WakeWordDetector, DEFAULT_WAKE_PHRASE};
