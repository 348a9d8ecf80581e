pub mod client;
pub mod messages;

pub use client::BusClient;
pub use messages::{AgentEvent, PresenceMessage, PromptMessage, SideChannelMessage};
