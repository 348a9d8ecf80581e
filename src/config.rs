use crate::session::QuestionPolicy;
use crate::wake::DEFAULT_WAKE_PHRASE;
use anyhow::Result;
use serde::Deserialize;

/// Behavioral instructions sent to the platform-side agent when joining
/// a call. The assistant stays silent until the wake phrase is heard.
pub const DEFAULT_INSTRUCTIONS: &str = "\
You are a meeting transcription bot.\n\
Never speak unless you hear the wake phrase followed by a question.\n\
Do not respond to conversations between participants.\n\
Do not acknowledge anything participants say to each other.\n\
When you do hear the wake phrase, answer the question using only \
information from this meeting, and keep the answer short and factual.";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub agent: AgentConfig,
    pub bus: BusConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    pub bot_id: String,
    pub bot_name: String,
    pub wake_phrase: String,
    pub question_policy: QuestionPolicy,
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct BusConfig {
    pub url: String,
}

impl Config {
    /// Load configuration from an optional file layered over defaults.
    /// A missing file yields the default configuration.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "meeting-assistant")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8787)?
            .set_default("agent.bot_id", "meeting-assistant-bot")?
            .set_default("agent.bot_name", "Meeting Assistant")?
            .set_default("agent.wake_phrase", DEFAULT_WAKE_PHRASE)?
            .set_default("agent.question_policy", "concurrent")?
            .set_default("agent.instructions", DEFAULT_INSTRUCTIONS)?
            .set_default("bus.url", "nats://localhost:4222")?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
