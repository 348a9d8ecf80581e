use crate::bus::AgentEvent;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Event-handling capability of a meeting session: one method per agent
/// event type, registered with the event loop at construction time.
#[async_trait]
pub trait SessionEventHandler: Send + Sync {
    async fn on_session_started(&self);

    async fn on_session_ended(&self);

    async fn on_participant_joined(&self, participant_id: &str, participant_name: &str);

    async fn on_participant_left(&self, participant_id: &str, participant_name: &str);

    async fn on_transcription(
        &self,
        text: &str,
        participant_id: Option<&str>,
        timestamp: Option<DateTime<Utc>>,
    );

    async fn on_response_chunk(&self, delta: &str);

    async fn on_plugin_error(&self, message: &str, is_fatal: bool);

    /// Route one agent event to its handler method
    async fn handle_event(&self, event: AgentEvent) {
        match event {
            AgentEvent::SessionStarted => self.on_session_started().await,
            AgentEvent::SessionEnded => self.on_session_ended().await,
            AgentEvent::ParticipantJoined {
                participant_id,
                participant_name,
            } => {
                self.on_participant_joined(&participant_id, &participant_name)
                    .await
            }
            AgentEvent::ParticipantLeft {
                participant_id,
                participant_name,
            } => {
                self.on_participant_left(&participant_id, &participant_name)
                    .await
            }
            AgentEvent::Transcription {
                text,
                participant_id,
                timestamp,
            } => {
                self.on_transcription(&text, participant_id.as_deref(), timestamp)
                    .await
            }
            AgentEvent::ResponseChunk { delta } => self.on_response_chunk(&delta).await,
            AgentEvent::PluginError { message, is_fatal } => {
                self.on_plugin_error(&message, is_fatal).await
            }
        }
    }
}
