use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

use super::messages::{PresenceMessage, PromptMessage, SideChannelMessage};

/// Narrow interface to the external agent platform over NATS.
///
/// Inbound agent events arrive on `call.events.<call_id>`; outbound
/// commands (presence, prompts, side channel) are published per call.
pub struct BusClient {
    client: Client,
    call_id: String,
}

impl BusClient {
    /// Connect to the message bus
    pub async fn connect(url: &str, call_id: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client, call_id })
    }

    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    /// Subscribe to agent events for this call
    pub async fn subscribe_events(&self) -> Result<async_nats::Subscriber> {
        let subject = format!("call.events.{}", self.call_id);

        info!("Subscribing to agent events on {}", subject);

        let subscriber = self
            .client
            .subscribe(subject.clone())
            .await
            .context("Failed to subscribe to agent events")?;

        info!("Subscribed to {}", subject);

        Ok(subscriber)
    }

    /// Announce the assistant's identity and join the call
    pub async fn announce_presence(
        &self,
        user_id: &str,
        user_name: &str,
        instructions: &str,
    ) -> Result<()> {
        let subject = format!("call.presence.{}", self.call_id);

        let message = PresenceMessage {
            call_id: self.call_id.clone(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            instructions: instructions.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to announce presence")?;

        info!("Announced presence on {} as {}", subject, user_id);

        Ok(())
    }

    /// Submit a prompt to the external response generator
    pub async fn publish_prompt(&self, prompt: &str) -> Result<()> {
        let subject = format!("llm.prompt.{}", self.call_id);

        let message = PromptMessage {
            call_id: self.call_id.clone(),
            prompt: prompt.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish prompt")?;

        info!("Published prompt to {} ({} bytes)", subject, prompt.len());

        Ok(())
    }

    /// Open the messaging side channel for this call
    pub async fn open_side_channel(&self) -> Result<()> {
        let subject = format!("chat.open.{}", self.call_id);

        let message = SideChannelMessage {
            call_id: self.call_id.clone(),
            channel_type: "messaging".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let payload = serde_json::to_vec(&message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to open side channel")?;

        info!("Opened messaging side channel on {}", subject);

        Ok(())
    }

    /// Leave the call and close the bus connection
    pub async fn close(&self) -> Result<()> {
        info!("Leaving call {} and closing NATS connection", self.call_id);
        // async-nats handles cleanup on drop
        Ok(())
    }
}
