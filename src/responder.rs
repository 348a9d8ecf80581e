//! Collaborator seams for delegated operations
//!
//! Response generation and the messaging side channel are external
//! concerns. The session only sees these traits; the bus-backed
//! implementations live here.

use crate::bus::BusClient;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Delegated answer generation. Potentially long-running; callers must
/// not block transcript ingestion on it.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<()>;
}

/// Auxiliary text-messaging channel associated with a call session.
#[async_trait]
pub trait SideChannel: Send + Sync {
    async fn open(&self) -> Result<()>;
}

/// Responder that hands prompts to the platform over the message bus
pub struct BusResponder {
    client: Arc<BusClient>,
}

impl BusResponder {
    pub fn new(client: Arc<BusClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Responder for BusResponder {
    async fn generate(&self, prompt: &str) -> Result<()> {
        self.client.publish_prompt(prompt).await
    }
}

/// Side channel opened through the message bus
pub struct BusSideChannel {
    client: Arc<BusClient>,
}

impl BusSideChannel {
    pub fn new(client: Arc<BusClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SideChannel for BusSideChannel {
    async fn open(&self) -> Result<()> {
        self.client.open_side_channel().await
    }
}
