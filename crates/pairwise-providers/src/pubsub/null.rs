//! Null pub/sub provider
//!
//! Accepts every publish and hands out subscriptions that never yield.
//! Used when cross-process notifications are switched off.

use async_trait::async_trait;
use futures::stream;
use pairwise_domain::error::Result;
use pairwise_domain::ports::{MessageStream, PubSubProvider};

/// Pub/sub provider that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPubSubProvider;

impl NullPubSubProvider {
    /// Create a new null provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PubSubProvider for NullPubSubProvider {
    async fn publish(&self, _channel: &str, _payload: &str) -> Result<()> {
        Ok(())
    }

    async fn subscribe(&self, _channel: &str) -> Result<MessageStream> {
        Ok(Box::pin(stream::pending()))
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
