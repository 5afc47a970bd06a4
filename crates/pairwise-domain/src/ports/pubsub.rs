//! Pub/Sub Provider Port
//!
//! Contract for the broadcast transport used to tell other processes that
//! the snapshot changed.

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Boxed stream of raw message payloads received on a channel
///
/// Dropping the stream releases the transport-level subscription.
pub type MessageStream = Pin<Box<dyn Stream<Item = String> + Send + 'static>>;

/// Publish/subscribe transport
///
/// Every call to [`subscribe`](PubSubProvider::subscribe) opens one
/// transport-level subscription. Callers that want a single subscription
/// per process must share the returned stream themselves.
#[async_trait]
pub trait PubSubProvider: Send + Sync + std::fmt::Debug {
    /// Publish a text payload on `channel`
    async fn publish(&self, channel: &str, payload: &str) -> Result<()>;

    /// Open a subscription on `channel`
    async fn subscribe(&self, channel: &str) -> Result<MessageStream>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
