//! In-memory Pub/Sub Provider
//!
//! Process-local broadcast transport built on tokio broadcast channels,
//! one per channel name. Counts transport-level subscriptions and
//! publishes, and can be made to fail publishes for degradation tests.

use crate::constants::DEFAULT_PUBSUB_CAPACITY;
use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream;
use pairwise_domain::error::{Error, Result};
use pairwise_domain::ports::{MessageStream, PubSubProvider};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Broadcast-channel pub/sub for a single process
#[derive(Debug)]
pub struct InMemoryPubSubProvider {
    channels: DashMap<String, broadcast::Sender<String>>,
    capacity: usize,
    subscribe_calls: AtomicUsize,
    publish_calls: AtomicUsize,
    publish_enabled: AtomicBool,
}

impl Default for InMemoryPubSubProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPubSubProvider {
    /// Create a transport with default per-channel capacity (1024)
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PUBSUB_CAPACITY)
    }

    /// Create with custom per-channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
            subscribe_calls: AtomicUsize::new(0),
            publish_calls: AtomicUsize::new(0),
            publish_enabled: AtomicBool::new(true),
        }
    }

    /// Number of transport-level subscriptions ever opened
    pub fn subscribe_count(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Number of successful publishes
    pub fn publish_count(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }

    /// Live receivers on a channel
    pub fn receiver_count(&self, channel: &str) -> usize {
        self.channels
            .get(channel)
            .map_or(0, |sender| sender.receiver_count())
    }

    /// Make subsequent publishes fail (or succeed again)
    pub fn set_publish_enabled(&self, enabled: bool) {
        self.publish_enabled.store(enabled, Ordering::SeqCst);
    }

    fn sender(&self, channel: &str) -> broadcast::Sender<String> {
        self.channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}

#[async_trait]
impl PubSubProvider for InMemoryPubSubProvider {
    async fn publish(&self, channel: &str, payload: &str) -> Result<()> {
        if !self.publish_enabled.load(Ordering::SeqCst) {
            return Err(Error::publish(channel, "in-memory transport is rejecting publishes"));
        }

        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        match self.sender(channel).send(payload.to_string()) {
            Ok(count) => debug!(channel, "Published to {} subscribers", count),
            Err(_) => debug!(channel, "Published but no subscribers"),
        }
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<MessageStream> {
        let receiver = self.sender(channel).subscribe();
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);

        let stream = stream::unfold(receiver, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(payload) => return Some((payload, rx)),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Progress update stream lagged by {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
