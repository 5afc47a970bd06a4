//! Redis Pub/Sub Provider
//!
//! Broadcast transport over Redis `PUBLISH`/`SUBSCRIBE`. Publishing shares
//! one managed connection; every subscription gets its own dedicated
//! pub/sub connection, released when the returned stream is dropped.

use async_trait::async_trait;
use futures::StreamExt;
use pairwise_domain::error::{Error, Result};
use pairwise_domain::ports::{MessageStream, PubSubProvider};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Pub/sub transport backed by Redis
pub struct RedisPubSubProvider {
    client: Client,
    publisher: OnceCell<ConnectionManager>,
}

impl RedisPubSubProvider {
    /// Create a transport for the given connection URL
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL '{connection_string}'"), e)
        })?;

        Ok(Self {
            client,
            publisher: OnceCell::new(),
        })
    }

    async fn publisher(&self, channel: &str) -> Result<ConnectionManager> {
        let manager = self
            .publisher
            .get_or_try_init(|| async {
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| {
                        Error::publish_with_source(channel, "Failed to connect to Redis", e)
                    })
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl PubSubProvider for RedisPubSubProvider {
    async fn publish(&self, channel: &str, payload: &str) -> Result<()> {
        let mut conn = self.publisher(channel).await?;

        let receivers: i64 = conn
            .publish(channel, payload)
            .await
            .map_err(|e| Error::publish_with_source(channel, "Redis PUBLISH failed", e))?;

        debug!(channel, receivers, "Published progress update");
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<MessageStream> {
        let mut pubsub = self.client.get_async_pubsub().await.map_err(|e| {
            Error::cache_unavailable_with_source("Failed to open Redis pub/sub connection", e)
        })?;

        pubsub.subscribe(channel).await.map_err(|e| {
            Error::cache_unavailable_with_source(
                format!("Failed to subscribe to Redis channel '{channel}'"),
                e,
            )
        })?;

        info!(channel, "Subscribed to Redis channel");

        let stream = pubsub.into_on_message().filter_map(|msg| async move {
            match msg.get_payload::<String>() {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!("Dropping non-text Redis message: {}", e);
                    None
                }
            }
        });

        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisPubSubProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPubSubProvider")
            .field("publisher_connected", &self.publisher.initialized())
            .finish()
    }
}
