//! Redis progress store
//!
//! Shared key-value store backed by Redis. The snapshot lives as a plain
//! string under one key and is only ever read with `GET` and replaced with
//! `SET`.
//!
//! ## Example
//!
//! ```ignore
//! use pairwise_providers::store::RedisProgressStore;
//!
//! let store = RedisProgressStore::new("redis://localhost:6379")?;
//! ```

use async_trait::async_trait;
use pairwise_domain::error::{Error, Result};
use pairwise_domain::ports::ProgressStoreProvider;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Redis-backed store
///
/// The connection is opened lazily on first use and then shared; the
/// connection manager reconnects on its own after transient failures.
pub struct RedisProgressStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
}

impl RedisProgressStore {
    /// Create a store for the given connection URL
    ///
    /// Only parses the URL; no connection is made until the first call.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL '{connection_string}'"), e)
        })?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
        })
    }

    /// Create a store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| {
                        Error::cache_unavailable_with_source("Failed to connect to Redis", e)
                    })?;
                info!("Connected to Redis progress store");
                Ok::<_, Error>(manager)
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl ProgressStoreProvider for RedisProgressStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;

        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| Error::cache_unavailable_with_source("Redis GET failed", e))?;

        debug!(key, hit = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection().await?;

        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| Error::cache_unavailable_with_source("Redis SET failed", e))?;

        debug!(key, bytes = value.len(), "Redis SET");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisProgressStore")
            .field("connected", &self.connection.initialized())
            .finish()
    }
}
