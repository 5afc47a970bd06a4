//! Progress cache configuration types

use crate::constants::*;
use pairwise_application::ProgressCacheSettings;
use pairwise_domain::constants::{
    DEFAULT_RETENTION_MS, PROGRESS_CACHE_KEY, PROGRESS_UPDATES_CHANNEL,
};
use pairwise_providers::constants::DEFAULT_REDIS_URL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Snapshot store backends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Shared Redis key - default, visible to every server process
    #[default]
    Redis,
    /// Process-local map, for single-process deployments and tests
    Memory,
}

/// Update notification transports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PubSubProviderKind {
    /// Redis `PUBLISH`/`SUBSCRIBE` - default
    #[default]
    Redis,
    /// In-process broadcast channels
    Memory,
    /// Notifications disabled
    Null,
}

/// Progress cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCacheConfig {
    /// Snapshot store backend
    pub provider: StoreProvider,

    /// Notification transport
    pub pubsub: PubSubProviderKind,

    /// Redis connection URL, required by either Redis backend
    pub redis_url: Option<String>,

    /// Key holding the serialized snapshot
    pub cache_key: String,

    /// Channel carrying update notifications
    pub channel: String,

    /// Retention window in milliseconds
    pub retention_ms: i64,

    /// Bound on each store/transport call in milliseconds; 0 disables it
    pub operation_timeout_ms: u64,
}

impl Default for ProgressCacheConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::Redis,
            pubsub: PubSubProviderKind::Redis,
            redis_url: Some(DEFAULT_REDIS_URL.to_string()),
            cache_key: PROGRESS_CACHE_KEY.to_string(),
            channel: PROGRESS_UPDATES_CHANNEL.to_string(),
            retention_ms: DEFAULT_RETENTION_MS,
            operation_timeout_ms: DEFAULT_OPERATION_TIMEOUT_MS,
        }
    }
}

impl ProgressCacheConfig {
    /// Config backed by Redis at `url` for both store and transport
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Config using only in-process providers
    pub fn memory() -> Self {
        Self {
            provider: StoreProvider::Memory,
            pubsub: PubSubProviderKind::Memory,
            redis_url: None,
            ..Default::default()
        }
    }

    /// Whether either backend needs a Redis connection
    pub fn uses_redis(&self) -> bool {
        self.provider == StoreProvider::Redis || self.pubsub == PubSubProviderKind::Redis
    }

    /// Operation timeout, `None` when disabled
    pub fn operation_timeout(&self) -> Option<Duration> {
        (self.operation_timeout_ms > 0).then(|| Duration::from_millis(self.operation_timeout_ms))
    }

    /// Settings consumed by the progress cache use case
    pub fn to_settings(&self) -> ProgressCacheSettings {
        ProgressCacheSettings {
            cache_key: self.cache_key.clone(),
            channel: self.channel.clone(),
            retention_ms: self.retention_ms,
            operation_timeout: self.operation_timeout(),
        }
    }
}
