//! Composition root
//!
//! Resolves the configured providers and wires them into a
//! [`ProgressCacheStore`].
//!
//! ```text
//! AppConfig → resolve_store / resolve_pubsub → ProgressCacheStore → AppContext
//! ```

use crate::config::{
    AppConfig, ProgressCacheConfig, PubSubProviderKind, StoreProvider, validate_app_config,
};
use pairwise_application::ProgressCacheStore;
use pairwise_domain::error::{Error, Result};
use pairwise_domain::ports::{ClockProvider, ProgressStoreProvider, PubSubProvider};
use pairwise_providers::SystemClock;
use pairwise_providers::pubsub::{
    InMemoryPubSubProvider, NullPubSubProvider, RedisPubSubProvider,
};
use pairwise_providers::store::{InMemoryProgressStore, RedisProgressStore};
use std::sync::Arc;
use tracing::info;

/// Application context holding the configured progress cache
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    progress_cache: Arc<ProgressCacheStore>,
}

impl AppContext {
    /// Shared progress cache
    pub fn progress_cache(&self) -> Arc<ProgressCacheStore> {
        Arc::clone(&self.progress_cache)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("progress_cache", &self.progress_cache)
            .finish()
    }
}

/// Build the application context from configuration
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    validate_app_config(&config)?;

    let progress_cache =
        create_progress_cache(&config.progress_cache, Arc::new(SystemClock::new()))?;
    info!(
        store = ?config.progress_cache.provider,
        pubsub = ?config.progress_cache.pubsub,
        "Progress cache ready"
    );

    Ok(AppContext {
        config: Arc::new(config),
        progress_cache: Arc::new(progress_cache),
    })
}

/// Context backed only by in-process providers
pub fn init_test_app() -> Result<AppContext> {
    init_app(AppConfig {
        progress_cache: ProgressCacheConfig::memory(),
        ..Default::default()
    })
}

/// Wire a progress cache with an explicit clock
pub fn create_progress_cache(
    config: &ProgressCacheConfig,
    clock: Arc<dyn ClockProvider>,
) -> Result<ProgressCacheStore> {
    let store = resolve_store(config)?;
    let pubsub = resolve_pubsub(config)?;
    Ok(ProgressCacheStore::new(store, pubsub, clock, config.to_settings()))
}

/// Snapshot store selected by `config.provider`
pub fn resolve_store(config: &ProgressCacheConfig) -> Result<Arc<dyn ProgressStoreProvider>> {
    match config.provider {
        StoreProvider::Redis => Ok(Arc::new(RedisProgressStore::new(redis_url(config)?)?)),
        StoreProvider::Memory => Ok(Arc::new(InMemoryProgressStore::new())),
    }
}

/// Notification transport selected by `config.pubsub`
pub fn resolve_pubsub(config: &ProgressCacheConfig) -> Result<Arc<dyn PubSubProvider>> {
    match config.pubsub {
        PubSubProviderKind::Redis => Ok(Arc::new(RedisPubSubProvider::new(redis_url(config)?)?)),
        PubSubProviderKind::Memory => Ok(Arc::new(InMemoryPubSubProvider::new())),
        PubSubProviderKind::Null => Ok(Arc::new(NullPubSubProvider::new())),
    }
}

fn redis_url(config: &ProgressCacheConfig) -> Result<&str> {
    config.redis_url.as_deref().ok_or_else(|| {
        Error::configuration("Redis URL is required when a Redis provider is selected")
    })
}
