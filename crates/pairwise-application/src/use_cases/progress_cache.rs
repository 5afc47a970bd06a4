//! Progress Cache Use Case
//!
//! Owns the read-modify-write cycle against the shared recent-progress
//! snapshot and the fan-out of update notifications.
//!
//! The cycle is not atomic: two processes recording at the same time
//! against the same store can overwrite each other, and the later writer
//! wins. The feed is best-effort telemetry, so no compare-and-swap is
//! applied; all mutation lives in
//! [`ProgressCacheSnapshot::apply_completion`] should one be added.

use crate::services::{UpdateSubscription, UpdateSubscriptionManager};
use pairwise_domain::constants::{
    DEFAULT_RETENTION_MS, PROGRESS_CACHE_KEY, PROGRESS_UPDATES_CHANNEL,
};
use pairwise_domain::error::{Error, Result};
use pairwise_domain::events::ProgressUpdateMessage;
use pairwise_domain::ports::{ClockProvider, ProgressStoreProvider, PubSubProvider};
use pairwise_domain::value_objects::{decode_snapshot, encode_snapshot};
use pairwise_domain::{CompletionEvent, ProgressCacheSnapshot};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default bound on each store or transport call
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables for [`ProgressCacheStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressCacheSettings {
    /// Key holding the serialized snapshot
    pub cache_key: String,
    /// Channel carrying update notifications
    pub channel: String,
    /// Entries idle longer than this are pruned on write
    pub retention_ms: i64,
    /// Bound on each store/transport call; `None` waits forever
    pub operation_timeout: Option<Duration>,
}

impl Default for ProgressCacheSettings {
    fn default() -> Self {
        Self {
            cache_key: PROGRESS_CACHE_KEY.to_string(),
            channel: PROGRESS_UPDATES_CHANNEL.to_string(),
            retention_ms: DEFAULT_RETENTION_MS,
            operation_timeout: Some(DEFAULT_OPERATION_TIMEOUT),
        }
    }
}

/// Result of a recorded completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Counter value after this event
    pub total_challenges_count: u64,
    /// Entries retained in the persisted snapshot
    pub entries: usize,
    /// Stale entries dropped by this write
    pub pruned: usize,
    /// Whether the event opened a new slot
    pub created_entry: bool,
}

/// Shared recent-progress cache
pub struct ProgressCacheStore {
    store: Arc<dyn ProgressStoreProvider>,
    pubsub: Arc<dyn PubSubProvider>,
    clock: Arc<dyn ClockProvider>,
    settings: ProgressCacheSettings,
    subscriptions: UpdateSubscriptionManager,
}

impl ProgressCacheStore {
    /// Create a store with injected providers
    pub fn new(
        store: Arc<dyn ProgressStoreProvider>,
        pubsub: Arc<dyn PubSubProvider>,
        clock: Arc<dyn ClockProvider>,
        settings: ProgressCacheSettings,
    ) -> Self {
        let subscriptions =
            UpdateSubscriptionManager::new(Arc::clone(&pubsub), settings.channel.clone())
                .with_subscribe_timeout(settings.operation_timeout);

        Self {
            store,
            pubsub,
            clock,
            settings,
            subscriptions,
        }
    }

    /// Active settings
    pub fn settings(&self) -> &ProgressCacheSettings {
        &self.settings
    }

    /// Subscription manager backing [`subscribe_to_updates`](Self::subscribe_to_updates)
    pub fn subscriptions(&self) -> &UpdateSubscriptionManager {
        &self.subscriptions
    }

    /// Read the snapshot, initializing it on first use.
    ///
    /// A missing or malformed value is replaced by a fresh empty snapshot,
    /// then read back exactly once.
    pub async fn get_snapshot(&self) -> Result<ProgressCacheSnapshot> {
        if let Some(snapshot) = self.read_snapshot().await? {
            return Ok(snapshot);
        }

        self.initialize().await?;

        self.read_snapshot().await?.ok_or_else(|| {
            Error::cache_unavailable(format!(
                "snapshot '{}' still missing after initialization",
                self.settings.cache_key
            ))
        })
    }

    /// Read the snapshot, or log and return `None` when the cache is out of reach
    pub async fn snapshot_if_available(&self) -> Option<ProgressCacheSnapshot> {
        match self.get_snapshot().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) if e.is_degradable() => {
                warn!("Recent progress unavailable, skipping activity feed: {}", e);
                None
            }
            Err(e) => {
                error!("Recent progress read failed: {}", e);
                None
            }
        }
    }

    /// Record one completion and notify other processes, returning any failure.
    ///
    /// A [`Error::Publish`] means the snapshot was written and only the
    /// notification was lost.
    pub async fn try_record_completion(&self, event: CompletionEvent) -> Result<RecordOutcome> {
        event.validate()?;

        let previous = self.get_snapshot().await?;
        let now = self.clock.now_millis();
        let applied = previous.apply_completion(&event, now, self.settings.retention_ms);

        self.write_snapshot(&applied.snapshot).await?;

        let outcome = RecordOutcome {
            total_challenges_count: applied.snapshot.total_challenges_count,
            entries: applied.snapshot.entries.len(),
            pruned: applied.pruned,
            created_entry: applied.created_entry,
        };
        debug!(
            user_key = %event.user_key,
            challenge_id = %event.challenge_id,
            total = outcome.total_challenges_count,
            pruned = outcome.pruned,
            "Recorded challenge completion"
        );

        self.publish_update(&event.challenge_id).await?;
        Ok(outcome)
    }

    /// Record one completion; never fails the caller.
    ///
    /// Lost events are logged at `error`; lost notifications and rejected
    /// events at `warn`.
    pub async fn record_completion_event(
        &self,
        user_key: &str,
        user_id: &str,
        challenge_id: &str,
        occurred_at: Option<i64>,
    ) {
        let event = CompletionEvent {
            user_key: user_key.to_string(),
            user_id: user_id.to_string(),
            challenge_id: challenge_id.to_string(),
            occurred_at,
        };

        match self.try_record_completion(event).await {
            Ok(_) => {}
            Err(e) if e.is_publish_failure() => {
                warn!(challenge_id, "Progress update not broadcast: {}", e);
            }
            Err(e) if e.is_rejected_input() => {
                warn!(user_key, challenge_id, "Progress event rejected: {}", e);
            }
            Err(e) => {
                error!(user_key, challenge_id, "Progress event lost: {}", e);
            }
        }
    }

    /// Attach `handler` to every update published on the channel, from any process
    pub async fn subscribe_to_updates<F>(&self, handler: F) -> Result<UpdateSubscription>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscriptions.subscribe(handler).await
    }

    async fn initialize(&self) -> Result<()> {
        let snapshot = ProgressCacheSnapshot::new(self.clock.now_millis());
        self.write_snapshot(&snapshot).await?;
        info!(key = %self.settings.cache_key, "Initialized recent progress snapshot");
        Ok(())
    }

    async fn read_snapshot(&self) -> Result<Option<ProgressCacheSnapshot>> {
        let key = &self.settings.cache_key;
        let raw = self
            .bounded("GET", Error::cache_unavailable, self.store.get(key))
            .await?;

        match raw {
            None => {
                debug!(key = %key, "Recent progress snapshot absent");
                Ok(None)
            }
            Some(raw) => match decode_snapshot(&raw) {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(e) => {
                    warn!(key = %key, "Discarding malformed progress snapshot: {}", e);
                    Ok(None)
                }
            },
        }
    }

    async fn write_snapshot(&self, snapshot: &ProgressCacheSnapshot) -> Result<()> {
        let key = &self.settings.cache_key;
        let raw = encode_snapshot(snapshot)?;
        self.bounded("SET", Error::cache_unavailable, self.store.set(key, &raw))
            .await
    }

    async fn publish_update(&self, challenge_id: &str) -> Result<()> {
        let channel = &self.settings.channel;
        let payload = ProgressUpdateMessage::new(challenge_id).encode()?;
        self.bounded(
            "PUBLISH",
            |message| Error::publish(channel.as_str(), message),
            self.pubsub.publish(channel, &payload),
        )
        .await
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        on_timeout: impl FnOnce(String) -> Error,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match self.settings.operation_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(on_timeout(format!("{operation} timed out after {limit:?}"))),
            },
            None => call.await,
        }
    }
}

impl std::fmt::Debug for ProgressCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressCacheStore")
            .field("store", &self.store.provider_name())
            .field("pubsub", &self.pubsub.provider_name())
            .field("settings", &self.settings)
            .finish()
    }
}
