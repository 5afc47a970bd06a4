//! Update subscription manager
//!
//! Keeps exactly one transport-level subscription on the updates channel per
//! manager, no matter how many local handlers are attached. A single
//! listener task decodes each message and fans the challenge id out to
//! every live handler. If the transport stream ends while handlers remain,
//! the listener re-subscribes with exponential backoff. Releasing the last
//! handler aborts the listener, which drops the transport stream.

use futures::StreamExt;
use pairwise_domain::error::{Error, Result};
use pairwise_domain::events::ProgressUpdateMessage;
use pairwise_domain::ports::{MessageStream, PubSubProvider};
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

const RESUBSCRIBE_BACKOFF_MIN: Duration = Duration::from_millis(50);
const RESUBSCRIBE_BACKOFF_MAX: Duration = Duration::from_secs(5);

/// Callback invoked with the challenge id of every update
pub type UpdateHandler = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct ListenerState {
    handlers: HashMap<u64, UpdateHandler>,
    listener: Option<AbortHandle>,
}

impl ListenerState {
    fn is_listening(&self) -> bool {
        self.listener
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

#[derive(Default)]
struct Shared {
    state: Mutex<ListenerState>,
    next_id: AtomicU64,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ListenerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reference-counted fan-out over a single pub/sub subscription
pub struct UpdateSubscriptionManager {
    pubsub: Arc<dyn PubSubProvider>,
    channel: String,
    subscribe_timeout: Option<Duration>,
    shared: Arc<Shared>,
    connect_gate: tokio::sync::Mutex<()>,
}

impl UpdateSubscriptionManager {
    /// Create a manager for `channel`; nothing is subscribed until the first handler
    pub fn new(pubsub: Arc<dyn PubSubProvider>, channel: impl Into<String>) -> Self {
        Self {
            pubsub,
            channel: channel.into(),
            subscribe_timeout: None,
            shared: Arc::new(Shared::default()),
            connect_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Bound the transport `subscribe` call
    pub fn with_subscribe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.subscribe_timeout = timeout;
        self
    }

    /// Channel this manager listens on
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Number of attached handlers
    pub fn handler_count(&self) -> usize {
        self.shared.lock().handlers.len()
    }

    /// Whether the shared transport subscription is live
    pub fn is_listening(&self) -> bool {
        self.shared.lock().is_listening()
    }

    /// Attach a handler, opening the transport subscription if none is live
    pub async fn subscribe<F>(&self, handler: F) -> Result<UpdateSubscription>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let _gate = self.connect_gate.lock().await;

        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let needs_listener = {
            let mut state = self.shared.lock();
            state.handlers.insert(id, Arc::new(handler));
            !state.is_listening()
        };

        if needs_listener {
            match open_stream(self.pubsub.as_ref(), &self.channel, self.subscribe_timeout).await {
                Ok(stream) => {
                    let listener = Listener {
                        pubsub: Arc::clone(&self.pubsub),
                        channel: self.channel.clone(),
                        subscribe_timeout: self.subscribe_timeout,
                        shared: Arc::downgrade(&self.shared),
                    };
                    let task = tokio::spawn(listener.run(stream));
                    self.shared.lock().listener = Some(task.abort_handle());
                    info!(channel = %self.channel, "Listening for progress updates");
                }
                Err(e) => {
                    self.shared.lock().handlers.remove(&id);
                    return Err(e);
                }
            }
        }

        debug!(channel = %self.channel, handler = id, "Progress update handler attached");
        Ok(UpdateSubscription {
            id,
            shared: Arc::downgrade(&self.shared),
        })
    }

}

impl Drop for UpdateSubscriptionManager {
    fn drop(&mut self) {
        if let Some(listener) = self.shared.lock().listener.take() {
            listener.abort();
        }
    }
}

impl std::fmt::Debug for UpdateSubscriptionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("UpdateSubscriptionManager")
            .field("channel", &self.channel)
            .field("handlers", &state.handlers.len())
            .field("listening", &state.is_listening())
            .finish()
    }
}

/// Handle keeping one update handler attached
///
/// Dropping the handle, or calling [`release`](Self::release), detaches the
/// handler. Releasing the last handler closes the shared subscription.
#[derive(Debug)]
pub struct UpdateSubscription {
    id: u64,
    shared: Weak<Shared>,
}

impl UpdateSubscription {
    /// Handler identifier, unique within its manager
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Detach the handler now
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for UpdateSubscription {
    fn drop(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };

        let listener = {
            let mut state = shared.lock();
            state.handlers.remove(&self.id);
            if state.handlers.is_empty() {
                state.listener.take()
            } else {
                None
            }
        };

        if let Some(listener) = listener {
            listener.abort();
            debug!("Last progress update handler released, subscription closed");
        }
    }
}

async fn open_stream(
    pubsub: &dyn PubSubProvider,
    channel: &str,
    subscribe_timeout: Option<Duration>,
) -> Result<MessageStream> {
    let subscribe = pubsub.subscribe(channel);
    match subscribe_timeout {
        Some(limit) => tokio::time::timeout(limit, subscribe).await.map_err(|_| {
            Error::cache_unavailable(format!(
                "subscribing to '{channel}' timed out after {limit:?}"
            ))
        })?,
        None => subscribe.await,
    }
}

/// Background task owning the transport stream
struct Listener {
    pubsub: Arc<dyn PubSubProvider>,
    channel: String,
    subscribe_timeout: Option<Duration>,
    shared: Weak<Shared>,
}

impl Listener {
    async fn run(self, mut stream: MessageStream) {
        let mut backoff = RESUBSCRIBE_BACKOFF_MIN;
        loop {
            if self.fan_out(&mut stream).await > 0 {
                backoff = RESUBSCRIBE_BACKOFF_MIN;
            }

            stream = loop {
                if !self.has_handlers() {
                    return;
                }
                warn!(
                    channel = %self.channel,
                    retry_in = ?backoff,
                    "Progress update stream ended, resubscribing"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(RESUBSCRIBE_BACKOFF_MAX);

                let reopened =
                    open_stream(self.pubsub.as_ref(), &self.channel, self.subscribe_timeout).await;
                match reopened {
                    Ok(stream) => {
                        info!(channel = %self.channel, "Resubscribed to progress updates");
                        break stream;
                    }
                    Err(e) => warn!(channel = %self.channel, "Resubscribe failed: {}", e),
                }
            };
        }
    }

    /// Deliver every message until the stream ends; returns the number delivered
    async fn fan_out(&self, stream: &mut MessageStream) -> usize {
        let mut delivered = 0;
        while let Some(payload) = stream.next().await {
            let message = match ProgressUpdateMessage::decode(&payload) {
                Ok(message) => message,
                Err(e) => {
                    warn!("Skipping progress update: {}", e);
                    continue;
                }
            };

            let Some(shared) = self.shared.upgrade() else {
                break;
            };
            let handlers: Vec<UpdateHandler> = shared.lock().handlers.values().cloned().collect();
            for handler in handlers {
                let challenge_id = message.challenge_id();
                if catch_unwind(AssertUnwindSafe(|| handler(challenge_id))).is_err() {
                    error!(challenge_id, "Progress update handler panicked");
                }
            }
            delivered += 1;
        }
        delivered
    }

    fn has_handlers(&self) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| !shared.lock().handlers.is_empty())
    }
}
