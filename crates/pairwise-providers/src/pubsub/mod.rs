//! Pub/Sub Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullPubSubProvider`] | Disabled | Discards publishes, silent subscriptions |
//! | [`InMemoryPubSubProvider`] | In-Process | Tokio broadcast channels |
//! | [`RedisPubSubProvider`] | Distributed | Redis `PUBLISH`/`SUBSCRIBE` across processes |

pub mod memory;
pub mod null;
#[cfg(feature = "pubsub-redis")]
pub mod redis;

pub use memory::InMemoryPubSubProvider;
pub use null::NullPubSubProvider;
#[cfg(feature = "pubsub-redis")]
pub use redis::RedisPubSubProvider;
