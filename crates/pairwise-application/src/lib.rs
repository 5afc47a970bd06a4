//! # Pairwise Recent-Progress Cache - Application Layer
//!
//! Orchestrates the domain rules over the store, pub/sub and clock ports.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`ProgressCacheStore`] | `get_snapshot`, `record_completion_event`, `subscribe_to_updates` |
//! | [`UpdateSubscriptionManager`] | one transport subscription fanned out to many handlers |
//!
//! ## Usage
//!
//! ```ignore
//! use pairwise_application::{ProgressCacheSettings, ProgressCacheStore};
//!
//! let cache = ProgressCacheStore::new(store, pubsub, clock, ProgressCacheSettings::default());
//! let _subscription = cache
//!     .subscribe_to_updates(|challenge_id| println!("completed {challenge_id}"))
//!     .await?;
//! cache.record_completion_event("k1", "user-A", "chal-1", None).await;
//! ```

/// Application services
pub mod services;
/// Use cases
pub mod use_cases;

pub use services::{UpdateHandler, UpdateSubscription, UpdateSubscriptionManager};
pub use use_cases::{
    DEFAULT_OPERATION_TIMEOUT, ProgressCacheSettings, ProgressCacheStore, RecordOutcome,
};
