//! # Pairwise Recent-Progress Cache - Provider Implementations
//!
//! Concrete adapters for the ports defined in `pairwise-domain`.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Store | `ProgressStoreProvider` | Redis, InMemory |
//! | Pub/Sub | `PubSubProvider` | Redis, InMemory, Null |
//! | Clock | `ClockProvider` | System, Manual |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! pairwise-providers = { version = "0.1", default-features = false }
//! ```
//!
//! drops the Redis client and leaves only the in-process providers.

pub use pairwise_domain::error::{Error, Result};
pub use pairwise_domain::ports::{ClockProvider, PubSubProvider, ProgressStoreProvider};

/// Clock implementations
pub mod clock;
/// Provider-specific constants
pub mod constants;
/// Pub/sub transport implementations
pub mod pubsub;
/// Key-value store implementations
pub mod store;

pub use clock::{ManualClock, SystemClock};
