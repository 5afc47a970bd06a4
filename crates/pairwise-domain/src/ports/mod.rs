//! Domain Port Interfaces
//!
//! Boundary contracts the progress cache depends on. Implementations live
//! in `pairwise-providers`.
//!
//! ## Organization
//!
//! - **store** - shared key-value storage for the snapshot
//! - **pubsub** - broadcast transport for update notifications
//! - **clock** - wall-clock time source

/// Wall-clock time source
pub mod clock;
/// Broadcast transport port
pub mod pubsub;
/// Shared key-value store port
pub mod store;

pub use clock::ClockProvider;
pub use pubsub::{MessageStream, PubSubProvider};
pub use store::ProgressStoreProvider;
