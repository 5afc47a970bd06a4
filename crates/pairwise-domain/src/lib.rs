//! # Pairwise Recent-Progress Cache - Domain Layer
//!
//! Types and rules for the shared "recent challenge activity" snapshot:
//! the snapshot itself, the completion event that mutates it, the pruning
//! window, the JSON wire format, and the ports the application layer
//! drives.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`entities`] | `ProgressCacheSnapshot`, `ProgressEntry` |
//! | [`value_objects`] | `CompletionEvent`, wire encode/decode |
//! | [`events`] | `ProgressUpdateMessage` broadcast envelope |
//! | [`ports`] | store, pub/sub and clock traits |
//! | [`error`] | error taxonomy and `Result` alias |

/// Domain constants
pub mod constants;
/// Domain entities
pub mod entities;
/// Error handling types
pub mod error;
/// Broadcast messages
pub mod events;
/// Port traits
pub mod ports;
/// Value objects
pub mod value_objects;

pub use entities::{AppliedCompletion, ProgressCacheSnapshot, ProgressEntry};
pub use error::{Error, Result};
pub use events::ProgressUpdateMessage;
pub use value_objects::CompletionEvent;
