//! Application use cases

/// Recent-progress cache read-modify-write and notifications
pub mod progress_cache;

pub use progress_cache::{
    DEFAULT_OPERATION_TIMEOUT, ProgressCacheSettings, ProgressCacheStore, RecordOutcome,
};
