//! Domain entities

mod progress;

pub use progress::{AppliedCompletion, ProgressCacheSnapshot, ProgressEntry};
