//! Domain events broadcast between processes sharing the progress cache

mod progress_update;

pub use progress_update::{ProgressUpdateData, ProgressUpdateMessage};
