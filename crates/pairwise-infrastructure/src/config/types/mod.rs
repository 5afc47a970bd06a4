//! Configuration types

pub mod app;
pub mod logging;
pub mod progress_cache;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use progress_cache::{ProgressCacheConfig, PubSubProviderKind, StoreProvider};
