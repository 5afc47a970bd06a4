//! Configuration management
//!
//! Layered loading with Figment: defaults, then a TOML file, then
//! `PAIRWISE_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::{AppConfig, LoggingConfig, ProgressCacheConfig, PubSubProviderKind, StoreProvider};
