//! Main application configuration

use super::logging::LoggingConfig;
use super::progress_cache::ProgressCacheConfig;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Progress cache configuration
    #[serde(default)]
    pub progress_cache: ProgressCacheConfig,
}
