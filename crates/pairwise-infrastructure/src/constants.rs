//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Snapshot key, channel and retention defaults live in
//! `pairwise_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pairwise.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "pairwise";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PAIRWISE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "PAIRWISE_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "pairwise";

// ============================================================================
// PROGRESS CACHE CONSTANTS
// ============================================================================

/// Default bound on each store/transport call, in milliseconds
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 5_000;
