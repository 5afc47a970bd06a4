//! Domain layer constants
//!
//! Values shared by every process that reads or writes the recent-progress
//! snapshot. Changing any of them splits the fleet into incompatible groups.

// ============================================================================
// STORAGE CONSTANTS
// ============================================================================

/// Fixed key holding the JSON-serialized snapshot
pub const PROGRESS_CACHE_KEY: &str = "pairwise:recent-progress";

/// Broadcast channel carrying `{ data: { challengeId } }` notifications
pub const PROGRESS_UPDATES_CHANNEL: &str = "pairwise:progress-updates";

// ============================================================================
// RETENTION CONSTANTS
// ============================================================================

/// One day in milliseconds
pub const ONE_DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Entries older than this (relative to write time) are pruned
pub const DEFAULT_RETENTION_MS: i64 = ONE_DAY_MS;
