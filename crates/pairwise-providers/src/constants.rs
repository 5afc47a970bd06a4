//! Provider-specific constants

/// Redis URL used when none is configured
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Buffer per channel for the in-memory broadcast transport
pub const DEFAULT_PUBSUB_CAPACITY: usize = 1024;
