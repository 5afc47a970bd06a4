//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by infrastructure-facing variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the recent-progress cache
#[derive(Error, Debug)]
pub enum Error {
    /// The shared store could not be reached or an operation against it failed
    #[error("Cache unavailable: {message}")]
    CacheUnavailable {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The stored value exists but is not a valid snapshot
    #[error("Snapshot deserialization failed: {message}")]
    Deserialization {
        /// Description of the mismatch
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The snapshot was written but the update notification was not published
    #[error("Publish failed on channel '{channel}': {message}")]
    Publish {
        /// Channel the notification was destined for
        channel: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// JSON serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Cache error creation methods
impl Error {
    /// Create a cache unavailable error
    pub fn cache_unavailable<S: Into<String>>(message: S) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a cache unavailable error with source
    pub fn cache_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a deserialization error with source
    pub fn deserialization_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Deserialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a publish error
    pub fn publish<C: Into<String>, S: Into<String>>(channel: C, message: S) -> Self {
        Self::Publish {
            channel: channel.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a publish error with source
    pub fn publish_with_source<
        C: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        channel: C,
        message: S,
        source: E,
    ) -> Self {
        Self::Publish {
            channel: channel.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and argument error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether the error means the shared store is out of reach for this request.
    ///
    /// Deserialization failures are degraded the same way, since the snapshot
    /// is always rewritten in full on the next successful write.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Self::CacheUnavailable { .. } | Self::Deserialization { .. } | Self::Json { .. }
        )
    }

    /// Whether the snapshot write landed and only the notification was lost
    pub fn is_publish_failure(&self) -> bool {
        matches!(self, Self::Publish { .. })
    }

    /// Whether the caller's input was refused before touching the store
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
