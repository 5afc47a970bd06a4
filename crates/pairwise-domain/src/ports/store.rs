//! Progress Store Port
//!
//! Contract for the shared key-value store holding the serialized snapshot.
//! Only whole-value get and set are required; the snapshot is always
//! replaced wholesale, never patched field by field.

use crate::error::Result;
use async_trait::async_trait;

/// Shared text key-value store
///
/// # Implementations
///
/// - **Redis**: shared across every server process
/// - **In-memory**: single process, and the fake used by tests
///
/// Failures to reach the backend must surface as
/// [`Error::CacheUnavailable`](crate::error::Error::CacheUnavailable).
#[async_trait]
pub trait ProgressStoreProvider: Send + Sync + std::fmt::Debug {
    /// Read the value under `key`, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
