//! In-memory progress store
//!
//! Process-local key-value store. Counts reads and writes and can be
//! switched offline so callers can observe initialization and outage paths.

use async_trait::async_trait;
use dashmap::DashMap;
use pairwise_domain::error::{Error, Result};
use pairwise_domain::ports::ProgressStoreProvider;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

/// DashMap-backed store
#[derive(Debug)]
pub struct InMemoryProgressStore {
    values: DashMap<String, String>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    available: AtomicBool,
}

impl Default for InMemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProgressStore {
    /// Create an empty, reachable store
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Create a store pre-loaded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `get` calls served
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `set` calls accepted
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Simulate the backend going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Peek at a stored value without counting a read
    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|value| value.clone())
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::cache_unavailable("in-memory store is offline"))
        }
    }
}

#[async_trait]
impl ProgressStoreProvider for InMemoryProgressStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let value = self.values.get(key).map(|value| value.clone());
        debug!(key, hit = value.is_some(), "In-memory store GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values.insert(key.to_string(), value.to_string());
        debug!(key, bytes = value.len(), "In-memory store SET");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
