//! In-memory store tests

use pairwise_providers::store::InMemoryProgressStore;
use pairwise_providers::{Error, ProgressStoreProvider};

#[tokio::test]
async fn test_get_set_and_counters() {
    let store = InMemoryProgressStore::new();

    assert_eq!(store.get("key").await.unwrap(), None);
    store.set("key", "value").await.unwrap();
    assert_eq!(store.get("key").await.unwrap().as_deref(), Some("value"));

    assert_eq!(store.read_count(), 2);
    assert_eq!(store.write_count(), 1);
    assert_eq!(store.provider_name(), "memory");
}

#[tokio::test]
async fn test_set_replaces_whole_value() {
    let store = InMemoryProgressStore::with_value("key", "old");
    store.set("key", "new").await.unwrap();
    assert_eq!(store.raw_value("key").as_deref(), Some("new"));
    assert_eq!(store.read_count(), 0);
}

#[tokio::test]
async fn test_offline_store_reports_unavailable() {
    let store = InMemoryProgressStore::new();
    store.set_available(false);

    assert!(matches!(
        store.get("key").await,
        Err(Error::CacheUnavailable { .. })
    ));
    assert!(matches!(
        store.set("key", "v").await,
        Err(Error::CacheUnavailable { .. })
    ));
    assert_eq!(store.write_count(), 0);

    store.set_available(true);
    assert!(store.set("key", "v").await.is_ok());
}
