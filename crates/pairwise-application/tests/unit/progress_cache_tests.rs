//! Progress cache use case tests

use async_trait::async_trait;
use pairwise_application::{ProgressCacheSettings, ProgressCacheStore};
use pairwise_domain::constants::{ONE_DAY_MS, PROGRESS_CACHE_KEY};
use pairwise_domain::error::{Error, Result};
use pairwise_domain::ports::ProgressStoreProvider;
use pairwise_domain::value_objects::{decode_snapshot, encode_snapshot};
use pairwise_domain::{CompletionEvent, ProgressCacheSnapshot, ProgressEntry};
use pairwise_providers::ManualClock;
use pairwise_providers::pubsub::InMemoryPubSubProvider;
use pairwise_providers::store::InMemoryProgressStore;
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

const T0: i64 = 1_700_000_000_000;

struct Fixture {
    store: Arc<InMemoryProgressStore>,
    pubsub: Arc<InMemoryPubSubProvider>,
    clock: Arc<ManualClock>,
    cache: ProgressCacheStore,
}

fn fixture_with_store(store: InMemoryProgressStore) -> Fixture {
    let store = Arc::new(store);
    let pubsub = Arc::new(InMemoryPubSubProvider::new());
    let clock = Arc::new(ManualClock::new(T0));
    let cache = ProgressCacheStore::new(
        store.clone(),
        pubsub.clone(),
        clock.clone(),
        ProgressCacheSettings::default(),
    );
    Fixture {
        store,
        pubsub,
        clock,
        cache,
    }
}

fn fixture() -> Fixture {
    fixture_with_store(InMemoryProgressStore::new())
}

fn stored_snapshot(store: &InMemoryProgressStore) -> ProgressCacheSnapshot {
    let raw = store
        .raw_value(PROGRESS_CACHE_KEY)
        .expect("snapshot should be stored");
    decode_snapshot(&raw).unwrap()
}

fn ids(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[tokio::test]
async fn test_get_snapshot_initializes_once() {
    let f = fixture();

    let first = f.cache.get_snapshot().await.unwrap();
    f.clock.advance(1_000);
    let second = f.cache.get_snapshot().await.unwrap();

    assert_eq!(first.total_challenges_count, 0);
    assert!(first.entries.is_empty());
    assert!(first.user_id_index.is_empty());
    assert_eq!(first, second);
    assert_eq!(second.time, T0);
    assert_eq!(f.store.write_count(), 1);
}

#[tokio::test]
async fn test_malformed_snapshot_is_replaced() {
    let f = fixture_with_store(InMemoryProgressStore::with_value(
        PROGRESS_CACHE_KEY,
        "{\"time\": \"yesterday\"",
    ));

    let snapshot = f.cache.get_snapshot().await.unwrap();

    assert_eq!(snapshot, ProgressCacheSnapshot::new(T0));
    assert_eq!(stored_snapshot(&f.store), snapshot);
    assert_eq!(f.store.write_count(), 1);
}

#[tokio::test]
async fn test_events_accumulate() {
    let f = fixture();
    f.clock.set(T0 + 1);

    f.cache
        .record_completion_event("k1", "user-A", "chal-1", Some(T0))
        .await;
    f.cache
        .record_completion_event("k1", "user-A", "chal-2", Some(T0 + 1))
        .await;

    let snapshot = f.cache.get_snapshot().await.unwrap();
    assert_eq!(snapshot.entries.len(), 1);
    let entry = &snapshot.entries["k1"];
    assert_eq!(entry.challenge_ids, ids(&["chal-1", "chal-2"]));
    assert_eq!(entry.last_updated_at, T0 + 1);
    assert_eq!(snapshot.total_challenges_count, 2);
    assert_eq!(snapshot.user_for_key("k1"), Some("user-A"));
}

#[tokio::test]
async fn test_duplicate_challenge_increments_counter() {
    let f = fixture();
    for (challenge, at) in [("chal-1", T0), ("chal-2", T0 + 1), ("chal-1", T0 + 2)] {
        f.cache
            .try_record_completion(CompletionEvent::new("k1", "user-A", challenge).at(at))
            .await
            .unwrap();
    }

    let snapshot = stored_snapshot(&f.store);
    assert_eq!(snapshot.entries["k1"].challenge_ids, ids(&["chal-1", "chal-2"]));
    assert_eq!(snapshot.total_challenges_count, 3);
}

#[tokio::test]
async fn test_occurred_at_defaults_to_clock() {
    let f = fixture();
    f.clock.set(T0 + 42);

    f.cache
        .record_completion_event("k1", "user-A", "chal-1", None)
        .await;

    assert_eq!(stored_snapshot(&f.store).entries["k1"].last_updated_at, T0 + 42);
}

#[tokio::test]
async fn test_pruning_on_write() {
    let now = T0 + 5 * ONE_DAY_MS;
    let mut seeded = ProgressCacheSnapshot::new(T0);
    for (key, age) in [("stale", ONE_DAY_MS + 1), ("fresh", ONE_DAY_MS - 1)] {
        seeded
            .entries
            .insert(key.to_string(), ProgressEntry::new(key, now - age, "old-chal"));
        seeded.user_id_index.insert(key.to_string(), key.to_string());
    }
    seeded.total_challenges_count = 10;

    let f = fixture_with_store(InMemoryProgressStore::with_value(
        PROGRESS_CACHE_KEY,
        &encode_snapshot(&seeded).unwrap(),
    ));
    f.clock.set(now);

    let outcome = f
        .cache
        .try_record_completion(CompletionEvent::new("k1", "user-A", "chal-1"))
        .await
        .unwrap();

    assert_eq!(outcome.pruned, 1);
    assert_eq!(outcome.entries, 2);
    assert_eq!(outcome.total_challenges_count, 11);
    assert!(outcome.created_entry);

    let snapshot = stored_snapshot(&f.store);
    assert!(!snapshot.entries.contains_key("stale"));
    assert!(!snapshot.user_id_index.contains_key("stale"));
    assert!(snapshot.entries.contains_key("fresh"));
    assert!(snapshot.user_id_index.contains_key("fresh"));
    assert_eq!(snapshot.time, now);
    assert!(snapshot.is_consistent());
}

#[tokio::test]
async fn test_publish_per_write_reaches_subscriber() {
    let f = fixture();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _subscription = f
        .cache
        .subscribe_to_updates(move |challenge_id: &str| {
            let _ = tx.send(challenge_id.to_string());
        })
        .await
        .unwrap();

    f.cache
        .record_completion_event("k1", "user-A", "chal-1", None)
        .await;
    f.cache
        .record_completion_event("k2", "user-B", "chal-2", None)
        .await;

    let wait = Duration::from_secs(1);
    assert_eq!(
        tokio::time::timeout(wait, rx.recv()).await.unwrap().as_deref(),
        Some("chal-1")
    );
    assert_eq!(
        tokio::time::timeout(wait, rx.recv()).await.unwrap().as_deref(),
        Some("chal-2")
    );
    assert!(
        tokio::time::timeout(Duration::from_millis(50), rx.recv())
            .await
            .is_err()
    );
    assert_eq!(f.pubsub.publish_count(), 2);
}

#[tokio::test]
async fn test_unavailable_store_degrades() {
    let f = fixture();
    f.store.set_available(false);

    f.cache
        .record_completion_event("k1", "user-A", "chal-1", None)
        .await;
    assert!(f.cache.snapshot_if_available().await.is_none());

    let err = f
        .cache
        .try_record_completion(CompletionEvent::new("k1", "user-A", "chal-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::CacheUnavailable { .. }));
    assert_eq!(f.pubsub.publish_count(), 0);
}

#[tokio::test]
async fn test_publish_failure_keeps_write() {
    let f = fixture();
    f.pubsub.set_publish_enabled(false);

    let err = f
        .cache
        .try_record_completion(CompletionEvent::new("k1", "user-A", "chal-1"))
        .await
        .unwrap_err();
    assert!(err.is_publish_failure());
    assert_eq!(stored_snapshot(&f.store).total_challenges_count, 1);

    f.cache
        .record_completion_event("k1", "user-A", "chal-2", None)
        .await;
    assert_eq!(stored_snapshot(&f.store).total_challenges_count, 2);
}

#[tokio::test]
async fn test_invalid_event_is_rejected_before_io() {
    let f = fixture();

    let err = f
        .cache
        .try_record_completion(CompletionEvent::new("k1", "user-A", " "))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(f.store.read_count(), 0);
    assert_eq!(f.store.write_count(), 0);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_rejected_event_is_logged_as_warning() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);
    let f = fixture();

    f.cache
        .record_completion_event("k1", "user-A", "", None)
        .await;

    let output = logs.contents();
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("Progress event rejected"), "{output}");
    assert!(!output.contains("ERROR"), "{output}");
    assert_eq!(f.store.write_count(), 0);
}

#[derive(Debug)]
struct StalledStore;

#[async_trait]
impl ProgressStoreProvider for StalledStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "stalled"
    }
}

#[tokio::test]
async fn test_operation_timeout_maps_to_unavailable() {
    let settings = ProgressCacheSettings {
        operation_timeout: Some(Duration::from_millis(20)),
        ..ProgressCacheSettings::default()
    };
    let cache = ProgressCacheStore::new(
        Arc::new(StalledStore),
        Arc::new(InMemoryPubSubProvider::new()),
        Arc::new(ManualClock::new(T0)),
        settings,
    );

    match cache.get_snapshot().await {
        Err(Error::CacheUnavailable { message, .. }) => assert!(message.contains("timed out")),
        other => panic!("Expected CacheUnavailable, got {other:?}"),
    }
}
