//! Null pub/sub tests

use futures::StreamExt;
use pairwise_providers::PubSubProvider;
use pairwise_providers::pubsub::NullPubSubProvider;
use std::time::Duration;

#[tokio::test]
async fn test_null_provider_is_silent() {
    let transport = NullPubSubProvider::new();
    let mut stream = transport.subscribe("updates").await.unwrap();

    transport.publish("updates", "ignored").await.unwrap();

    let received = tokio::time::timeout(Duration::from_millis(20), stream.next()).await;
    assert!(received.is_err());
    assert_eq!(transport.provider_name(), "null");
}
