//! Unit tests for the progress update envelope

use pairwise_domain::ProgressUpdateMessage;
use serde_json::json;

#[test]
fn test_message_shape() {
    let message = ProgressUpdateMessage::new("chal-9");
    let value: serde_json::Value = serde_json::from_str(&message.encode().unwrap()).unwrap();
    assert_eq!(value, json!({ "data": { "challengeId": "chal-9" } }));
}

#[test]
fn test_decode_ignores_unknown_fields() {
    let message =
        ProgressUpdateMessage::decode(r#"{"data":{"challengeId":"c1","extra":1},"v":2}"#).unwrap();
    assert_eq!(message.challenge_id(), "c1");
}

#[test]
fn test_decode_rejects_missing_challenge() {
    assert!(ProgressUpdateMessage::decode(r#"{"data":{}}"#).is_err());
    assert!(ProgressUpdateMessage::decode("not json").is_err());
}
