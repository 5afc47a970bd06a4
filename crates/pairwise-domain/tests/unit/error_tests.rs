//! Unit tests for domain error types

use pairwise_domain::Error;

#[test]
fn test_cache_unavailable_error() {
    let error = Error::cache_unavailable("connection refused");
    assert!(error.is_degradable());
    assert!(!error.is_publish_failure());
    assert!(!error.is_rejected_input());
    assert!(error.to_string().contains("connection refused"));
}

#[test]
fn test_deserialization_error_is_degradable() {
    let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
    let error = Error::deserialization_with_source("bad shape", json_err);
    assert!(error.is_degradable());
    assert!(!error.is_rejected_input());
    match error {
        Error::Deserialization { message, source } => {
            assert_eq!(message, "bad shape");
            assert!(source.is_some());
        }
        _ => panic!("Expected Deserialization error"),
    }
}

#[test]
fn test_publish_error_carries_channel() {
    let io = std::io::Error::other("broken pipe");
    let error = Error::publish_with_source("updates", "send failed", io);
    assert!(error.is_publish_failure());
    assert!(!error.is_degradable());

    let display = error.to_string();
    assert!(display.contains("updates"));
    assert!(display.contains("send failed"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_err.into();
    assert!(matches!(error, Error::Json { .. }));
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("retention must be positive");
    match error {
        Error::Configuration { message, .. } => assert_eq!(message, "retention must be positive"),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_invalid_argument_is_rejected_input() {
    let error = Error::invalid_argument("challenge id cannot be empty");
    assert!(error.is_rejected_input());
    assert!(!error.is_degradable());
    assert!(!error.is_publish_failure());
}
