//! Unit tests for completion events

use pairwise_domain::{CompletionEvent, Error};

#[test]
fn test_effective_time_falls_back_to_now() {
    let event = CompletionEvent::new("k1", "user-A", "chal-1");
    assert_eq!(event.effective_time(42), 42);

    let event = event.at(7);
    assert_eq!(event.effective_time(42), 7);
}

#[test]
fn test_validate_rejects_blank_fields() {
    assert!(CompletionEvent::new("k1", "user-A", "chal-1").validate().is_ok());

    for event in [
        CompletionEvent::new("", "user-A", "chal-1"),
        CompletionEvent::new(" ", "user-A", "chal-1"),
        CompletionEvent::new("k1", "", "chal-1"),
        CompletionEvent::new("k1", "  ", "chal-1"),
        CompletionEvent::new("k1", "user-A", ""),
        CompletionEvent::new("k1", "user-A", "\t"),
    ] {
        match event.validate() {
            Err(Error::InvalidArgument { .. }) => {}
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }
}
