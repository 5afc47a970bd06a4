//! Challenge completion event

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One observed challenge completion submitted to the progress cache
///
/// `user_key` is a short opaque slot identifier (one per active user) and
/// `user_id` the stable identity it maps to. `occurred_at` is epoch
/// milliseconds; `None` means "stamp with the store's clock".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// Activity-tracking slot
    pub user_key: String,
    /// Stable user identity
    pub user_id: String,
    /// Challenge just completed
    pub challenge_id: String,
    /// Event time in epoch milliseconds
    pub occurred_at: Option<i64>,
}

impl CompletionEvent {
    /// Create an event stamped at record time
    pub fn new(
        user_key: impl Into<String>,
        user_id: impl Into<String>,
        challenge_id: impl Into<String>,
    ) -> Self {
        Self {
            user_key: user_key.into(),
            user_id: user_id.into(),
            challenge_id: challenge_id.into(),
            occurred_at: None,
        }
    }

    /// Set an explicit event time
    pub fn at(mut self, occurred_at: i64) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    /// Event time, falling back to `now`
    pub fn effective_time(&self, now: i64) -> i64 {
        self.occurred_at.unwrap_or(now)
    }

    /// Reject events that could not be keyed
    pub fn validate(&self) -> Result<()> {
        if self.user_key.trim().is_empty() {
            return Err(Error::invalid_argument("user key cannot be empty"));
        }
        if self.user_id.trim().is_empty() {
            return Err(Error::invalid_argument("user id cannot be empty"));
        }
        if self.challenge_id.trim().is_empty() {
            return Err(Error::invalid_argument("challenge id cannot be empty"));
        }
        Ok(())
    }
}
