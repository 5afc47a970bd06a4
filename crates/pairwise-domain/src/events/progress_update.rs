//! Progress update broadcast message
//!
//! Shape shared by every publisher and subscriber on the updates channel:
//! `{ "data": { "challengeId": "..." } }`. There is no version field, so
//! unknown fields are ignored on decode to leave room for additions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Payload of a progress update notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateData {
    /// Challenge that was just recorded
    pub challenge_id: String,
}

/// Envelope published on the updates channel after each snapshot write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdateMessage {
    /// Message body
    pub data: ProgressUpdateData,
}

impl ProgressUpdateMessage {
    /// Build a notification for a recorded challenge
    pub fn new(challenge_id: impl Into<String>) -> Self {
        Self {
            data: ProgressUpdateData {
                challenge_id: challenge_id.into(),
            },
        }
    }

    /// Challenge carried by the message
    pub fn challenge_id(&self) -> &str {
        &self.data.challenge_id
    }

    /// Serialize for the transport
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a payload received from the transport
    pub fn decode(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| {
            Error::deserialization_with_source("malformed progress update message", e)
        })
    }
}
