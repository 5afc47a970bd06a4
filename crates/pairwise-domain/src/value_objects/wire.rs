//! Snapshot wire format
//!
//! The shared store only speaks text, so sets travel as arrays and the
//! index as `[key, userId]` pairs:
//!
//! ```json
//! {
//!   "time": 1700000000000,
//!   "totalChallengesCount": 3,
//!   "userIdIndex": [["k1", "user-A"]],
//!   "entries": {
//!     "k1": { "user": "user-A", "lastUpdatedAt": 1700000000000, "challengeIds": ["chal-1"] }
//!   }
//! }
//! ```

use crate::entities::{ProgressCacheSnapshot, ProgressEntry};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Serialized form of [`ProgressEntry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWire {
    /// User identity
    pub user: String,
    /// Epoch milliseconds
    pub last_updated_at: i64,
    /// Challenge ids, sorted on encode
    pub challenge_ids: Vec<String>,
}

/// Serialized form of [`ProgressCacheSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotWire {
    /// Epoch milliseconds of the last rebuild
    pub time: i64,
    /// All-time observed completions
    pub total_challenges_count: u64,
    /// `[key, userId]` pairs
    pub user_id_index: Vec<(String, String)>,
    /// Entries keyed by slot
    pub entries: BTreeMap<String, EntryWire>,
}

impl From<&ProgressCacheSnapshot> for SnapshotWire {
    fn from(snapshot: &ProgressCacheSnapshot) -> Self {
        let mut user_id_index: Vec<(String, String)> = snapshot
            .user_id_index
            .iter()
            .map(|(key, user)| (key.clone(), user.clone()))
            .collect();
        user_id_index.sort();

        let entries = snapshot
            .entries
            .iter()
            .map(|(key, entry)| {
                let mut challenge_ids: Vec<String> = entry.challenge_ids.iter().cloned().collect();
                challenge_ids.sort();
                (
                    key.clone(),
                    EntryWire {
                        user: entry.user.clone(),
                        last_updated_at: entry.last_updated_at,
                        challenge_ids,
                    },
                )
            })
            .collect();

        Self {
            time: snapshot.time,
            total_challenges_count: snapshot.total_challenges_count,
            user_id_index,
            entries,
        }
    }
}

impl From<SnapshotWire> for ProgressCacheSnapshot {
    fn from(wire: SnapshotWire) -> Self {
        let entries: HashMap<String, ProgressEntry> = wire
            .entries
            .into_iter()
            .map(|(key, entry)| {
                (
                    key,
                    ProgressEntry {
                        user: entry.user,
                        last_updated_at: entry.last_updated_at,
                        challenge_ids: entry.challenge_ids.into_iter().collect(),
                    },
                )
            })
            .collect();

        let mut snapshot = Self {
            time: wire.time,
            total_challenges_count: wire.total_challenges_count,
            user_id_index: wire.user_id_index.into_iter().collect(),
            entries,
        };
        snapshot.reconcile_index();
        snapshot
    }
}

/// Serialize a snapshot to its stored JSON text
pub fn encode_snapshot(snapshot: &ProgressCacheSnapshot) -> Result<String> {
    Ok(serde_json::to_string(&SnapshotWire::from(snapshot))?)
}

/// Parse and validate stored JSON text into a snapshot
pub fn decode_snapshot(raw: &str) -> Result<ProgressCacheSnapshot> {
    let wire: SnapshotWire = serde_json::from_str(raw).map_err(|e| {
        Error::deserialization_with_source("stored snapshot does not match the expected shape", e)
    })?;
    Ok(wire.into())
}
