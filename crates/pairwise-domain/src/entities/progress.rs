//! Recent-progress snapshot
//!
//! The single value the progress cache persists. All mutation goes through
//! [`ProgressCacheSnapshot::apply_completion`], which takes the previous
//! snapshot by value and returns the next one, so the read-modify-write
//! performed by the store stays a thin shell around a pure function.

use crate::value_objects::CompletionEvent;
use std::collections::{HashMap, HashSet};

/// Per-slot record of a user's recent challenge completions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    /// User identity owning this slot
    pub user: String,
    /// Epoch milliseconds of the most recent contributing event
    pub last_updated_at: i64,
    /// Challenges completed within the retention window
    pub challenge_ids: HashSet<String>,
}

impl ProgressEntry {
    /// Create an entry holding a single completion
    pub fn new(
        user: impl Into<String>,
        last_updated_at: i64,
        challenge_id: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            last_updated_at,
            challenge_ids: HashSet::from([challenge_id.into()]),
        }
    }

    /// Add a completion; returns false when the challenge was already present.
    ///
    /// `last_updated_at` never moves backwards on out-of-order events.
    pub fn record(&mut self, challenge_id: impl Into<String>, at: i64) -> bool {
        self.last_updated_at = self.last_updated_at.max(at);
        self.challenge_ids.insert(challenge_id.into())
    }

    /// Whether the entry falls outside the retention window at `now`
    pub fn is_stale(&self, now: i64, retention_ms: i64) -> bool {
        now.saturating_sub(self.last_updated_at) > retention_ms
    }
}

/// Outcome of applying one completion event to a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCompletion {
    /// The snapshot to persist
    pub snapshot: ProgressCacheSnapshot,
    /// Whether the event created a new slot
    pub created_entry: bool,
    /// Whether the challenge id was new for its slot
    pub challenge_added: bool,
    /// Number of stale entries dropped
    pub pruned: usize,
}

/// Bounded, time-windowed map of recent completion activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressCacheSnapshot {
    /// Epoch milliseconds of the last rebuild
    pub time: i64,
    /// All-time observed completions; never decremented by pruning
    pub total_challenges_count: u64,
    /// Slot key to user identity
    pub user_id_index: HashMap<String, String>,
    /// Slot key to entry
    pub entries: HashMap<String, ProgressEntry>,
}

impl ProgressCacheSnapshot {
    /// Empty snapshot stamped at `now`
    pub fn new(now: i64) -> Self {
        Self {
            time: now,
            total_challenges_count: 0,
            user_id_index: HashMap::new(),
            entries: HashMap::new(),
        }
    }

    /// Apply one completion: upsert the slot, bump the counter, prune, restamp.
    ///
    /// The counter grows on every call, including repeats of a challenge the
    /// slot already holds; it measures event volume rather than set size.
    pub fn apply_completion(
        mut self,
        event: &CompletionEvent,
        now: i64,
        retention_ms: i64,
    ) -> AppliedCompletion {
        let occurred_at = event.effective_time(now);

        let (created_entry, challenge_added) = match self.entries.get_mut(&event.user_key) {
            Some(entry) => (false, entry.record(event.challenge_id.as_str(), occurred_at)),
            None => {
                self.entries.insert(
                    event.user_key.clone(),
                    ProgressEntry::new(
                        event.user_id.as_str(),
                        occurred_at,
                        event.challenge_id.as_str(),
                    ),
                );
                self.user_id_index
                    .insert(event.user_key.clone(), event.user_id.clone());
                (true, true)
            }
        };

        self.total_challenges_count = self.total_challenges_count.saturating_add(1);
        let pruned = self.prune(now, retention_ms);
        self.time = now;

        AppliedCompletion {
            snapshot: self,
            created_entry,
            challenge_added,
            pruned,
        }
    }

    /// Drop every entry older than the retention window along with its index key.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self, now: i64, retention_ms: i64) -> usize {
        let stale: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_stale(now, retention_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            self.entries.remove(key);
            self.user_id_index.remove(key);
        }
        stale.len()
    }

    /// Restore the index from the entries: add missing keys, drop dangling ones.
    ///
    /// Returns the number of index keys changed.
    pub fn reconcile_index(&mut self) -> usize {
        let before = self.user_id_index.len();
        self.user_id_index
            .retain(|key, _| self.entries.contains_key(key));
        let mut changed = before - self.user_id_index.len();

        for (key, entry) in &self.entries {
            if !self.user_id_index.contains_key(key) {
                self.user_id_index.insert(key.clone(), entry.user.clone());
                changed += 1;
            }
        }
        changed
    }

    /// Every entry resolvable through the index, and nothing else in it
    pub fn is_consistent(&self) -> bool {
        self.entries.len() == self.user_id_index.len()
            && self
                .entries
                .keys()
                .all(|key| self.user_id_index.contains_key(key))
    }

    /// User identity behind a slot key
    pub fn user_for_key(&self, user_key: &str) -> Option<&str> {
        self.user_id_index.get(user_key).map(String::as_str)
    }

    /// Entries ordered newest first, for activity feeds
    pub fn recent_entries(&self) -> Vec<(&str, &ProgressEntry)> {
        let mut entries: Vec<(&str, &ProgressEntry)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        entries.sort_by(|(a_key, a), (b_key, b)| {
            b.last_updated_at
                .cmp(&a.last_updated_at)
                .then_with(|| a_key.cmp(b_key))
        });
        entries
    }
}
