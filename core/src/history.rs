//! Per-user chord history.
//!
//! Every translated chord is recorded against the user who typed it so the
//! suggestion side can look at what a user actually produced. Records are
//! created on first reference to a user id.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::resolver::Resolution;

/// One translated chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Input exactly as typed
    pub raw: String,
    /// Canonical chord derived from `raw`
    pub normalized: String,
    /// Character the resolver produced
    pub character: char,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Entry stamped with the current time.
    pub fn new(raw: &str, normalized: &str, character: char) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            raw: raw.to_string(),
            normalized: normalized.to_string(),
            character,
            timestamp,
        }
    }

    pub fn from_resolution(raw: &str, normalized: &str, resolution: &Resolution) -> Self {
        Self::new(raw, normalized, resolution.character)
    }
}

/// Thread-safe, cloneable per-user history store.
///
/// Clones share the same underlying data. With `limit` set, only the most
/// recent `limit` entries per user are kept; without it history grows
/// unbounded.
#[derive(Clone, Debug, Default)]
pub struct UserHistory {
    inner: Arc<RwLock<HashMap<String, Vec<HistoryEntry>>>>,
    limit: Option<usize>,
}

impl UserHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            inner: Arc::default(),
            limit,
        }
    }

    /// Append an entry to `user`'s history.
    pub fn record(&self, user: &str, entry: HistoryEntry) {
        if let Ok(mut map) = self.inner.write() {
            let entries = map.entry(user.to_string()).or_default();
            entries.push(entry);
            if let Some(limit) = self.limit {
                if entries.len() > limit {
                    let excess = entries.len() - limit;
                    entries.drain(..excess);
                }
            }
        }
    }

    /// Snapshot of `user`'s history, oldest first. Empty for unknown users.
    pub fn entries(&self, user: &str) -> Vec<HistoryEntry> {
        match self.inner.read() {
            Ok(map) => map.get(user).cloned().unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self, user: &str) -> usize {
        match self.inner.read() {
            Ok(map) => map.get(user).map_or(0, Vec::len),
            Err(_) => 0,
        }
    }

    /// Known user ids, sorted.
    pub fn users(&self) -> Vec<String> {
        let mut users: Vec<String> = match self.inner.read() {
            Ok(map) => map.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        users.sort();
        users
    }

    pub fn clear(&self, user: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(user);
        }
    }

    /// Export one user's history as JSON.
    pub fn to_json(&self, user: &str) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries(user))
    }
}
