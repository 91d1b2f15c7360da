//! Ordered listener-count snapshots.
//!
//! A snapshot holds the outcome of one polling round: every origin that
//! returned a usable count, ordered ascending by that count. Origins that
//! failed or reported no mountpoints are absent — absence means "unknown",
//! never "zero listeners".

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Listener count for a single origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginLoad {
    pub origin: String,
    pub listeners: u64,
}

/// Aggregated listener counts for one polling round.
///
/// Iteration order is ascending by listener count; equal counts keep the
/// relative order of the configured pool, so identical outcomes always
/// produce identical ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: Vec<OriginLoad>,
}

impl StatusSnapshot {
    /// Build a snapshot from per-origin counts listed in pool order.
    ///
    /// The sort is stable, which is what gives equal counts their
    /// pool-order tie-break.
    pub fn from_pool_counts(counts: Vec<OriginLoad>) -> Self {
        let mut entries = counts;
        entries.sort_by_key(|entry| entry.listeners);
        Self { entries }
    }

    /// The origin with the fewest listeners, if any origin responded.
    pub fn least_loaded(&self) -> Option<&OriginLoad> {
        self.entries.first()
    }

    /// True when no origin in the pool was reachable this round.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OriginLoad> {
        self.entries.iter()
    }
}

/// Serializes as a JSON object whose key order is the snapshot's
/// ascending-count order.
impl Serialize for StatusSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.origin, &entry.listeners)?;
        }
        map.end()
    }
}
