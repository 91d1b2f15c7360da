//! Typed model of Icecast's `status-json.xsl` document.
//!
//! The `source` field is shape-polymorphic upstream: one mountpoint
//! serializes as a single object, several as an array of objects. The
//! untagged enum resolves that once during deserialization so extraction
//! reduces to a plain sum.

use serde::Deserialize;

/// Top-level status document served by an origin at `/status-json.xsl`.
#[derive(Debug, Deserialize)]
pub struct IcecastStatus {
    pub icestats: Icestats,
}

/// The `icestats` envelope.
#[derive(Debug, Deserialize)]
pub struct Icestats {
    /// Absent when the origin currently serves no mountpoints.
    #[serde(default)]
    pub source: Option<Mounts>,
}

/// One or many mountpoints.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Mounts {
    Single(Mountpoint),
    Many(Vec<Mountpoint>),
}

/// Per-mountpoint counters. Icecast reports much more per mountpoint; only
/// the listener count matters for balancing.
#[derive(Debug, Deserialize)]
pub struct Mountpoint {
    pub listeners: u64,
}

impl IcecastStatus {
    /// Total listeners across all mountpoints, or `None` when the origin
    /// serves none.
    pub fn listener_total(&self) -> Option<u64> {
        self.icestats.source.as_ref().map(Mounts::total)
    }
}

impl Mounts {
    fn total(&self) -> u64 {
        match self {
            Mounts::Single(mount) => mount.listeners,
            Mounts::Many(mounts) => mounts.iter().map(|m| m.listeners).sum(),
        }
    }
}
