//! icesteer-core — domain types for IceSteer.
//!
//! Pure logic with no I/O: the balancer configuration and its validation,
//! the typed model of Icecast's `status-json.xsl` document, ordered
//! listener-count snapshots, and the error kinds shared across the
//! balancer.

pub mod config;
pub mod error;
pub mod snapshot;
pub mod status;

pub use config::BalancerConfig;
pub use error::{ConfigError, PollError};
pub use snapshot::{OriginLoad, StatusSnapshot};
pub use status::IcecastStatus;
