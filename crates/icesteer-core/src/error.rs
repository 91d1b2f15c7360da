//! Error types for IceSteer.

use thiserror::Error;

/// Errors that invalidate the balancer configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("relay pool is empty — at least one origin is required")]
    EmptyPool,

    #[error("relay pool entries must be non-empty host[:port] strings")]
    BlankOrigin,

    #[error("duplicate origin in relay pool: {0}")]
    DuplicateOrigin(String),

    #[error("unsupported polling scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Why a single origin was excluded from a polling round.
///
/// Every variant folds to "excluded from the snapshot" at the aggregation
/// boundary; they stay distinct so the poller can log what actually went
/// wrong per origin.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("status request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("origin returned HTTP {0}")]
    HttpStatus(u16),

    #[error("malformed status payload: {0}")]
    MalformedPayload(String),
}
