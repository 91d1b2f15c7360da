//! Balancer configuration.
//!
//! The origin pool is fixed at startup and immutable afterwards; its order
//! doubles as the tie-break rank when two origins report the same listener
//! count.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::ConfigError;

/// Default snapshot cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Default per-origin poll timeout in seconds.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 5;

/// Startup configuration for the balancer core.
#[derive(Debug, Clone)]
pub struct BalancerConfig {
    /// Ordered relay pool (`host[:port]` entries).
    pub origins: Vec<String>,
    /// Scheme used when polling origin status endpoints.
    pub scheme: String,
    /// Snapshot time-to-live. Zero disables caching entirely.
    pub cache_ttl: Duration,
    /// Hard timeout for a single origin status request.
    pub poll_timeout: Duration,
}

impl BalancerConfig {
    /// Config with default scheme, TTL, and timeout for the given pool.
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            origins,
            scheme: "http".to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
        }
    }

    /// Split a comma-separated relay list, trimming entries and dropping
    /// empty ones.
    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Reject configurations the balancer cannot start with.
    ///
    /// Configuration errors are fatal before any subsystem is constructed;
    /// nothing else in the balancer validates the pool again.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.origins.is_empty() {
            return Err(ConfigError::EmptyPool);
        }

        let mut seen = HashSet::new();
        for origin in &self.origins {
            if origin.trim().is_empty() {
                return Err(ConfigError::BlankOrigin);
            }
            if !seen.insert(origin.as_str()) {
                return Err(ConfigError::DuplicateOrigin(origin.clone()));
            }
        }

        if self.scheme != "http" && self.scheme != "https" {
            return Err(ConfigError::UnsupportedScheme(self.scheme.clone()));
        }

        Ok(())
    }
}
