//! The balancer facade handed to the HTTP surface.

use icesteer_core::config::BalancerConfig;
use icesteer_core::error::ConfigError;
use icesteer_core::snapshot::{OriginLoad, StatusSnapshot};

use crate::aggregate::Aggregator;
use crate::cache::SnapshotCache;
use crate::client::OriginClient;

/// Ties the aggregator and the snapshot cache together behind the two
/// operations the API needs: the full ordered snapshot and the
/// least-loaded origin.
pub struct Balancer {
    aggregator: Aggregator,
    cache: SnapshotCache,
}

impl Balancer {
    /// Validate the configuration and assemble the polling pipeline.
    pub fn new(config: &BalancerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = OriginClient::new(config.scheme.clone(), config.poll_timeout);
        Ok(Self {
            aggregator: Aggregator::new(client, config.origins.clone()),
            cache: SnapshotCache::new(config.cache_ttl),
        })
    }

    /// Current listener-count snapshot, served from cache when fresh.
    pub async fn snapshot(&self) -> StatusSnapshot {
        self.cache.get(&self.aggregator).await
    }

    /// The origin with the fewest listeners, or `None` when no origin in
    /// the pool is currently reachable.
    pub async fn least_loaded(&self) -> Option<OriginLoad> {
        self.snapshot().await.least_loaded().cloned()
    }
}
