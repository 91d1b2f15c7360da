//! Concurrent origin polling and snapshot assembly.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use icesteer_core::snapshot::{OriginLoad, StatusSnapshot};

use crate::cache::{BoxFuture, StatusSource};
use crate::client::OriginClient;

/// Fans one status request out per configured origin and folds the
/// successes into an ordered snapshot.
pub struct Aggregator {
    client: Arc<OriginClient>,
    origins: Arc<[String]>,
}

impl Aggregator {
    pub fn new(client: OriginClient, origins: Vec<String>) -> Self {
        Self {
            client: Arc::new(client),
            origins: origins.into(),
        }
    }

    /// Poll every origin concurrently and build the round's snapshot.
    ///
    /// Each fetch carries its own timeout, so the round's wall-clock cost is
    /// bounded by the slowest responding-or-timing-out origin, not the sum.
    /// Failed and mountpoint-less origins are excluded from the result.
    pub async fn poll_round(&self) -> StatusSnapshot {
        let mut tasks = JoinSet::new();
        for (rank, origin) in self.origins.iter().enumerate() {
            let client = Arc::clone(&self.client);
            let origin = origin.clone();
            tasks.spawn(async move {
                let outcome = client.fetch_status(&origin).await;
                (rank, origin, outcome)
            });
        }

        // Collect by pool rank so the stable sort below can break count
        // ties in configured-pool order.
        let mut counts: Vec<Option<OriginLoad>> = vec![None; self.origins.len()];
        while let Some(joined) = tasks.join_next().await {
            let Ok((rank, origin, outcome)) = joined else {
                continue;
            };
            match outcome {
                Ok(status) => match status.listener_total() {
                    Some(listeners) => counts[rank] = Some(OriginLoad { origin, listeners }),
                    None => debug!(%origin, "origin serves no mountpoints, excluded from round"),
                },
                Err(error) => debug!(%origin, %error, "origin excluded from round"),
            }
        }

        StatusSnapshot::from_pool_counts(counts.into_iter().flatten().collect())
    }
}

impl StatusSource for Aggregator {
    fn snapshot(&self) -> BoxFuture<'_, StatusSnapshot> {
        Box::pin(self.poll_round())
    }
}
