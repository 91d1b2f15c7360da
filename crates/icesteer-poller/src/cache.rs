//! Snapshot cache with lazy TTL expiry.
//!
//! The TTL is checked on access, not by a timer loop. Entries are replaced
//! atomically as whole snapshots; an empty round is returned to the caller
//! but never installed, so the next request retries immediately while a
//! previously good entry keeps serving until its TTL lapses.

use std::pin::Pin;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use icesteer_core::snapshot::StatusSnapshot;

/// Boxed future returned by [`StatusSource::snapshot`].
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Anything that can produce a fresh status snapshot on demand.
pub trait StatusSource: Send + Sync {
    fn snapshot(&self) -> BoxFuture<'_, StatusSnapshot>;
}

/// The most recent non-empty snapshot and when it was taken.
struct CacheEntry {
    snapshot: StatusSnapshot,
    taken_at: Instant,
}

/// TTL cache over a [`StatusSource`].
pub struct SnapshotCache {
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl SnapshotCache {
    /// Create a cache with the given TTL. A zero TTL disables caching:
    /// every call recomputes and nothing is ever stored.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached snapshot if still fresh, otherwise recompute via
    /// `source` and install the result when it is non-empty.
    ///
    /// The lock is held across the recomputation, so concurrent callers
    /// during a miss wait for one authoritative round instead of polling
    /// the origins redundantly.
    pub async fn get(&self, source: &dyn StatusSource) -> StatusSnapshot {
        if self.ttl.is_zero() {
            return source.snapshot().await;
        }

        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref() {
            if !entry.snapshot.is_empty() && entry.taken_at.elapsed() < self.ttl {
                return entry.snapshot.clone();
            }
        }

        let fresh = source.snapshot().await;
        if fresh.is_empty() {
            debug!("polling round reached no origin, snapshot not cached");
        } else {
            *slot = Some(CacheEntry {
                snapshot: fresh.clone(),
                taken_at: Instant::now(),
            });
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use icesteer_core::snapshot::OriginLoad;

    /// Plays back a fixed sequence of rounds and counts invocations.
    struct ScriptedSource {
        rounds: std::sync::Mutex<VecDeque<StatusSnapshot>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(rounds: Vec<StatusSnapshot>) -> Self {
            Self {
                rounds: std::sync::Mutex::new(rounds.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StatusSource for ScriptedSource {
        fn snapshot(&self) -> BoxFuture<'_, StatusSnapshot> {
            Box::pin(async {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.rounds.lock().unwrap().pop_front().unwrap_or_default()
            })
        }
    }

    fn round(counts: &[(&str, u64)]) -> StatusSnapshot {
        StatusSnapshot::from_pool_counts(
            counts
                .iter()
                .map(|(origin, listeners)| OriginLoad {
                    origin: origin.to_string(),
                    listeners: *listeners,
                })
                .collect(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_entry_is_served_without_repolling() {
        let source = ScriptedSource::new(vec![round(&[("a", 3)]), round(&[("a", 9)])]);
        let cache = SnapshotCache::new(Duration::from_secs(60));

        let first = cache.get(&source).await;
        assert_eq!(first, round(&[("a", 3)]));
        assert_eq!(source.calls(), 1);

        // Half the TTL later the same snapshot comes back, no new round.
        tokio::time::advance(Duration::from_secs(30)).await;
        let second = cache.get(&source).await;
        assert_eq!(second, first);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_triggers_repoll() {
        let source = ScriptedSource::new(vec![round(&[("a", 3)]), round(&[("a", 9)])]);
        let cache = SnapshotCache::new(Duration::from_secs(60));

        cache.get(&source).await;
        tokio::time::advance(Duration::from_secs(61)).await;

        let refreshed = cache.get(&source).await;
        assert_eq!(refreshed, round(&[("a", 9)]));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_always_recomputes() {
        let source = ScriptedSource::new(vec![round(&[("a", 1)]), round(&[("a", 2)])]);
        let cache = SnapshotCache::new(Duration::ZERO);

        assert_eq!(cache.get(&source).await, round(&[("a", 1)]));
        assert_eq!(cache.get(&source).await, round(&[("a", 2)]));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn empty_round_is_never_cached() {
        let source = ScriptedSource::new(vec![round(&[]), round(&[("a", 5)])]);
        let cache = SnapshotCache::new(Duration::from_secs(60));

        assert!(cache.get(&source).await.is_empty());
        // The empty result was not stored, so the next call retries at once.
        assert_eq!(cache.get(&source).await, round(&[("a", 5)]));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_round_does_not_clobber_fresh_entry() {
        let source = ScriptedSource::new(vec![round(&[("a", 5)]), round(&[]), round(&[("b", 1)])]);
        let cache = SnapshotCache::new(Duration::from_secs(60));

        let good = cache.get(&source).await;
        assert_eq!(good, round(&[("a", 5)]));

        // While fresh, nothing re-polls: the outage round is never taken.
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.get(&source).await, good);
        assert_eq!(source.calls(), 1);

        // After expiry the outage round runs, comes back empty, and is
        // surfaced but not stored.
        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cache.get(&source).await.is_empty());
        assert_eq!(source.calls(), 2);

        // Recovery on the very next call.
        assert_eq!(cache.get(&source).await, round(&[("b", 1)]));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn concurrent_miss_runs_one_round() {
        use std::sync::Arc;

        let source = Arc::new(ScriptedSource::new(vec![round(&[("a", 2)])]));
        let cache = Arc::new(SnapshotCache::new(Duration::from_secs(60)));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let source = Arc::clone(&source);
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.get(source.as_ref()).await }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), round(&[("a", 2)]));
        }
        assert_eq!(source.calls(), 1);
    }
}
