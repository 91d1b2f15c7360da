//! icesteer-poller — listener aggregation for IceSteer.
//!
//! Polls every configured origin's `/status-json.xsl` concurrently, folds
//! the per-origin listener counts into an ordered snapshot, and caches the
//! result with a TTL.
//!
//! # Architecture
//!
//! ```text
//! Balancer
//!   ├── Aggregator (one bounded fetch per origin, joined into a snapshot)
//!   │   └── OriginClient (GET /status-json.xsl, hard per-call timeout)
//!   └── SnapshotCache (lazy TTL expiry, never caches an empty round)
//! ```
//!
//! Per-origin failures are expected steady state: they are logged at debug
//! level and exclude the origin from the round, nothing more. Only a round
//! in which every origin fails surfaces to the API, as an empty snapshot.

pub mod aggregate;
pub mod balancer;
pub mod cache;
pub mod client;

pub use aggregate::Aggregator;
pub use balancer::Balancer;
pub use cache::{BoxFuture, SnapshotCache, StatusSource};
pub use client::OriginClient;
