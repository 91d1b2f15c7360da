//! icesteer-api — HTTP surface for IceSteer.
//!
//! Thin plumbing over the balancer core: no audio bytes pass through
//! these routes, only JSON and redirects.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/status` | Ordered listener-count snapshot |
//! | GET | `/{*path}` | 307 redirect to the least-loaded origin |
//! | GET | `/` | 400 — a stream path is required |

pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use icesteer_poller::Balancer;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub balancer: Arc<Balancer>,
}

/// Build the complete router (status endpoint + redirect catch-all).
pub fn build_router(balancer: Arc<Balancer>) -> Router {
    let state = ApiState { balancer };

    Router::new()
        .route("/status", get(handlers::status))
        .route("/", get(handlers::missing_path))
        .route("/{*path}", get(handlers::redirect))
        .with_state(state)
}
