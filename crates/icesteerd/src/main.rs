//! icesteerd — the IceSteer daemon.
//!
//! Single binary that assembles the balancer: origin poller, snapshot
//! cache, and the redirect/status HTTP API. Stream requests are answered
//! with a redirect to the least-loaded Icecast relay; audio never passes
//! through this process.
//!
//! # Usage
//!
//! ```text
//! icesteerd --relays relay1.example.com,relay2.example.com --port 8080
//! ```
//!
//! Every flag also reads its environment variable (`ICECAST_RELAYS`,
//! `ICECAST_RELAY_SCHEME`, `CACHE_TTL`, `PORT`).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use icesteer_core::config::BalancerConfig;
use icesteer_poller::Balancer;

#[derive(Parser)]
#[command(name = "icesteerd", about = "Listener-aware redirect balancer for Icecast relays")]
struct Cli {
    /// Comma-separated relay origins (host[:port]).
    #[arg(long, env = "ICECAST_RELAYS")]
    relays: String,

    /// Scheme used when polling relay status endpoints.
    #[arg(long, env = "ICECAST_RELAY_SCHEME", default_value = "http")]
    relay_scheme: String,

    /// Snapshot cache TTL in seconds (0 disables caching).
    #[arg(long, env = "CACHE_TTL", default_value = "60")]
    cache_ttl: u64,

    /// Per-origin poll timeout in seconds.
    #[arg(long, default_value = "5")]
    poll_timeout: u64,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,
}

impl Cli {
    fn balancer_config(&self) -> BalancerConfig {
        BalancerConfig {
            origins: BalancerConfig::parse_origins(&self.relays),
            scheme: self.relay_scheme.clone(),
            cache_ttl: Duration::from_secs(self.cache_ttl),
            poll_timeout: Duration::from_secs(self.poll_timeout),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "info,icesteer_poller=debug,icesteer_api=debug".parse().unwrap()
                }),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.balancer_config();

    let balancer = Balancer::new(&config).context(
        "invalid relay configuration \
         (set ICECAST_RELAYS='relay1.example.com,relay2.example.com')",
    )?;

    info!(relays = ?config.origins, scheme = %config.scheme, "icesteer starting");

    let router = icesteer_api::build_router(Arc::new(balancer));
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("icesteer stopped");
    Ok(())
}
