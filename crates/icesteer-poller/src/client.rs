//! Origin status client.
//!
//! Issues a single bounded GET against one origin's `/status-json.xsl` and
//! deserializes the status document. No retry here — the polling cadence
//! itself is the retry policy.

use std::time::Duration;

use http_body_util::{BodyExt, Empty};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use icesteer_core::error::PollError;
use icesteer_core::status::IcecastStatus;

/// HTTP client for origin status endpoints.
///
/// One instance is shared across all origins; the underlying connector
/// handles both `http` and `https` polling schemes.
#[derive(Clone)]
pub struct OriginClient {
    scheme: String,
    timeout: Duration,
    http: Client<HttpsConnector<HttpConnector>, Empty<bytes::Bytes>>,
}

impl OriginClient {
    /// Create a client polling with the given scheme and per-call timeout.
    pub fn new(scheme: impl Into<String>, timeout: Duration) -> Self {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        Self {
            scheme: scheme.into(),
            timeout,
            http: Client::builder(TokioExecutor::new()).build(connector),
        }
    }

    /// Fetch and parse one origin's status document.
    ///
    /// Transport failures, timeouts, non-2xx responses, and unparsable
    /// bodies are all `PollError`; the caller excludes the origin and moves
    /// on to the rest of the pool.
    pub async fn fetch_status(&self, origin: &str) -> Result<IcecastStatus, PollError> {
        let url = format!("{}://{}/status-json.xsl", self.scheme, origin);

        match tokio::time::timeout(self.timeout, self.fetch_inner(&url)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(%origin, timeout = ?self.timeout, "status request timed out");
                Err(PollError::Timeout)
            }
        }
    }

    async fn fetch_inner(&self, url: &str) -> Result<IcecastStatus, PollError> {
        let request = http::Request::builder()
            .method("GET")
            .uri(url)
            .header("user-agent", "icesteer/0.1")
            .body(Empty::new())
            .map_err(|e| PollError::Connect(e.to_string()))?;

        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| PollError::Connect(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PollError::HttpStatus(response.status().as_u16()));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| PollError::Connect(e.to_string()))?
            .to_bytes();

        serde_json::from_slice(&body).map_err(|e| PollError::MalformedPayload(e.to_string()))
    }
}
