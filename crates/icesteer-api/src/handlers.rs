//! HTTP handlers for the status and redirect routes.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use tracing::debug;

use crate::ApiState;

/// Fixed-shape error body: `{"message": ...}`.
#[derive(serde::Serialize)]
struct Message {
    message: String,
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(Message {
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// GET /status — the full snapshot as a JSON object, keys in ascending
/// listener-count order.
pub async fn status(State(state): State<ApiState>) -> Response {
    let snapshot = state.balancer.snapshot().await;
    if snapshot.is_empty() {
        return message_response(StatusCode::BAD_REQUEST, "No icecast relay is reachable!");
    }
    Json(snapshot).into_response()
}

/// GET /{*path} — redirect the stream request to the least-loaded origin.
///
/// The location is built from the raw request URI, not the decoded path
/// capture, so percent-encoded stream paths pass through untouched.
pub async fn redirect(State(state): State<ApiState>, uri: Uri, headers: HeaderMap) -> Response {
    let scheme = client_scheme(&headers);
    let path = uri.path().trim_start_matches('/');

    match state.balancer.least_loaded().await {
        Some(target) => {
            let location = format!("{scheme}://{}/{path}", target.origin);
            debug!(
                origin = %target.origin,
                listeners = target.listeners,
                %location,
                "redirecting stream request"
            );
            Redirect::temporary(&location).into_response()
        }
        None => message_response(StatusCode::BAD_REQUEST, "No icecast relay is reachable!"),
    }
}

/// GET / — rejected before the core is consulted.
pub async fn missing_path() -> Response {
    message_response(StatusCode::BAD_REQUEST, "Please give me a stream path!")
}

/// Scheme for the redirect target: honors `X-Forwarded-Proto` when a TLS
/// terminator sits in front, plain http otherwise.
fn client_scheme(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http")
}
