// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook server.
//!
//! Handles `POST /callback` and `GET /health`.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use kotae_line::events::parse_envelope;
use kotae_line::signature::{SIGNATURE_HEADER, verify_signature};
use serde::Serialize;
use tracing::{error, warn};

use crate::server::GatewayState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since process start.
    pub uptime_secs: u64,
}

/// POST /callback
///
/// The webhook entry point. The raw body is verified against the channel
/// secret before anything is parsed; an unverifiable delivery is rejected
/// with 400 and processes nothing. A verified but non-JSON body is an
/// unrecoverable parse error (500). Everything else acknowledges 200 `OK`
/// regardless of per-event outcomes, so the platform does not re-deliver
/// an envelope whose failures we have already contained.
pub async fn post_callback(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !verify_signature(&state.channel_secret, &body, signature) {
        warn!("webhook signature verification failed");
        return (StatusCode::BAD_REQUEST, "Invalid signature").into_response();
    }

    let envelope = match parse_envelope(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            error!(error = %e, "failed to parse webhook body");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error").into_response();
        }
    };

    state.dispatcher.dispatch(&envelope).await;

    (StatusCode::OK, "OK").into_response()
}

/// GET /health
///
/// Returns health status of the webhook server.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}
