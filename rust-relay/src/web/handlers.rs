//! HTTP endpoint handlers.
//!
//! The relay endpoint reads the raw body itself so that a bad body is
//! answered with the relay's own 400 rather than an extractor rejection.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::relay::{Relay, RelayError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Relay Webhook
// =============================================================================

/// Body returned once the destination accepted the payload.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub status: &'static str,
    pub routed_to: String,
    pub secret: String,
}

/// Body returned for every failed relay.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub detail: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            status: "error",
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Relay endpoint (`POST /tv`).
///
/// Authenticates the payload by its `secret` field, forwards it to the
/// mapped destination and reports where it went.
pub async fn relay_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RelayResponse>), RelayError> {
    let accepted = state.relay.handle(body).await?;

    Ok((
        StatusCode::OK,
        Json(RelayResponse {
            status: "ok",
            routed_to: accepted.routed_to,
            secret: accepted.secret,
        }),
    ))
}
