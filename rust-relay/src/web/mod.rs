//! Web server module exposing the relay over HTTP.
//!
//! Routes:
//! - `POST /tv`: authenticate and forward a JSON payload
//! - `GET /health`: liveness check

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, relay_webhook, AppState, ErrorResponse, HealthResponse, RelayResponse,
};

/// Build the application router.
///
/// Request bodies are not size-capped; any JSON object is relayed whole.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tv", post(relay_webhook))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
