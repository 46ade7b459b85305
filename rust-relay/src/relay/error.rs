//! Error taxonomy for a single relay pass.

use axum::http::StatusCode;
use thiserror::Error;

/// Why an inbound request could not be relayed.
///
/// Every variant is terminal for the request it came from and carries the
/// message returned to the caller.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Body is not a JSON object, or the secret is missing/blank.
    #[error("{0}")]
    BadRequest(String),

    /// The secret is not in the routing table. The value is echoed back.
    #[error("Unknown secret: {secret}")]
    Forbidden { secret: String },

    /// The destination answered with a non-2xx status.
    #[error("Downstream returned {}", .status.as_u16())]
    Upstream { status: StatusCode },

    /// The destination could not be reached (connect, DNS, TLS, timeout).
    #[error("Forwarding failed: {0}")]
    BadGateway(String),
}

impl RelayError {
    pub fn invalid_json() -> Self {
        Self::BadRequest("Invalid JSON".to_string())
    }

    pub fn missing_secret() -> Self {
        Self::BadRequest("Missing 'secret'".to_string())
    }

    /// HTTP status returned to the caller.
    ///
    /// Downstream rejections reuse the downstream's own status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Upstream { status } => *status,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
