//! Relay core: authenticate an inbound payload by its `secret` field and
//! forward it verbatim to the destination registered for that secret.
//!
//! ## Flow
//!
//! ```text
//! body → parse_payload → extract_secret → SecretMap::resolve → Forwarder::forward
//! ```
//!
//! Each call to [`Relay::handle`] is a single independent pass; the only
//! shared state is the read-only [`SecretMap`] and the forwarder's client.

pub mod error;
pub mod forward;
pub mod secret;

use std::time::Duration;

use axum::body::Bytes;
use tracing::{info, warn};

pub use error::RelayError;
pub use forward::Forwarder;
pub use secret::{extract_secret, parse_payload, SecretMap};

/// A payload that was delivered and acknowledged with a 2xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayAccepted {
    /// Destination URL the payload went to
    pub routed_to: String,
    /// Trimmed secret that selected the destination
    pub secret: String,
}

/// Secret lookup plus forwarding, shared across all requests.
#[derive(Clone, Debug)]
pub struct Relay {
    secrets: SecretMap,
    forwarder: Forwarder,
}

impl Relay {
    pub fn new(secrets: SecretMap, forward_timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            secrets,
            forwarder: Forwarder::new(forward_timeout)?,
        })
    }

    /// Relay one inbound body.
    ///
    /// The body is forwarded as the exact bytes received, so the destination
    /// sees the same document (secret included) the caller sent.
    pub async fn handle(&self, body: Bytes) -> Result<RelayAccepted, RelayError> {
        let payload = parse_payload(&body).inspect_err(|_| {
            warn!(body_length = body.len(), "relay_invalid_json");
        })?;

        let secret = extract_secret(&payload).inspect_err(|_| {
            warn!(field_count = payload.len(), "relay_missing_secret");
        })?;

        let Some(destination) = self.secrets.resolve(&secret) else {
            warn!(secret_length = secret.len(), "relay_unknown_secret");
            return Err(RelayError::Forbidden { secret });
        };
        let destination = destination.to_string();

        self.forwarder.forward(&destination, body).await?;

        info!(url = %destination, "relay_forwarded");

        Ok(RelayAccepted {
            routed_to: destination,
            secret,
        })
    }
}
