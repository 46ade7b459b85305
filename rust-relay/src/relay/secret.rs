//! Payload decoding, secret extraction, and the secret → destination table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::RelayError;

/// Immutable routing table from secret to destination URL.
///
/// Built once at startup and shared by every request; clones share storage.
#[derive(Clone, Default)]
pub struct SecretMap {
    routes: Arc<HashMap<String, String>>,
}

impl SecretMap {
    pub fn new(routes: HashMap<String, String>) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    /// Destination URL for a secret, if the secret is known.
    pub fn resolve(&self, secret: &str) -> Option<&str> {
        self.routes.get(secret).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// Secrets and destinations stay out of Debug output (and therefore logs).
impl fmt::Debug for SecretMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretMap")
            .field("routes", &self.routes.len())
            .finish()
    }
}

/// Decode a request body into a JSON object.
///
/// The error never carries parser details.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, RelayError> {
    serde_json::from_slice(body).map_err(|_| RelayError::invalid_json())
}

/// Pull the top-level `secret` field out of a payload as a trimmed string.
///
/// Non-string scalars use their JSON text (`123`, `true`); arrays and
/// objects use their compact JSON encoding. `null` counts as missing.
pub fn extract_secret(payload: &Map<String, Value>) -> Result<String, RelayError> {
    let raw = match payload.get("secret") {
        // JSON `null` counts as absent, and bools render as `true`/`false`.
        None | Some(Value::Null) => return Err(RelayError::missing_secret()),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    let secret = raw.trim();
    if secret.is_empty() {
        return Err(RelayError::missing_secret());
    }

    Ok(secret.to_string())
}
