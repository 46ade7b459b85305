//! Outbound delivery of an accepted payload to its destination.

use std::error::Error as _;
use std::time::Duration;

use axum::body::Bytes;
use reqwest::{header::CONTENT_TYPE, redirect, Client};

use super::RelayError;

/// How much of a rejected downstream body ends up in the error log.
const BODY_LOG_PREFIX_CHARS: usize = 200;

/// Shared HTTP client for forwarding, bounded by the forward timeout.
///
/// Cloning is cheap and reuses the same connection pool.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: Client,
    timeout: Duration,
}

impl Forwarder {
    /// Build a forwarder whose every request is capped at `timeout`.
    ///
    /// Redirects are not followed: a 3xx is reported like any other
    /// non-2xx answer.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, timeout })
    }

    /// POST `body` unchanged to `destination`.
    ///
    /// Succeeds only on a 2xx answer. Any other status becomes
    /// [`RelayError::Upstream`]; failing to get an answer at all becomes
    /// [`RelayError::BadGateway`].
    pub async fn forward(&self, destination: &str, body: Bytes) -> Result<(), RelayError> {
        let result = self
            .client
            .post(destination)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                let description = describe(&e);
                if e.is_timeout() {
                    tracing::error!(
                        url = destination,
                        timeout_seconds = self.timeout.as_secs_f64(),
                        error = %description,
                        "relay_forward_timeout"
                    );
                } else if e.is_connect() {
                    tracing::error!(
                        url = destination,
                        error = %description,
                        "relay_forward_connect_error"
                    );
                } else {
                    tracing::error!(
                        url = destination,
                        error = %description,
                        "relay_forward_failed"
                    );
                }
                return Err(RelayError::BadGateway(description));
            }
        };

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        // A body that fails to arrive is logged as empty; the status is what matters.
        let text = resp.text().await.unwrap_or_default();

        tracing::error!(
            url = destination,
            status_code = status.as_u16(),
            body = %body_prefix(&text),
            "relay_upstream_rejected"
        );

        Err(RelayError::Upstream { status })
    }
}

/// Leading characters (not bytes) of a downstream body, for logging.
fn body_prefix(text: &str) -> String {
    text.chars().take(BODY_LOG_PREFIX_CHARS).collect()
}

/// Flatten a reqwest error and its causes into one line.
///
/// reqwest's own message only names the URL; the cause chain carries the
/// useful part ("Connection refused", "operation timed out", ...).
fn describe(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}
