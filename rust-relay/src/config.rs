//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup. Bad values never abort the process:
//! the secret map falls back to empty (every secret rejected) and the
//! timeout falls back to its default.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::relay::SecretMap;

/// Forward timeout used when `FORWARD_TIMEOUT` is absent or unusable.
pub const DEFAULT_FORWARD_TIMEOUT_SECS: f64 = 6.0;

/// Listen port used when `PORT` is absent or unusable.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret → destination URL routing table
    pub secret_map: SecretMap,

    /// Upper bound on a single outbound forward, connect through body
    pub forward_timeout: Duration,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let secret_map = match env::var("SECRET_MAP") {
            Ok(raw) => parse_secret_map(&raw),
            Err(_) => {
                warn!("secret_map_not_set");
                SecretMap::default()
            }
        };

        Config {
            secret_map,

            forward_timeout: parse_forward_timeout(env::var("FORWARD_TIMEOUT").ok().as_deref()),

            port: parse_port(env::var("PORT").ok().as_deref()),
        }
    }
}

/// Parse the `SECRET_MAP` JSON object into a routing table.
///
/// A document that is not a flat object of strings yields an empty map.
/// Individual entries with a blank secret or a destination that is not an
/// absolute http(s) URL are dropped; the rest of the map survives.
pub fn parse_secret_map(raw: &str) -> SecretMap {
    let entries: HashMap<String, String> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "secret_map_invalid");
            return SecretMap::default();
        }
    };

    let mut routes = HashMap::with_capacity(entries.len());
    for (secret, destination) in entries {
        let secret = secret.trim();
        if secret.is_empty() {
            warn!("secret_map_blank_secret_dropped");
            continue;
        }

        if !is_forwardable_url(&destination) {
            warn!(
                secret_length = secret.len(),
                "secret_map_invalid_destination_dropped"
            );
            continue;
        }

        routes.insert(secret.to_string(), destination);
    }

    SecretMap::new(routes)
}

/// Parse `FORWARD_TIMEOUT` (seconds, fractional allowed).
pub fn parse_forward_timeout(raw: Option<&str>) -> Duration {
    let default = Duration::from_secs_f64(DEFAULT_FORWARD_TIMEOUT_SECS);

    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => {
            Duration::try_from_secs_f64(secs).unwrap_or(default)
        }
        _ => {
            warn!(value = %raw, "forward_timeout_invalid");
            default
        }
    }
}

/// Parse `PORT`, falling back to 8080.
pub fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_PORT)
}

fn is_forwardable_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret_map_valid() {
        let map = parse_secret_map(
            r#"{"alpha": "https://hooks.example.com/a", "beta": "http://10.0.0.5:9000/b"}"#,
        );
        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve("alpha"), Some("https://hooks.example.com/a"));
        assert_eq!(map.resolve("beta"), Some("http://10.0.0.5:9000/b"));
    }

    #[test]
    fn test_parse_secret_map_malformed_is_empty() {
        assert!(parse_secret_map("").is_empty());
        assert!(parse_secret_map("{not json").is_empty());
        assert!(parse_secret_map(r#"["https://example.com"]"#).is_empty());
        assert!(parse_secret_map(r#"{"alpha": 42}"#).is_empty());
    }

    #[test]
    fn test_parse_secret_map_drops_bad_entries() {
        let map = parse_secret_map(
            r#"{"good": "https://example.com/hook", "ftp": "ftp://example.com/x", "rel": "/just/a/path", "  ": "https://example.com/blank"}"#,
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("good"), Some("https://example.com/hook"));
        assert_eq!(map.resolve("ftp"), None);
    }

    #[test]
    fn test_parse_secret_map_trims_keys() {
        let map = parse_secret_map(r#"{" padded ": "https://example.com/p"}"#);
        assert_eq!(map.resolve("padded"), Some("https://example.com/p"));
    }

    #[test]
    fn test_parse_forward_timeout() {
        assert_eq!(parse_forward_timeout(None), Duration::from_secs(6));
        assert_eq!(parse_forward_timeout(Some("2.5")), Duration::from_millis(2500));
        assert_eq!(parse_forward_timeout(Some(" 10 ")), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_forward_timeout_invalid_uses_default() {
        for raw in ["", "abc", "0", "-1", "NaN", "inf"] {
            assert_eq!(
                parse_forward_timeout(Some(raw)),
                Duration::from_secs(6),
                "value {raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None), 8080);
        assert_eq!(parse_port(Some("9000")), 9000);
        assert_eq!(parse_port(Some(" 3000 ")), 3000);
        assert_eq!(parse_port(Some("http")), 8080);
        assert_eq!(parse_port(Some("70000")), 8080);
    }
}
