//! HookRelay - shared-secret webhook relay.
//!
//! Receives JSON alerts on a single endpoint, authenticates each one by the
//! `secret` field inside the payload, and forwards the untouched payload to
//! the destination URL registered for that secret.
//!
//! ## Architecture
//!
//! ```text
//! Alert source → POST /tv → Relay (secret lookup) → POST destination
//! ```

pub mod config;
pub mod relay;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use relay::{Relay, RelayAccepted, RelayError, SecretMap};
pub use web::{router, AppState};
