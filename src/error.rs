//! Error types for the tick-engine crate.
//!
//! Two families matter here: transport errors, which are transient and
//! recovered locally by the heartbeat loop, and malformed events, which are
//! rejected at the engine boundary before they can corrupt book state.
//! There is no fatal error path inside the core - the book keeps advancing
//! even while the transport is down.

use thiserror::Error;

/// The main error type for this crate
#[derive(Debug, Error)]
pub enum Error {
    /// Redis connect/publish failure (transient; heartbeat retries)
    #[error("transport error: {0}")]
    Transport(#[from] redis::RedisError),

    /// JSON serialization error while encoding a payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Inbound event rejected at the boundary
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// Invalid configuration (bad URL, missing fields)
    #[error("configuration error: {0}")]
    Config(String),

    /// Publisher has no live connection to the transport
    #[error("transport not connected")]
    NotConnected,
}

impl Error {
    /// Whether the failure is expected to clear on its own once the
    /// transport reconnects
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::NotConnected)
    }
}
