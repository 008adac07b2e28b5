//! # Error Types
//!
//! Semantic error types for the dashboard client.
//!
//! Most runtime trouble on the feed path (unknown frame kinds, updates for
//! unregistered studios, a dropped connection) is deliberately *not* an
//! error; it is logged and absorbed so the dashboard degrades silently
//! and heals itself. The variants here cover what callers can actually
//! act on: configuration, the REST collaborators, and the send path.

use thiserror::Error;

/// Convenient Result alias for dashboard operations.
pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

/// All errors the dashboard client reports to callers.
#[derive(Error, Debug)]
pub enum DashboardError {
    // ─── Connection ─────────────────────────────────────────────────
    /// Failed to establish a WebSocket connection to the dispatcher.
    #[error("Failed to connect to dispatcher at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ─── REST collaborators ─────────────────────────────────────────
    /// Transport-level failure of a one-shot HTTP call.
    #[error("Dispatcher API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A one-shot HTTP call came back with a non-success status.
    #[error("Dispatcher API returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    // ─── Config ─────────────────────────────────────────────────────
    /// Configuration error (missing, malformed, or invalid values).
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    // ─── WebSocket ──────────────────────────────────────────────────
    /// Low-level WebSocket transport error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// Returns `true` if this error indicates the connection is dead
    /// and only a reconnect can help.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DashboardError::ConnectionFailed { .. } | DashboardError::WebSocket(_)
        )
    }
}

// ─── From impls for external error types ────────────────────────────────

impl From<tokio_tungstenite::tungstenite::Error> for DashboardError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        DashboardError::WebSocket(err.to_string())
    }
}

#[cfg(feature = "config-toml")]
impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        DashboardError::ConfigError {
            reason: err.to_string(),
        }
    }
}
