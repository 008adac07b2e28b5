//! # Configuration
//!
//! [`DashboardConfig`] holds everything needed to reach a dispatcher: the
//! HTTP origin plus the ambient knobs (reconnect cadence, REST timeout).
//!
//! ## Loading Priority
//!
//! Configuration is loaded from the first source that provides a value:
//!
//! 1. Explicit struct fields (programmatic construction)
//! 2. Environment variables (`ONAIR_ORIGIN`)
//! 3. TOML config file at an explicit path
//! 4. `./onair.toml` in the current directory
//! 5. `~/.config/onair-dashboard/onair.toml`
//!
//! The origin can always be overridden by the environment, even when
//! loading from a file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::protocol::constants::Routes;

/// Default fixed delay between reconnect attempts, in seconds.
const DEFAULT_RECONNECT_DELAY_SECS: u64 = 10;

/// Default timeout for one-shot REST calls, in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration for connecting to an on-air dispatcher.
///
/// # Examples
///
/// ## Programmatic
///
/// ```
/// use onair_dashboard::config::DashboardConfig;
///
/// let config = DashboardConfig::new("https://dispatcher.example");
/// assert_eq!(config.ws_url().unwrap(), "wss://dispatcher.example/api/v1/ws");
/// ```
///
/// ## From environment variables
///
/// ```no_run
/// use onair_dashboard::config::DashboardConfig;
///
/// // Set ONAIR_ORIGIN, then:
/// let config = DashboardConfig::from_env().expect("Missing ONAIR_ORIGIN");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// HTTP origin of the dispatcher, e.g. `https://dispatcher.example`.
    ///
    /// The WebSocket endpoint is derived from this: the scheme is upgraded
    /// to the secure variant iff the origin itself is secure.
    pub origin: String,

    /// Reconnect behavior of the dispatcher link.
    #[serde(default)]
    pub reconnect: ReconnectConfig,

    /// Timeout configuration.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Reconnect cadence when the WebSocket connection drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectConfig {
    /// Fixed delay before each reconnect attempt, in seconds.
    /// There is no backoff growth and no attempt cap.
    #[serde(default = "default_reconnect_delay")]
    pub delay_secs: u64,
}

impl ReconnectConfig {
    /// The reconnect delay as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Timeout settings for the REST collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Timeout for one-shot REST calls, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

// ─── Defaults ───────────────────────────────────────────────────────────

fn default_reconnect_delay() -> u64 {
    DEFAULT_RECONNECT_DELAY_SECS
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_RECONNECT_DELAY_SECS,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

// ─── DashboardConfig impl ───────────────────────────────────────────────

impl DashboardConfig {
    /// Create a config with just the dispatcher origin (all other fields
    /// use defaults).
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            reconnect: ReconnectConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }

    /// Load config from environment variables.
    ///
    /// Required: `ONAIR_ORIGIN`
    ///
    /// # Errors
    /// Returns [`DashboardError::ConfigError`] when `ONAIR_ORIGIN` is not set.
    pub fn from_env() -> DashboardResult<Self> {
        let origin = std::env::var("ONAIR_ORIGIN").map_err(|_| DashboardError::ConfigError {
            reason: "ONAIR_ORIGIN environment variable not set".into(),
        })?;
        Ok(Self::new(origin))
    }

    /// Load config from a TOML file, with the environment override applied
    /// on top (`ONAIR_ORIGIN` takes precedence over the file value).
    ///
    /// # Errors
    /// Returns [`DashboardError::ConfigError`] when the file cannot be
    /// read or parsed.
    #[cfg(feature = "config-toml")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| DashboardError::ConfigError {
                reason: format!("Failed to read config file '{}': {}", path.display(), e),
            })?;
        let mut config: Self = toml::from_str(&contents)?;

        if let Ok(origin) = std::env::var("ONAIR_ORIGIN") {
            config.origin = origin;
        }

        Ok(config)
    }

    /// Discover and load config from the standard search path:
    ///
    /// 1. Explicit path (if `Some`)
    /// 2. `ONAIR_CONFIG` environment variable
    /// 3. `./onair.toml`
    /// 4. `~/.config/onair-dashboard/onair.toml`
    ///
    /// Falls back to environment-variable-only config if no file is found.
    ///
    /// # Errors
    /// Returns [`DashboardError::ConfigError`] when no source yields a
    /// usable configuration.
    #[cfg(feature = "config-toml")]
    pub fn discover(explicit_path: Option<&std::path::Path>) -> DashboardResult<Self> {
        use std::path::PathBuf;

        // 1. Explicit path
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. ONAIR_CONFIG env var
        if let Ok(path) = std::env::var("ONAIR_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // 3. ./onair.toml
        let local_path = PathBuf::from("onair.toml");
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        // 4. ~/.config/onair-dashboard/onair.toml
        if let Some(config_path) = dirs_config_path() {
            if config_path.exists() {
                return Self::from_file(&config_path);
            }
        }

        // 5. Environment variables only
        Self::from_env()
    }

    /// The WebSocket endpoint derived from the origin.
    ///
    /// The scheme mirrors the origin scheme: a secure origin yields a
    /// secure socket (`https` → `wss`, `http` → `ws`).
    ///
    /// # Errors
    /// Returns [`DashboardError::ConfigError`] when the origin carries
    /// neither an `http://` nor an `https://` scheme.
    pub fn ws_url(&self) -> DashboardResult<String> {
        let origin = self.origin.trim_end_matches('/');
        if let Some(rest) = origin.strip_prefix("https://") {
            Ok(format!("wss://{rest}{}", Routes::WS))
        } else if let Some(rest) = origin.strip_prefix("http://") {
            Ok(format!("ws://{rest}{}", Routes::WS))
        } else {
            Err(DashboardError::ConfigError {
                reason: format!(
                    "origin '{}' must start with http:// or https://",
                    self.origin
                ),
            })
        }
    }

    /// A REST URL under the dispatcher origin.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), path)
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

/// Platform-appropriate config file path.
#[cfg(feature = "config-toml")]
fn dirs_config_path() -> Option<std::path::PathBuf> {
    use std::path::PathBuf;

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|dir| PathBuf::from(dir).join("onair-dashboard").join("onair.toml"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(|dir| {
            PathBuf::from(dir)
                .join(".config")
                .join("onair-dashboard")
                .join("onair.toml")
        })
    }
}
