//! # Dispatcher REST Collaborators
//!
//! The one-shot HTTP calls living next to the WebSocket feed: the initial
//! studio list and the studio button triggers. Button presses are
//! fire-and-forget: the response is ignored and failures are only
//! logged, never surfaced as a visible error.

use std::time::Duration;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::protocol::constants::Routes;

/// Studio buttons the dashboard can trigger remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Takeover,
    Release,
    Immediate,
}

impl ButtonKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonKind::Takeover => "takeover",
            ButtonKind::Release => "release",
            ButtonKind::Immediate => "immediate",
        }
    }
}

impl std::fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP client for the dispatcher's REST surface.
#[derive(Debug, Clone)]
pub struct DispatcherApi {
    client: reqwest::Client,
    config: DashboardConfig,
}

impl DispatcherApi {
    /// Build the REST client for a dispatcher origin.
    ///
    /// # Errors
    /// Returns an HTTP error when the underlying client cannot be built.
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.http_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetch the list of known studio identifiers.
    ///
    /// # Errors
    /// Returns an HTTP error on transport failure, a status error on a
    /// non-success response, and a JSON error when the body is not an
    /// array of strings.
    pub async fn fetch_studios(&self) -> DashboardResult<Vec<String>> {
        let url = self.config.api_url(Routes::STUDIOS);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(DashboardError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let studios = response.json::<Vec<String>>().await?;
        tracing::info!(count = studios.len(), "studio list fetched");
        Ok(studios)
    }

    /// Trigger a studio button, fire-and-forget.
    ///
    /// Runs on a detached task; the response is ignored.
    pub fn press(&self, studio: &str, button: ButtonKind) {
        let url = self.config.api_url(&Routes::press(studio, button.as_str()));
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.get(&url).send().await {
                Ok(response) => {
                    tracing::debug!(url = %url, status = %response.status(), "button press delivered");
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "button press failed");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_kind_labels() {
        assert_eq!(ButtonKind::Takeover.as_str(), "takeover");
        assert_eq!(ButtonKind::Release.as_str(), "release");
        assert_eq!(ButtonKind::Immediate.as_str(), "immediate");
        assert_eq!(ButtonKind::Takeover.to_string(), "takeover");
    }

    #[test]
    fn test_press_url_shape() {
        let config = DashboardConfig::new("http://localhost:8080");
        assert_eq!(
            config.api_url(&Routes::press("studio1", ButtonKind::Immediate.as_str())),
            "http://localhost:8080/api/v1/studio1/press/immediate"
        );
    }
}
