//! # Dashboard Controller
//!
//! Top-level glue wiring user actions to the subscription registry, the
//! REST collaborators and the local graph state. Owns the initial
//! studio-list load and the eager cache warm-up.

use std::sync::{Arc, Mutex};

use crate::api::{ButtonKind, DispatcherApi};
use crate::config::DashboardConfig;
use crate::context::DashboardContext;
use crate::error::DashboardResult;
use crate::graph::{GraphOption, GraphSelector};
use crate::protocol::envelope::LedStatusRequest;
use crate::reconnect::ReconnectPolicy;
use crate::transport::{DispatcherLink, FrameHandler, LinkSender};

/// Top-level dashboard wiring.
pub struct DashboardController {
    context: Arc<DashboardContext>,
    api: DispatcherApi,
    graph: Mutex<GraphSelector>,
}

impl DashboardController {
    /// Wire a controller from an existing context and REST client.
    #[must_use]
    pub fn new(context: Arc<DashboardContext>, api: DispatcherApi) -> Self {
        Self {
            context,
            api,
            graph: Mutex::new(GraphSelector::default()),
        }
    }

    /// Build the full stack from configuration: context, REST client and a
    /// started dispatcher link. The link is returned alongside the
    /// controller so the caller owns the connection lifetime.
    ///
    /// # Errors
    /// Returns a configuration error for an unusable origin, or an HTTP
    /// error when the REST client cannot be built.
    pub fn start(config: &DashboardConfig) -> DashboardResult<(Self, DispatcherLink)> {
        let sender = LinkSender::detached();
        let context = Arc::new(DashboardContext::new(sender.clone()));
        let handler: Arc<dyn FrameHandler> = context.clone();

        let link = DispatcherLink::start(
            config.ws_url()?,
            ReconnectPolicy::fixed(config.reconnect.delay()),
            sender,
            handler,
        );

        let api = DispatcherApi::new(config)?;
        Ok((Self::new(context, api), link))
    }

    /// The shared dashboard state, for display layers.
    #[must_use]
    pub fn context(&self) -> &Arc<DashboardContext> {
        &self.context
    }

    /// Load the studio list and register every studio with the cache.
    ///
    /// If the link is already open when the list arrives, eagerly request
    /// every studio's LED snapshot, not just the selected one, so the
    /// cache warms immediately.
    ///
    /// # Errors
    /// Returns any error from the studio-list fetch. Warm-up send
    /// failures are logged, not returned.
    pub async fn load_studios(&self) -> DashboardResult<Vec<String>> {
        let studios = self.api.fetch_studios().await?;

        self.context.with_cache(|cache| {
            for studio in &studios {
                cache.register_studio(studio);
            }
        });

        let sender = self.context.sender();
        if sender.is_open() {
            for studio in &studios {
                match sender.send(&LedStatusRequest::new(studio)).await {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::debug!(studio = %studio, "link closed mid warm-up");
                    }
                    Err(e) => {
                        tracing::warn!(studio = %studio, error = %e, "warm-up snapshot request failed");
                    }
                }
            }
        }

        Ok(studios)
    }

    /// Change the studio selection. An empty id clears it.
    pub async fn select_studio(&self, studio: &str) {
        self.context.registry().select(studio).await;
    }

    /// Trigger a studio button.
    ///
    /// Silently does nothing when no studio is selected.
    pub fn press(&self, button: ButtonKind) {
        let Some(studio) = self.context.registry().selected() else {
            tracing::debug!(button = %button, "button press ignored, no studio selected");
            return;
        };
        self.api.press(&studio, button);
    }

    /// Replace the sibling set of graph options. Nothing is selected.
    pub fn set_graph_options<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.lock_graph() = GraphSelector::new(urls);
    }

    /// Select (or clear) the displayed graph; returns the locator the
    /// display layer should load, carrying a fresh cache-busting suffix.
    pub fn select_graph(&self, url: Option<&str>) -> Option<String> {
        self.lock_graph().select(url).map(str::to_string)
    }

    /// Locator the display layer should currently show.
    #[must_use]
    pub fn graph_display(&self) -> Option<String> {
        self.lock_graph().display().map(str::to_string)
    }

    /// Snapshot of the graph sibling set.
    #[must_use]
    pub fn graph_options(&self) -> Vec<GraphOption> {
        self.lock_graph().options().to_vec()
    }

    fn lock_graph(&self) -> std::sync::MutexGuard<'_, GraphSelector> {
        self.graph.lock().unwrap_or_else(|e| e.into_inner())
    }
}
