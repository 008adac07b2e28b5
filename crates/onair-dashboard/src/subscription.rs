//! # Subscription Registry
//!
//! Tracks which studio the dashboard cares about and turns selection
//! changes into `studio.led.status` pull requests.
//!
//! Selection is a pull trigger, not a persistent subscription: the
//! dispatcher answers each request with one snapshot and forgets about
//! the client. The link replays
//! [`resubscribe_request`](SubscriptionRegistry::resubscribe_request)
//! on every open so a reconnect recovers the snapshot on its own.

use std::sync::Mutex;

use crate::protocol::envelope::LedStatusRequest;
use crate::transport::LinkSender;

/// Owner of the selected studio.
pub struct SubscriptionRegistry {
    selected: Mutex<Option<String>>,
    sender: LinkSender,
}

impl SubscriptionRegistry {
    #[must_use]
    pub fn new(sender: LinkSender) -> Self {
        Self {
            selected: Mutex::new(None),
            sender,
        }
    }

    /// Change the selected studio.
    ///
    /// An empty id clears the selection and performs no network action.
    /// A nonempty id stores the selection and immediately requests that
    /// studio's snapshot; if the link is down the request is skipped, and
    /// the open replay covers it.
    pub async fn select(&self, studio: &str) {
        if studio.is_empty() {
            *self.lock_selected() = None;
            tracing::debug!("studio selection cleared");
            return;
        }

        *self.lock_selected() = Some(studio.to_string());

        let request = LedStatusRequest::new(studio);
        match self.sender.send(&request).await {
            Ok(true) => tracing::debug!(studio, "led snapshot requested"),
            Ok(false) => {
                tracing::debug!(studio, "link not open, snapshot request skipped");
            }
            Err(e) => tracing::warn!(studio, error = %e, "snapshot request failed"),
        }
    }

    /// Currently selected studio, if any.
    #[must_use]
    pub fn selected(&self) -> Option<String> {
        self.lock_selected().clone()
    }

    /// The request the link must replay when a connection opens: one per
    /// selected studio, none when nothing is selected.
    #[must_use]
    pub fn resubscribe_request(&self) -> Option<LedStatusRequest> {
        self.lock_selected().as_deref().map(LedStatusRequest::new)
    }

    fn lock_selected(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.selected.lock().unwrap_or_else(|e| e.into_inner())
    }
}
