//! # Dashboard Context
//!
//! One process-scoped object owning the mirrored state: the LED cache,
//! the dispatcher status record and the subscription registry. The link
//! drives it through [`FrameHandler`]; display layers read from it.
//!
//! Keeping all of this in one place (instead of free-floating globals)
//! makes reconnect wiring and test setup explicit: the context is the
//! link's handler *and* the controller's state.

use std::sync::Mutex;

use crate::cache::LedStateCache;
use crate::protocol::envelope::LedStatusRequest;
use crate::protocol::status::{DispatcherStatus, StudioLedUpdate};
use crate::subscription::SubscriptionRegistry;
use crate::transport::{FrameHandler, LinkSender};

/// Process-scoped dashboard state.
pub struct DashboardContext {
    sender: LinkSender,
    registry: SubscriptionRegistry,
    cache: Mutex<LedStateCache>,
    dispatcher: Mutex<Option<DispatcherStatus>>,
}

impl DashboardContext {
    /// Build a context around an outbound handle. The same handle must be
    /// adopted by the [`DispatcherLink`](crate::transport::DispatcherLink)
    /// this context will serve as handler for.
    #[must_use]
    pub fn new(sender: LinkSender) -> Self {
        Self {
            registry: SubscriptionRegistry::new(sender.clone()),
            sender,
            cache: Mutex::new(LedStateCache::new()),
            dispatcher: Mutex::new(None),
        }
    }

    /// The outbound handle this context was built around.
    #[must_use]
    pub fn sender(&self) -> LinkSender {
        self.sender.clone()
    }

    /// The subscription registry.
    #[must_use]
    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    /// Run `f` against the LED cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LedStateCache) -> R) -> R {
        f(&mut self.lock_cache())
    }

    /// Latest dispatcher status record, if one has arrived yet.
    #[must_use]
    pub fn dispatcher_status(&self) -> Option<DispatcherStatus> {
        self.lock_dispatcher().clone()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LedStateCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_dispatcher(&self) -> std::sync::MutexGuard<'_, Option<DispatcherStatus>> {
        self.dispatcher.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FrameHandler for DashboardContext {
    fn on_open(&self) -> Vec<LedStatusRequest> {
        self.registry.resubscribe_request().into_iter().collect()
    }

    fn on_dispatcher_status(&self, status: DispatcherStatus) {
        tracing::debug!(
            on_air = status.on_air().unwrap_or("-"),
            state = %status.state,
            "dispatcher status replaced"
        );
        *self.lock_dispatcher() = Some(status);
    }

    fn on_led_status(&self, update: StudioLedUpdate) {
        self.lock_cache().apply_status(&update.studio, &update.status);
    }
}
