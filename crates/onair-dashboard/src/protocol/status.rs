//! Dispatcher-status and studio-LED payloads.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::led::{LedColor, LedStatus};

/// The single process-wide dispatcher record.
///
/// Replaced wholesale on every `dispatcher.status` frame; no history is
/// retained. `x` and `y` are positional/state metadata this client stores
/// and exposes but never interprets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DispatcherStatus {
    #[serde(default)]
    pub on_air_studio: Option<String>,
    pub state: String,
    pub x: f64,
    pub y: f64,
}

impl DispatcherStatus {
    /// The studio currently on air, with the empty marker folded to `None`.
    #[must_use]
    pub fn on_air(&self) -> Option<&str> {
        self.on_air_studio.as_deref().filter(|s| !s.is_empty())
    }
}

/// Payload of a `studio.led.status` frame: the LED snapshot the dispatcher
/// currently holds for one studio.
///
/// The map may omit colors; the cache keeps an absent color's previous
/// render state (see [`LedStateCache`](crate::cache::LedStateCache)).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudioLedUpdate {
    pub studio: String,
    pub status: BTreeMap<LedColor, LedStatus>,
}
