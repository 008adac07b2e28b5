//! # LED State Cache
//!
//! Mapping from studio id to its LED render row. Inbound snapshots merge
//! per color: a color the payload mentions is overwritten, a color it
//! omits keeps its previous render state. This is deliberately different
//! from the dispatcher-status record, which is replaced wholesale.

use std::collections::{BTreeMap, HashMap};

use crate::led::{LedColor, LedStatus, LedWidget};

/// Render row for one studio: exactly one widget per color, created at
/// registration, plus a revision counter display layers can poll to notice
/// that the row needs drawing again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudioRow {
    green: LedWidget,
    yellow: LedWidget,
    red: LedWidget,
    revision: u64,
}

impl StudioRow {
    /// The render target for one color.
    #[must_use]
    pub fn widget(&self, color: LedColor) -> &LedWidget {
        match color {
            LedColor::Green => &self.green,
            LedColor::Yellow => &self.yellow,
            LedColor::Red => &self.red,
        }
    }

    fn widget_mut(&mut self, color: LedColor) -> &mut LedWidget {
        match color {
            LedColor::Green => &mut self.green,
            LedColor::Yellow => &mut self.yellow,
            LedColor::Red => &mut self.red,
        }
    }

    /// Bumped on registration and on every applied update.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Cache of per-studio LED render rows.
#[derive(Debug, Default)]
pub struct LedStateCache {
    rows: HashMap<String, StudioRow>,
}

impl LedStateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a studio, creating an empty render row.
    ///
    /// Idempotent: re-registering a known studio keeps its cached LED
    /// state, but still bumps the row revision so the row is drawn again.
    pub fn register_studio(&mut self, studio: &str) {
        let row = self.rows.entry(studio.to_string()).or_default();
        row.revision += 1;
    }

    /// Apply an inbound LED snapshot for one studio.
    ///
    /// Updates for studios that were never registered are dropped without
    /// error; the dispatcher may race ahead of the studio-list fetch.
    /// Colors absent from `status` keep their previous widget state.
    pub fn apply_status(&mut self, studio: &str, status: &BTreeMap<LedColor, LedStatus>) {
        let Some(row) = self.rows.get_mut(studio) else {
            tracing::debug!(studio, "led status for unregistered studio dropped");
            return;
        };

        for (&color, led) in status {
            row.widget_mut(color).apply(led);
        }
        row.revision += 1;
    }

    /// The render row for one studio, if registered.
    #[must_use]
    pub fn row(&self, studio: &str) -> Option<&StudioRow> {
        self.rows.get(studio)
    }

    #[must_use]
    pub fn contains(&self, studio: &str) -> bool {
        self.rows.contains_key(studio)
    }

    /// Registered studio ids, in no particular order.
    pub fn studios(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
