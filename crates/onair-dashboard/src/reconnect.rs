//! # Reconnect Policies
//!
//! The retry behavior of the dispatcher link, factored into a small policy
//! object so it stays testable and swappable.
//!
//! The production default is a fixed cadence with no backoff growth and no
//! attempt cap: a passive monitoring dashboard favors eventual recovery at
//! a steady rhythm over fast-fail.

use std::time::Duration;

/// Default fixed delay between reconnect attempts.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(10);

/// Policy controlling how the link schedules reconnection after a closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Never reconnect: the link stays down after the first closure.
    /// Useful in tests and one-shot tools.
    None,

    /// Reconnect forever at a fixed cadence.
    Fixed {
        /// Delay between a closure and the next connection attempt.
        delay: Duration,
    },
}

impl ReconnectPolicy {
    /// No reconnection.
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Fixed-cadence reconnection.
    #[must_use]
    pub fn fixed(delay: Duration) -> Self {
        Self::Fixed { delay }
    }

    /// The delay before the next attempt, or `None` when the link should
    /// stay down. Every closure yields exactly one scheduled attempt.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Fixed { delay } => Some(*delay),
        }
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::Fixed {
            delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}
