//! # LED Domain Types
//!
//! The per-studio LED bank: three colors, each either off, on, or blinking
//! at a frequency. Wire state labels arrive in varying case and are
//! normalized at the decode boundary; render targets only ever see
//! lowercase states and a precomputed blink period.

use serde::{Deserialize, Deserializer, Serialize};

/// The three LED colors every studio carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LedColor {
    Green,
    Yellow,
    Red,
}

impl LedColor {
    /// All colors, in display order.
    pub const ALL: [LedColor; 3] = [LedColor::Green, LedColor::Yellow, LedColor::Red];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LedColor::Green => "green",
            LedColor::Yellow => "yellow",
            LedColor::Red => "red",
        }
    }
}

impl std::fmt::Display for LedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── LedState ───────────────────────────────────────────────────────────

/// Visual state of a single LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedState {
    #[default]
    Off,
    On,
    Blink,
}

impl std::str::FromStr for LedState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(LedState::Off),
            "on" => Ok(LedState::On),
            "blink" => Ok(LedState::Blink),
            other => Err(format!("unknown led state '{other}'")),
        }
    }
}

// The dispatcher emits state labels in varying case ("ON", "On", "on");
// normalization happens here, before the value reaches any render target.
impl<'de> Deserialize<'de> for LedState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for LedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LedState::Off => "off",
            LedState::On => "on",
            LedState::Blink => "blink",
        };
        f.write_str(label)
    }
}

// ─── LedStatus ──────────────────────────────────────────────────────────

/// One LED's wire status: state plus the blink frequency in cycles per
/// second. The frequency is meaningful only when the state is `blink`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LedStatus {
    pub state: LedState,
    #[serde(default)]
    pub blink_freq: f64,
}

impl LedStatus {
    /// Blink period in seconds, `1 / blink_freq`.
    ///
    /// `None` unless the state is `blink` with a positive frequency.
    /// Whether a non-positive frequency can occur in real payloads is
    /// unresolved; it is tolerated here and logged rather than divided by.
    #[must_use]
    pub fn period_secs(&self) -> Option<f64> {
        if self.state != LedState::Blink {
            return None;
        }
        if self.blink_freq > 0.0 {
            Some(1.0 / self.blink_freq)
        } else {
            tracing::warn!(
                blink_freq = self.blink_freq,
                "blinking led carries a non-positive frequency"
            );
            None
        }
    }
}

// ─── LedWidget ──────────────────────────────────────────────────────────

/// Render target for a single LED.
///
/// This is the piece of state a display layer reads. The cache overwrites
/// it as status frames arrive; the blink period is left unset whenever the
/// LED is not blinking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedWidget {
    pub state: LedState,
    pub period_secs: Option<f64>,
}

impl LedWidget {
    /// Overwrite this widget from an inbound status.
    pub fn apply(&mut self, status: &LedStatus) {
        self.state = status.state;
        self.period_secs = status.period_secs();
    }
}
