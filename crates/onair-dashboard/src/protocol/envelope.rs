//! Wire envelope structures.
//!
//! Every frame the dispatcher pushes is a structurally-typed envelope
//! `{kind, payload}`. [`Envelope::decode`] turns it into the [`Frame`]
//! union at the connection boundary, with an explicit [`Frame::Unknown`]
//! variant so unrecognized kinds stay a non-event.

use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;
use crate::protocol::constants::Kinds;
use crate::protocol::status::{DispatcherStatus, StudioLedUpdate};

/// Raw inbound wire envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Inbound frames, decoded by `kind`.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// `dispatcher.status`: the process-wide record, replaced wholesale.
    DispatcherStatus(DispatcherStatus),

    /// `studio.led.status`: one studio's LED snapshot.
    StudioLedStatus(StudioLedUpdate),

    /// Unrecognized kind. Dropped by the link after logging.
    Unknown { kind: String },
}

impl Envelope {
    /// Decode the payload according to `kind`.
    ///
    /// # Errors
    /// Returns a JSON error when a *known* kind carries a payload that
    /// does not match its shape; unknown kinds never error.
    pub fn decode(self) -> DashboardResult<Frame> {
        match self.kind.as_str() {
            Kinds::DISPATCHER_STATUS => {
                let status: DispatcherStatus = serde_json::from_value(self.payload)?;
                Ok(Frame::DispatcherStatus(status))
            }
            Kinds::STUDIO_LED_STATUS => {
                let update: StudioLedUpdate = serde_json::from_value(self.payload)?;
                Ok(Frame::StudioLedStatus(update))
            }
            _ => Ok(Frame::Unknown { kind: self.kind }),
        }
    }
}

// ─── Outbound ───────────────────────────────────────────────────────────

/// Outbound pull request asking the dispatcher to emit the current LED
/// snapshot for one studio.
///
/// This is a one-shot trigger, not a persistent subscription: the server
/// answers once and holds no client state, which is why the link replays
/// the request on every open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedStatusRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub studio: String,
}

impl LedStatusRequest {
    /// Build a snapshot request for `studio`.
    pub fn new(studio: impl Into<String>) -> Self {
        Self {
            kind: Kinds::STUDIO_LED_STATUS,
            studio: studio.into(),
        }
    }
}
