//! Dispatcher wire protocol.
//!
//! This namespace groups the wire-compatible protocol structures:
//! - [`constants`]: frame kinds and REST routes.
//! - [`envelope`]: the inbound `{kind, payload}` envelope, its decoded
//!   [`Frame`](envelope::Frame) union, and the outbound snapshot request.
//! - [`status`]: dispatcher-status and studio-LED payloads.

pub mod constants;
pub mod envelope;
pub mod status;

pub use constants::{Kinds, Routes};
pub use envelope::{Envelope, Frame, LedStatusRequest};
pub use status::{DispatcherStatus, StudioLedUpdate};
