//! # onair-dashboard
//!
//! Dashboard client for on-air studio dispatcher services.
//!
//! This crate mirrors the live state a dispatcher publishes for a small
//! set of remote studios (the on-air indicator, per-studio three-color
//! LED banks, and a selectable historical graph) over a persistent
//! WebSocket feed that survives connection loss on its own.
//!
//! ## Quick Start
//!
//! ```ignore
//! use onair_dashboard::api::ButtonKind;
//! use onair_dashboard::{DashboardConfig, DashboardController};
//!
//! #[tokio::main]
//! async fn main() -> onair_dashboard::DashboardResult<()> {
//!     // Load config from environment or onair.toml
//!     let config = DashboardConfig::discover(None)?;
//!
//!     // Start the reconnecting feed and the REST client
//!     let (controller, mut link) = DashboardController::start(&config)?;
//!
//!     // Populate the LED cache with the known studios
//!     let studios = controller.load_studios().await?;
//!
//!     // Follow the first studio; its LED snapshot streams into the cache
//!     if let Some(first) = studios.first() {
//!         controller.select_studio(first).await;
//!     }
//!
//!     // Display layers read controller.context(): the LED rows, the
//!     // dispatcher status record, and the graph selection.
//!
//!     link.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Synchronization model
//!
//! | Piece | Update policy |
//! |-------|---------------|
//! | Dispatcher status | Replaced wholesale on every `dispatcher.status` frame |
//! | LED rows | Merged per color; colors a frame omits keep their state |
//! | Selection | A pull trigger; replayed by the link on every reconnect |
//!
//! The link reconnects forever at a fixed cadence (10 s by default) and
//! never surfaces feed trouble as an error: unknown frame kinds, updates
//! for unknown studios and dropped connections are logged and absorbed.

pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod graph;
pub mod led;
pub mod protocol;
pub mod reconnect;
pub mod subscription;
pub mod transport;

// ─── Public re-exports ──────────────────────────────────────────────────

pub use config::DashboardConfig;
pub use context::DashboardContext;
pub use controller::DashboardController;
pub use error::{DashboardError, DashboardResult};
pub use reconnect::ReconnectPolicy;
pub use transport::{DispatcherLink, FrameHandler, LinkSender, LinkState};
