//! # Reconnecting Dispatcher Link
//!
//! Low-level transport for the dispatcher WebSocket feed. Owns the whole
//! duplex connection lifecycle: connect, dispatch inbound frames by kind,
//! detect closure, schedule reconnection, and replay the current
//! subscription on every open.
//!
//! ## Architecture
//!
//! The WebSocket is split into reader/writer halves using
//! `tokio-tungstenite`'s `StreamExt::split()`. The writer lives in a
//! shared slot behind the cloneable [`LinkSender`]; a single driver task
//! owns connecting, reading, and reconnecting:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 DispatcherLink                   │
//! │                                                  │
//! │  LinkSender: Arc<Mutex<Option<SplitSink>>>       │
//! │                       ◄── send() when Open       │
//! │                                                  │
//! │  driver (spawned task):                          │
//! │    connect ──► on_open() replay ──► read loop    │
//! │    read loop ─┬─► dispatcher.status → handler    │
//! │               ├─► studio.led.status → handler    │
//! │               └─► unknown kind      → dropped    │
//! │    closed ──► fixed-delay sleep ──► connect …    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Because one task owns the lifecycle, a burst of closures can never
//! stack more than one pending reconnect.

use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::{DashboardError, DashboardResult};
use crate::protocol::envelope::{Envelope, Frame, LedStatusRequest};
use crate::protocol::status::{DispatcherStatus, StudioLedUpdate};
use crate::reconnect::ReconnectPolicy;

/// Connection timeout for the WebSocket handshake.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Type alias for the write half of the WebSocket connection.
type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Type alias for the read half of the WebSocket connection.
type WsReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Lifecycle of the dispatcher connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closing,
}

/// Receiver seam for everything the link produces.
///
/// `on_open` runs once per successful connect, before any frame is read;
/// the requests it returns are sent immediately. This is the
/// resubscribe-on-reconnect guarantee: the dispatcher holds no client
/// subscription state across a dropped connection, so interest must be
/// re-established from this side.
pub trait FrameHandler: Send + Sync + 'static {
    /// Requests to replay on a fresh connection.
    fn on_open(&self) -> Vec<LedStatusRequest>;

    /// A `dispatcher.status` frame arrived; the record replaces the
    /// previous one wholesale.
    fn on_dispatcher_status(&self, status: DispatcherStatus);

    /// A `studio.led.status` frame arrived.
    fn on_led_status(&self, update: StudioLedUpdate);
}

// ─── LinkSender ─────────────────────────────────────────────────────────

/// Cloneable outbound handle to the link.
///
/// Create one with [`detached`](Self::detached), hand it to whoever needs
/// to send, and let [`DispatcherLink::start`] adopt it; senders created
/// before the link exists simply report `Disconnected` and drop sends.
#[derive(Clone, Default)]
pub struct LinkSender {
    writer: Arc<Mutex<Option<WsWriter>>>,
    state: Arc<StdMutex<LinkState>>,
}

impl LinkSender {
    /// A sender not yet attached to any link.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Current lifecycle state of the link.
    #[must_use]
    pub fn state(&self) -> LinkState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether the link is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == LinkState::Open
    }

    /// Serialize `message` and transmit it if the link is open.
    ///
    /// Returns `Ok(true)` when the message was handed to the socket and
    /// `Ok(false)` when the link was not open. Readiness is the caller's
    /// concern; the open-hook replay covers subscriptions missed while
    /// the link was down.
    ///
    /// # Errors
    /// Returns a JSON error when `message` cannot be serialized, or a
    /// WebSocket error when the socket rejects the write.
    pub async fn send<T: Serialize>(&self, message: &T) -> DashboardResult<bool> {
        if !self.is_open() {
            return Ok(false);
        }
        let json = serde_json::to_string(message)?;

        let mut writer = self.writer.lock().await;
        let Some(writer) = writer.as_mut() else {
            return Ok(false);
        };
        writer.send(Message::Text(json.into())).await?;
        Ok(true)
    }

    fn set_state(&self, state: LinkState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    async fn adopt(&self, writer: WsWriter) {
        *self.writer.lock().await = Some(writer);
    }

    async fn clear(&self) {
        *self.writer.lock().await = None;
    }
}

// ─── DispatcherLink ─────────────────────────────────────────────────────

/// Reconnecting WebSocket link to the dispatcher feed.
pub struct DispatcherLink {
    sender: LinkSender,
    running: Arc<AtomicBool>,
    driver: Option<JoinHandle<()>>,
}

impl DispatcherLink {
    /// Start the link.
    ///
    /// Connects in the background and keeps the connection alive according
    /// to `policy` until [`stop`](Self::stop). `sender` is adopted as the
    /// outbound handle; hand clones of it out before calling this.
    #[must_use]
    pub fn start(
        url: String,
        policy: ReconnectPolicy,
        sender: LinkSender,
        handler: Arc<dyn FrameHandler>,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let driver = Self::spawn_driver(
            url,
            policy,
            sender.clone(),
            handler,
            Arc::clone(&running),
        );
        Self {
            sender,
            running,
            driver: Some(driver),
        }
    }

    /// A fresh outbound handle for this link.
    #[must_use]
    pub fn sender(&self) -> LinkSender {
        self.sender.clone()
    }

    /// Whether the link is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.sender.is_open()
    }

    /// Stop the driver and drop the connection.
    ///
    /// A reconnect pending when this is called dies with the driver.
    pub async fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.sender.set_state(LinkState::Closing);
        if let Some(driver) = self.driver.take() {
            driver.abort();
            let _ = driver.await;
        }
        self.sender.clear().await;
        self.sender.set_state(LinkState::Disconnected);
    }

    /// Spawn the driver task that owns the connection lifecycle.
    fn spawn_driver(
        url: String,
        policy: ReconnectPolicy,
        sender: LinkSender,
        handler: Arc<dyn FrameHandler>,
        running: Arc<AtomicBool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut attempt: u64 = 0;
            while running.load(Ordering::SeqCst) {
                attempt += 1;
                sender.set_state(LinkState::Connecting);
                tracing::debug!(url = %url, attempt, "connecting to dispatcher");

                match Self::connect(&url).await {
                    Ok((writer, reader)) => {
                        sender.adopt(writer).await;
                        sender.set_state(LinkState::Open);
                        tracing::info!(url = %url, attempt, "dispatcher link open");

                        // Replay the current subscription before any frame
                        // is read; the server holds no client state across
                        // a dropped connection.
                        for request in handler.on_open() {
                            match sender.send(&request).await {
                                Ok(true) => {
                                    tracing::debug!(studio = %request.studio, "subscription replayed");
                                }
                                Ok(false) => {
                                    tracing::debug!(studio = %request.studio, "link closed before replay");
                                }
                                Err(e) => {
                                    tracing::warn!(studio = %request.studio, error = %e, "subscription replay failed");
                                }
                            }
                        }

                        Self::read_loop(reader, handler.as_ref()).await;

                        sender.clear().await;
                        sender.set_state(LinkState::Disconnected);
                        tracing::info!("dispatcher link closed");
                    }
                    Err(e) => {
                        sender.set_state(LinkState::Disconnected);
                        tracing::warn!(error = %e, attempt, "dispatcher connection failed");
                    }
                }

                if !running.load(Ordering::SeqCst) {
                    break;
                }

                // Exactly one reconnect per closure, at the policy cadence.
                match policy.next_delay() {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => break,
                }
            }

            tracing::debug!("link driver exiting");
        })
    }

    async fn connect(url: &str) -> DashboardResult<(WsWriter, WsReader)> {
        let connect_fut = connect_async(url);
        let (ws, response) = tokio::time::timeout(CONNECT_TIMEOUT, connect_fut)
            .await
            .map_err(|_| DashboardError::ConnectionFailed {
                url: url.to_string(),
                reason: format!(
                    "handshake timed out after {}s",
                    CONNECT_TIMEOUT.as_secs()
                ),
            })?
            .map_err(|e| DashboardError::ConnectionFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(status = %response.status(), "dispatcher handshake complete");
        Ok(ws.split())
    }

    /// Process inbound frames until the connection closes.
    ///
    /// Frames are handled strictly in arrival order. Read errors are
    /// logged and the loop continues: errors alone never end a
    /// connection, only a close frame or the end of the stream does.
    async fn read_loop(mut reader: WsReader, handler: &dyn FrameHandler) {
        while let Some(message) = reader.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let envelope: Envelope = match serde_json::from_str(&text) {
                        Ok(envelope) => envelope,
                        Err(e) => {
                            tracing::warn!(error = %e, "unparseable frame dropped");
                            continue;
                        }
                    };
                    Self::dispatch(envelope, handler);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("dispatcher closed the connection");
                    break;
                }
                Ok(_) => {
                    // Binary frames, pings, pongs: skip.
                }
                Err(e) => {
                    tracing::warn!(error = %e, "dispatcher read error");
                }
            }
        }
    }

    /// Route one decoded frame to the handler.
    fn dispatch(envelope: Envelope, handler: &dyn FrameHandler) {
        match envelope.decode() {
            Ok(Frame::DispatcherStatus(status)) => handler.on_dispatcher_status(status),
            Ok(Frame::StudioLedStatus(update)) => handler.on_led_status(update),
            Ok(Frame::Unknown { kind }) => {
                tracing::debug!(kind = %kind, "unknown frame kind dropped");
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed payload dropped");
            }
        }
    }
}

impl Drop for DispatcherLink {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}
