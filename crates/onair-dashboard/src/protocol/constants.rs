//! Protocol constants for frame kinds and REST routes.

/// Known inbound frame kinds.
pub struct Kinds;

impl Kinds {
    /// The process-wide dispatcher record changed.
    pub const DISPATCHER_STATUS: &'static str = "dispatcher.status";

    /// A studio's LED snapshot. Also the `type` of the outbound pull request.
    pub const STUDIO_LED_STATUS: &'static str = "studio.led.status";
}

// ─── REST Routes ────────────────────────────────────────────────────────

/// Paths under the dispatcher origin.
pub struct Routes;

impl Routes {
    /// WebSocket feed endpoint.
    pub const WS: &'static str = "/api/v1/ws";

    /// Studio list.
    pub const STUDIOS: &'static str = "/api/v1/studios";

    /// Button trigger path for one studio.
    #[must_use]
    pub fn press(studio: &str, button: &str) -> String {
        format!("/api/v1/{studio}/press/{button}")
    }
}
