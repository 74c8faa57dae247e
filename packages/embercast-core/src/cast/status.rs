//! Status payloads delivered by an active device connection.
//!
//! These are the values the socket transport pushes through its callback
//! streams. The listener forwards them unchanged to the hub's logical device
//! handle; nothing here is interpreted by this crate.

use std::net::SocketAddr;

use serde::Serialize;

/// Receiver-level status: running application and device volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastStatus {
    /// Identifier of the running receiver application, if any.
    pub app_id: Option<String>,
    /// Human-readable name of the running application.
    pub display_name: Option<String>,
    /// Device volume in `0.0..=1.0`.
    pub volume_level: f32,
    /// Whether the device is muted.
    pub volume_muted: bool,
}

/// Media session status for the currently loaded content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaStatus {
    /// Playback state of the media session.
    pub player_state: PlayerState,
    /// Content URL or identifier of the loaded media.
    pub content_id: Option<String>,
    /// Playback position in seconds.
    pub current_time: Option<f64>,
    /// Media duration in seconds, if known.
    pub duration: Option<f64>,
}

/// Media session playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Idle,
    Buffering,
    Playing,
    Paused,
}

/// Socket connection lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    /// Current connection state.
    pub state: ConnectionState,
    /// Address the connection targets, when known.
    pub address: Option<SocketAddr>,
}

/// Connection lifecycle states reported by the socket transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Lost,
}
