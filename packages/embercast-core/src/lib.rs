//! Embercast Core - Chromecast-family device integration for a home-automation hub.
//!
//! This crate provides the device-facing plumbing a hub needs to treat cast
//! devices as stable logical entities: discovery records are normalized into
//! immutable descriptors, device metadata is completed lazily over HTTP, and
//! status callbacks from short-lived socket connections are bridged to
//! long-lived device handles with race-free invalidation. It also parses the
//! two legacy internet-radio playlist formats (M3U, PLS) so a station URL can
//! be resolved to playable media items.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`context`]: Discovery configuration threaded through metadata queries
//! - [`cast`]: Device descriptors, status bridging, and multi-zone tracking
//! - [`playlist`]: M3U/PLS playlist fetching and parsing
//! - [`error`]: Centralized error types
//!
//! # Abstraction Traits
//!
//! The crate defines several traits to decouple core logic from the external
//! transports it collaborates with:
//!
//! - [`ServiceResolver`](context::ServiceResolver): Resolving advertised
//!   service records to reachable addresses
//! - [`DialClient`](cast::dial::DialClient): Blocking device capability and
//!   group-status queries
//! - [`CastConnection`](cast::listener::CastConnection): An active socket
//!   connection's callback streams
//! - [`CastEventTarget`](cast::listener::CastEventTarget): The hub's logical
//!   device handle
//!
//! Each trait has a default implementation where one makes sense standalone;
//! the hub provides its own where it owns the transport.

#![warn(clippy::all)]

pub mod cast;
pub mod context;
pub mod error;
pub mod playlist;

// Re-export commonly used types at the crate root
pub use cast::device_info::{CastDeviceInfo, CastType};
pub use cast::dial::{
    DeviceCapabilities, DialClient, DialError, DialResult, EurekaDialClient, MultizoneGroup,
    MultizoneStatus,
};
pub use cast::listener::{CastConnection, CastEventTarget, CastStatusListener};
pub use cast::multizone::MultiZoneManager;
pub use cast::status::{CastStatus, ConnectionState, ConnectionStatus, MediaStatus, PlayerState};
pub use context::{CastService, DiscoveryContext, HostResolver, ServiceResolver};
pub use error::{EmberError, EmberResult};
pub use playlist::{parse_m3u, parse_pls, PlaylistError, PlaylistItem, PlaylistResult};
