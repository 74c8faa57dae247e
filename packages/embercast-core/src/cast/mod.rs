//! Cast device descriptors, status bridging, and multi-zone tracking.
//!
//! # Module Structure
//!
//! - `device_info` - Immutable device descriptors and lazy metadata completion
//! - `dial` - Blocking capability and group-status queries over HTTP
//! - `status` - Status payloads delivered by an active connection
//! - `listener` - Bridges connection callbacks to logical device handles
//! - `multizone` - Speaker-group registries and group-status fan-out

pub mod device_info;
pub mod dial;
pub mod listener;
pub mod multizone;
pub mod status;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export domain types
pub use device_info::{CastDeviceInfo, CastType};
pub use listener::{CastConnection, CastEventTarget, CastStatusListener};
pub use multizone::MultiZoneManager;
pub use status::{CastStatus, ConnectionState, ConnectionStatus, MediaStatus, PlayerState};
