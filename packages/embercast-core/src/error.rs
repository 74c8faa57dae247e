//! Centralized error types for the Embercast core library.
//!
//! Errors are defined in their home modules using `thiserror`; this module
//! re-exports them along with their `Result` aliases and provides a
//! crate-wide error for hub-facing call sites that mix concerns.

use thiserror::Error;

// Re-export error types and Result aliases from their defining modules
pub use crate::cast::dial::{DialError, DialResult};
pub use crate::playlist::{PlaylistError, PlaylistResult};

/// Crate-wide error type for call sites that combine playlist resolution
/// with device queries.
#[derive(Debug, Error)]
pub enum EmberError {
    /// Playlist fetch or parse failed.
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    /// Blocking device capability or group-status query failed.
    #[error("device query failed: {0}")]
    Dial(#[from] DialError),
}

/// Convenient Result alias for crate-wide operations.
pub type EmberResult<T> = Result<T, EmberError>;
