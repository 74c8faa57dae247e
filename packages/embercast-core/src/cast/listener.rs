//! Bridges an active connection's status callbacks to a logical device handle.
//!
//! A hub entity for a cast device outlives any single socket connection: a
//! network drop or device re-creation tears the connection down and builds a
//! new one, each with its own callback streams. [`CastStatusListener`] sits
//! between a connection and the entity so that callbacks from a superseded
//! connection can be cut off; after [`invalidate`](CastStatusListener::invalidate)
//! returns, nothing reaches the handle through that listener, including
//! callbacks already in flight.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::cast::device_info::CastDeviceInfo;
use crate::cast::multizone::MultiZoneManager;
use crate::cast::status::{CastStatus, ConnectionStatus, MediaStatus};

/// The hub's logical device handle.
///
/// Implemented by the entity that represents a device across connections.
/// All methods are invoked from the connection's delivery context.
pub trait CastEventTarget: Send + Sync {
    /// Receives a receiver-level status update.
    fn new_cast_status(&self, status: CastStatus);

    /// Receives a media session status update.
    fn new_media_status(&self, status: MediaStatus);

    /// Receives a socket connection status update.
    fn new_connection_status(&self, status: ConnectionStatus);

    /// Receives a media status forwarded from a group this device belongs to.
    ///
    /// `None` clears the group media status (group dissolved or device
    /// removed from it).
    fn multizone_new_media_status(&self, group_uuid: Uuid, status: Option<MediaStatus>);
}

/// An active connection to a cast device.
///
/// Exposes the identity of the targeted device and registration of the three
/// callback streams the socket transport delivers.
pub trait CastConnection: Send + Sync {
    /// UUID of the logical device this connection targets.
    fn uuid(&self) -> Uuid;

    /// Subscribes a listener to receiver status callbacks.
    fn register_cast_listener(&self, listener: Arc<CastStatusListener>);

    /// Subscribes a listener to media status callbacks.
    fn register_media_listener(&self, listener: Arc<CastStatusListener>);

    /// Subscribes a listener to connection status callbacks.
    fn register_connection_listener(&self, listener: Arc<CastStatusListener>);
}

/// Status bridge for one connection attempt.
///
/// At most one listener per logical device should be valid at a time; the
/// owner invalidates the old listener before (or right after) attaching a
/// new one for a replacement connection.
pub struct CastStatusListener {
    target: Arc<dyn CastEventTarget>,
    /// UUID of the connection this listener was created for.
    uuid: Uuid,
    /// Guards the check-and-forward sequence in every handler, so delivery
    /// racing `invalidate` either completes before invalidation or is
    /// dropped.
    valid: Mutex<bool>,
    is_audio_group: bool,
    multizone: Arc<MultiZoneManager>,
}

impl CastStatusListener {
    /// Attaches a listener to a connection and registers it for delivery.
    ///
    /// For an audio group the connection itself becomes the zone's live
    /// member in the coordinator. Otherwise the listener subscribes to the
    /// connection's three callback streams and registers with the
    /// coordinator keyed by UUID, so group status can be forwarded to this
    /// device if it is later absorbed into a dynamic group.
    pub fn attach(
        target: Arc<dyn CastEventTarget>,
        info: &CastDeviceInfo,
        connection: &Arc<dyn CastConnection>,
        multizone: Arc<MultiZoneManager>,
    ) -> Arc<Self> {
        Self::attach_inner(target, info, connection, multizone, false)
    }

    /// Attaches a listener that only tracks the connection's role as a
    /// potential group member.
    ///
    /// No callback streams are subscribed and no per-UUID registration is
    /// made; the caller does not want this connection's own status.
    pub fn attach_multizone_only(
        target: Arc<dyn CastEventTarget>,
        info: &CastDeviceInfo,
        connection: &Arc<dyn CastConnection>,
        multizone: Arc<MultiZoneManager>,
    ) -> Arc<Self> {
        Self::attach_inner(target, info, connection, multizone, true)
    }

    fn attach_inner(
        target: Arc<dyn CastEventTarget>,
        info: &CastDeviceInfo,
        connection: &Arc<dyn CastConnection>,
        multizone: Arc<MultiZoneManager>,
        multizone_only: bool,
    ) -> Arc<Self> {
        let listener = Arc::new(Self {
            target,
            uuid: connection.uuid(),
            valid: Mutex::new(true),
            is_audio_group: info.is_audio_group(),
            multizone: Arc::clone(&multizone),
        });

        if listener.is_audio_group {
            multizone.add_group_member(Arc::clone(connection));
        }
        if multizone_only {
            return listener;
        }

        connection.register_cast_listener(Arc::clone(&listener));
        connection.register_media_listener(Arc::clone(&listener));
        connection.register_connection_listener(Arc::clone(&listener));
        if !listener.is_audio_group {
            multizone.register_listener(listener.uuid, Arc::clone(&listener));
        }
        listener
    }

    /// UUID of the connection this listener bridges.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns whether the listener still forwards callbacks.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self.valid.lock()
    }

    fn forward<F>(&self, deliver: F)
    where
        F: FnOnce(&dyn CastEventTarget),
    {
        let valid = self.valid.lock();
        if *valid {
            deliver(self.target.as_ref());
        }
    }

    /// Handles reception of a new receiver status.
    pub fn new_cast_status(&self, status: CastStatus) {
        self.forward(|t| t.new_cast_status(status));
    }

    /// Handles reception of a new media status.
    pub fn new_media_status(&self, status: MediaStatus) {
        self.forward(|t| t.new_media_status(status));
    }

    /// Handles reception of a new connection status.
    pub fn new_connection_status(&self, status: ConnectionStatus) {
        self.forward(|t| t.new_connection_status(status));
    }

    /// Handles the device being added to a group. Membership itself is
    /// tracked by the coordinator, so nothing to do here.
    pub fn added_to_multizone(&self, _group_uuid: Uuid) {}

    /// Handles the device being removed from a group by clearing the group
    /// media status on the handle.
    pub fn removed_from_multizone(&self, group_uuid: Uuid) {
        self.forward(|t| t.multizone_new_media_status(group_uuid, None));
    }

    /// Handles a receiver status for a group. Group-level receiver status is
    /// intentionally ignored.
    pub fn multizone_new_cast_status(&self, _group_uuid: Uuid, _status: CastStatus) {}

    /// Handles a media status forwarded from a group.
    pub fn multizone_new_media_status(&self, group_uuid: Uuid, status: Option<MediaStatus>) {
        self.forward(|t| t.multizone_new_media_status(group_uuid, status));
    }

    /// Invalidates this listener.
    ///
    /// All following callbacks are dropped, and the registration made at
    /// attach time is reversed. Safe to call again; deregistration tolerates
    /// already-removed entries.
    pub fn invalidate(&self) {
        // Flip the flag and release the lock before touching the
        // coordinator: fan-out takes registry locks before the validity
        // lock, so holding both here would invert that order.
        *self.valid.lock() = false;

        if self.is_audio_group {
            self.multizone.remove_group_member(self.uuid);
        } else {
            self.multizone.deregister_listener(self.uuid, self);
        }
    }
}
