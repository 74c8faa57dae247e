//! Multi-zone (speaker group) registries and group-status fan-out.
//!
//! Two registries live here:
//!
//! - group UUID → the live connection acting as that zone's member, kept by
//!   group listeners for the lifetime of their connection;
//! - device UUID → listeners interested in group-forwarded status, kept by
//!   standard devices so a dynamic group can reach them after absorbing
//!   them.
//!
//! Registration and deregistration are atomic with respect to concurrent
//! delivery: fan-out snapshots the listener set before invoking handlers, so
//! no registry lock is held while a listener runs and a just-deregistered
//! listener is never invoked after deregistration returns (its own validity
//! flag covers deliveries already holding a snapshot).

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::cast::listener::{CastConnection, CastStatusListener};
use crate::cast::status::MediaStatus;

/// Tracks which connections represent live group zones and which listeners
/// want group status forwarded to their device.
#[derive(Default)]
pub struct MultiZoneManager {
    /// Group UUID → live connection for that zone.
    members: DashMap<Uuid, Arc<dyn CastConnection>>,
    /// Device UUID → listeners registered for group-forwarded status.
    listeners: DashMap<Uuid, Vec<Arc<CastStatusListener>>>,
}

impl MultiZoneManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection as the live member for its group zone.
    pub fn add_group_member(&self, connection: Arc<dyn CastConnection>) {
        let uuid = connection.uuid();
        if self.members.insert(uuid, connection).is_some() {
            log::debug!("[MultiZone] Replaced live connection for group {}", uuid);
        }
    }

    /// Removes the live member for a group zone. Tolerates zones that were
    /// already removed.
    pub fn remove_group_member(&self, uuid: Uuid) {
        if self.members.remove(&uuid).is_none() {
            log::debug!("[MultiZone] Group {} already removed", uuid);
        }
    }

    /// Returns the live connection for a group zone, if any.
    #[must_use]
    pub fn group_member(&self, uuid: Uuid) -> Option<Arc<dyn CastConnection>> {
        self.members.get(&uuid).map(|c| Arc::clone(&c))
    }

    /// Registers a listener for group-forwarded status, keyed by its
    /// device's UUID. Superseded listeners from earlier connections may
    /// still be registered; they drop deliveries themselves once
    /// invalidated.
    pub fn register_listener(&self, uuid: Uuid, listener: Arc<CastStatusListener>) {
        self.listeners.entry(uuid).or_default().push(listener);
    }

    /// Deregisters a listener by pointer identity. Tolerates listeners that
    /// were never registered or were already removed.
    pub fn deregister_listener(&self, uuid: Uuid, listener: &CastStatusListener) {
        let Some(mut entry) = self.listeners.get_mut(&uuid) else {
            log::debug!("[MultiZone] No listeners registered for {}", uuid);
            return;
        };
        let before = entry.len();
        entry.retain(|l| !std::ptr::eq(Arc::as_ptr(l), listener));
        if entry.len() == before {
            log::debug!("[MultiZone] Listener for {} already deregistered", uuid);
        }
        drop(entry);
        self.listeners.remove_if(&uuid, |_, v| v.is_empty());
    }

    /// Number of listeners registered for a device UUID.
    #[must_use]
    pub fn listener_count(&self, uuid: Uuid) -> usize {
        self.listeners.get(&uuid).map_or(0, |l| l.len())
    }

    /// Forwards a group's media status to every listener registered for a
    /// member device. `None` clears the group media status.
    pub fn group_media_status(
        &self,
        group_uuid: Uuid,
        members: &[Uuid],
        status: Option<MediaStatus>,
    ) {
        for member in members {
            for listener in self.listeners_for(*member) {
                listener.multizone_new_media_status(group_uuid, status.clone());
            }
        }
    }

    /// Notifies listeners of former member devices that their group is gone.
    pub fn group_dissolved(&self, group_uuid: Uuid, former_members: &[Uuid]) {
        for member in former_members {
            for listener in self.listeners_for(*member) {
                listener.removed_from_multizone(group_uuid);
            }
        }
    }

    // Snapshot so no shard lock is held while listener handlers run.
    fn listeners_for(&self, uuid: Uuid) -> Vec<Arc<CastStatusListener>> {
        self.listeners.get(&uuid).map_or_else(Vec::new, |l| l.clone())
    }
}
