//! Shared test doubles for listener and multizone tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::cast::device_info::{CastDeviceInfo, CastType};
use crate::cast::listener::{CastConnection, CastEventTarget, CastStatusListener};
use crate::cast::status::{CastStatus, ConnectionStatus, MediaStatus, PlayerState};

/// Everything a logical device handle can receive, in arrival order.
#[derive(Debug, Clone)]
pub enum RecordedEvent {
    Cast(CastStatus),
    Media(MediaStatus),
    Connection(ConnectionStatus),
    Multizone(Uuid, Option<MediaStatus>),
}

/// Logical device handle that records every delivery.
#[derive(Default)]
pub struct RecordingTarget {
    pub events: Mutex<Vec<RecordedEvent>>,
    /// Set by tests after `invalidate` returns; deliveries recorded while
    /// closed count as violations of the invalidation contract.
    pub closed: AtomicBool,
    pub late_deliveries: AtomicUsize,
}

impl RecordingTarget {
    fn record(&self, event: RecordedEvent) {
        if self.closed.load(Ordering::SeqCst) {
            self.late_deliveries.fetch_add(1, Ordering::SeqCst);
        }
        self.events.lock().push(event);
    }
}

impl CastEventTarget for RecordingTarget {
    fn new_cast_status(&self, status: CastStatus) {
        self.record(RecordedEvent::Cast(status));
    }

    fn new_media_status(&self, status: MediaStatus) {
        self.record(RecordedEvent::Media(status));
    }

    fn new_connection_status(&self, status: ConnectionStatus) {
        self.record(RecordedEvent::Connection(status));
    }

    fn multizone_new_media_status(&self, group_uuid: Uuid, status: Option<MediaStatus>) {
        self.record(RecordedEvent::Multizone(group_uuid, status));
    }
}

/// Connection double that counts stream registrations.
pub struct MockConnection {
    uuid: Uuid,
    registrations: AtomicUsize,
}

impl MockConnection {
    pub fn new(uuid: Uuid) -> Self {
        Self {
            uuid,
            registrations: AtomicUsize::new(0),
        }
    }

    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }
}

impl CastConnection for MockConnection {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn register_cast_listener(&self, _listener: Arc<CastStatusListener>) {
        self.registrations.fetch_add(1, Ordering::SeqCst);
    }

    fn register_media_listener(&self, _listener: Arc<CastStatusListener>) {
        self.registrations.fetch_add(1, Ordering::SeqCst);
    }

    fn register_connection_listener(&self, _listener: Arc<CastStatusListener>) {
        self.registrations.fetch_add(1, Ordering::SeqCst);
    }
}

/// Descriptor for a standard (groupable) receiver.
pub fn receiver_info(uuid: Uuid) -> CastDeviceInfo {
    CastDeviceInfo {
        cast_type: Some(CastType::Receiver),
        manufacturer: Some("Google Inc.".into()),
        ..CastDeviceInfo::from_discovery(uuid, "Kitchen speaker", vec![])
    }
}

/// Descriptor for an audio group.
pub fn audio_group_info(uuid: Uuid) -> CastDeviceInfo {
    CastDeviceInfo {
        cast_type: Some(CastType::Group),
        manufacturer: Some("Google Inc.".into()),
        ..CastDeviceInfo::from_discovery(uuid, "Everywhere", vec![])
    }
}

pub fn media_status(player_state: PlayerState) -> MediaStatus {
    MediaStatus {
        player_state,
        content_id: Some("http://radio.example/stream".into()),
        current_time: Some(12.5),
        duration: None,
    }
}

/// Snapshot of everything the target has received so far.
pub fn recorded(target: &RecordingTarget) -> Vec<RecordedEvent> {
    target.events.lock().clone()
}
