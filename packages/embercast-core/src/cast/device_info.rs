//! Immutable cast device descriptors.
//!
//! A [`CastDeviceInfo`] is a value snapshot of a device's identity as seen by
//! discovery. Discovery data often lacks the cast type and manufacturer, and
//! never says whether an audio group is a dynamic group;
//! [`CastDeviceInfo::fill_out_missing`] completes those fields with blocking
//! HTTP queries, producing a new descriptor rather than mutating the old one.
//! Fresh discovery data for the same UUID supersedes the whole descriptor.

use serde::Serialize;
use uuid::Uuid;

use crate::cast::dial::{DialClient, DialResult};
use crate::context::{CastService, DiscoveryContext};

/// Classification of a cast device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CastType {
    /// Standard receiver with a display (Chromecast, smart display).
    Receiver,
    /// Audio-only receiver (Chromecast Audio, smart speaker).
    Audio,
    /// Speaker group (multi-device audio zone).
    Group,
}

/// Immutable snapshot of a cast device's identity and capabilities.
///
/// Compared by value; two descriptors for the same device with the same data
/// are equal regardless of where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastDeviceInfo {
    /// Unique device identifier.
    pub uuid: Uuid,
    /// Human-friendly name from discovery data.
    pub friendly_name: String,
    /// Device classification; `None` until resolved.
    pub cast_type: Option<CastType>,
    /// Manufacturer string; `None` until resolved.
    pub manufacturer: Option<String>,
    /// Network services advertised by discovery for this device.
    pub services: Vec<CastService>,
    /// Whether this audio group is a dynamic group.
    ///
    /// `None` means not yet determined; only ever set for audio groups.
    pub is_dynamic_group: Option<bool>,
}

impl CastDeviceInfo {
    /// Creates a descriptor from raw discovery data.
    ///
    /// Cast type and manufacturer stay unknown until
    /// [`fill_out_missing`](Self::fill_out_missing) resolves them.
    pub fn from_discovery(
        uuid: Uuid,
        friendly_name: impl Into<String>,
        services: Vec<CastService>,
    ) -> Self {
        Self {
            uuid,
            friendly_name: friendly_name.into(),
            cast_type: None,
            manufacturer: None,
            services,
            is_dynamic_group: None,
        }
    }

    /// Returns the human-friendly device name.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    /// Returns the unique device identifier.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns whether the device is an audio group.
    #[must_use]
    pub fn is_audio_group(&self) -> bool {
        self.cast_type == Some(CastType::Group)
    }

    /// Returns a new descriptor with missing attributes filled in.
    ///
    /// Performs blocking HTTP queries; run this off any latency-sensitive
    /// scheduling context.
    ///
    /// Capability-query failures propagate to the caller (retry policy is
    /// theirs). A missing or failed group-status response resolves
    /// `is_dynamic_group` to `false`: absence of group info means "not a
    /// dynamic group", not "unknown".
    pub fn fill_out_missing(
        &self,
        dial: &dyn DialClient,
        ctx: &DiscoveryContext,
    ) -> DialResult<CastDeviceInfo> {
        let mut cast_type = self.cast_type;
        let mut manufacturer = self.manufacturer.clone();

        if cast_type.is_none() || manufacturer.is_none() {
            // Not available in discovery data, resolve over HTTP.
            let caps = dial.resolve_cast_type(self, ctx)?;
            cast_type = Some(caps.cast_type);
            manufacturer = caps.manufacturer;
        }

        if !self.is_audio_group() || self.is_dynamic_group.is_some() {
            // All information present, no group-status query needed.
            return Ok(CastDeviceInfo {
                cast_type,
                manufacturer,
                ..self.clone()
            });
        }

        let is_dynamic_group = match dial.multizone_status(&self.services, ctx) {
            Ok(Some(status)) => status.dynamic_groups.iter().any(|g| g.uuid == self.uuid),
            Ok(None) => false,
            Err(err) => {
                log::debug!(
                    "[CastInfo] Group status query failed for {}: {}",
                    self.uuid,
                    err
                );
                false
            }
        };

        Ok(CastDeviceInfo {
            cast_type,
            manufacturer,
            is_dynamic_group: Some(is_dynamic_group),
            ..self.clone()
        })
    }
}
