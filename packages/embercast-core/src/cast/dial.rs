//! Blocking device capability and group-status queries.
//!
//! Cast devices expose a small HTTP setup API ("eureka") next to the cast
//! socket. Discovery data lacks the cast type and manufacturer, and says
//! nothing about dynamic groups; this module fills those gaps.
//!
//! All queries here block the calling thread by design. Run them off any
//! async scheduling context (e.g. `tokio::task::spawn_blocking`).

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::cast::device_info::{CastDeviceInfo, CastType};
use crate::context::{CastService, DiscoveryContext};

/// Port the eureka setup API listens on, independent of the advertised
/// cast socket port.
const EUREKA_PORT: u16 = 8008;

/// Per-request deadline for blocking device queries.
const DIAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from blocking device queries.
#[derive(Debug, Error)]
pub enum DialError {
    /// None of the device's advertised services could be resolved to an
    /// address.
    #[error("no resolvable service for device")]
    Unreachable,

    /// HTTP request to the device failed.
    #[error("device request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered with a payload we could not interpret.
    #[error("malformed device response: {0}")]
    Malformed(String),
}

/// Convenient Result alias for device queries.
pub type DialResult<T> = Result<T, DialError>;

/// Capabilities resolved from the device's setup API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Resolved device classification.
    pub cast_type: CastType,
    /// Manufacturer string, when the device reports one.
    pub manufacturer: Option<String>,
}

/// Group-status answer from a device's setup API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultizoneStatus {
    /// Dynamic groups known to the queried device.
    pub dynamic_groups: Vec<MultizoneGroup>,
}

/// A single dynamic group entry in a [`MultizoneStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultizoneGroup {
    /// UUID of the group device.
    pub uuid: Uuid,
    /// Group name, when reported.
    pub name: Option<String>,
}

/// Trait for blocking device capability and group-status queries.
///
/// Descriptor completion depends on this trait rather than a concrete HTTP
/// client so tests can stay off the network.
pub trait DialClient: Send + Sync {
    /// Resolves the device's cast type and manufacturer.
    fn resolve_cast_type(
        &self,
        info: &CastDeviceInfo,
        ctx: &DiscoveryContext,
    ) -> DialResult<DeviceCapabilities>;

    /// Queries group status over the device's advertised services.
    ///
    /// Returns `Ok(None)` when the device answers but reports no multizone
    /// data at all.
    fn multizone_status(
        &self,
        services: &[CastService],
        ctx: &DiscoveryContext,
    ) -> DialResult<Option<MultizoneStatus>>;
}

/// [`DialClient`] over the device's `/setup/eureka_info` HTTP endpoint.
pub struct EurekaDialClient {
    http: reqwest::blocking::Client,
}

impl EurekaDialClient {
    /// Creates a client with the standard query timeout.
    pub fn new() -> DialResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(DIAL_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    fn eureka_url(addr: SocketAddr, params: &str) -> String {
        format!(
            "http://{}:{}/setup/eureka_info?params={}",
            addr.ip(),
            EUREKA_PORT,
            params
        )
    }

    fn get(&self, addr: SocketAddr, params: &str) -> DialResult<String> {
        let url = Self::eureka_url(addr, params);
        log::debug!("[Dial] GET {}", url);
        let response = self.http.get(&url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

impl DialClient for EurekaDialClient {
    fn resolve_cast_type(
        &self,
        info: &CastDeviceInfo,
        ctx: &DiscoveryContext,
    ) -> DialResult<DeviceCapabilities> {
        let addr = ctx.resolve_any(&info.services).ok_or(DialError::Unreachable)?;
        let body = self.get(addr, "device_info")?;
        decode_capabilities(&body)
    }

    fn multizone_status(
        &self,
        services: &[CastService],
        ctx: &DiscoveryContext,
    ) -> DialResult<Option<MultizoneStatus>> {
        let addr = ctx.resolve_any(services).ok_or(DialError::Unreachable)?;
        let body = self.get(addr, "multizone")?;
        decode_multizone(&body)
    }
}

#[derive(Deserialize)]
struct EurekaResponse {
    device_info: Option<EurekaDeviceInfo>,
    multizone: Option<EurekaMultizone>,
}

#[derive(Deserialize)]
struct EurekaDeviceInfo {
    manufacturer: Option<String>,
    #[serde(default)]
    capabilities: EurekaCapabilities,
}

#[derive(Deserialize)]
struct EurekaCapabilities {
    // Devices without a display omit the field but still mean "audio only"
    // when it is false.
    #[serde(default = "default_display_supported")]
    display_supported: bool,
}

// Covers the whole capabilities object being absent: same answer as an
// absent display_supported field.
impl Default for EurekaCapabilities {
    fn default() -> Self {
        Self {
            display_supported: default_display_supported(),
        }
    }
}

fn default_display_supported() -> bool {
    true
}

#[derive(Deserialize)]
struct EurekaMultizone {
    #[serde(default)]
    dynamic_groups: Vec<EurekaGroup>,
}

#[derive(Deserialize)]
struct EurekaGroup {
    uuid: String,
    name: Option<String>,
}

fn decode_body(body: &str) -> DialResult<EurekaResponse> {
    serde_json::from_str(body).map_err(|e| DialError::Malformed(e.to_string()))
}

fn decode_capabilities(body: &str) -> DialResult<DeviceCapabilities> {
    let response = decode_body(body)?;
    let device_info = response
        .device_info
        .ok_or_else(|| DialError::Malformed("missing device_info".into()))?;
    // Groups are classified by discovery data; the setup API only
    // distinguishes display-capable receivers from audio-only devices.
    let cast_type = if device_info.capabilities.display_supported {
        CastType::Receiver
    } else {
        CastType::Audio
    };
    Ok(DeviceCapabilities {
        cast_type,
        manufacturer: device_info.manufacturer,
    })
}

fn decode_multizone(body: &str) -> DialResult<Option<MultizoneStatus>> {
    let response = decode_body(body)?;
    let Some(multizone) = response.multizone else {
        return Ok(None);
    };
    let mut dynamic_groups = Vec::with_capacity(multizone.dynamic_groups.len());
    for group in multizone.dynamic_groups {
        match Uuid::parse_str(&group.uuid) {
            Ok(uuid) => dynamic_groups.push(MultizoneGroup {
                uuid,
                name: group.name,
            }),
            Err(_) => {
                log::warn!("[Dial] Skipping dynamic group with bad uuid {:?}", group.uuid);
            }
        }
    }
    Ok(Some(MultizoneStatus { dynamic_groups }))
}
