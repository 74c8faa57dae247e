//! Discovery configuration threaded through device-metadata queries.
//!
//! This module provides [`DiscoveryContext`], an explicitly passed handle that
//! replaces hidden process-wide discovery state. Anything that needs to reach
//! a device over its advertised services (capability queries, group-status
//! queries) takes a context parameter, which keeps tests hermetic and makes
//! the dependency visible in the call chain.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;

/// An advertised network service record for a cast device.
///
/// Discovery yields one or more of these per device. Host records carry a
/// directly reachable address; mDNS records are instance names that only the
/// discovery transport can resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CastService {
    /// Host and port advertised directly in discovery data.
    Host(SocketAddr),
    /// mDNS service instance name (e.g. `Living-Room-abcd._googlecast._tcp.local.`).
    Mdns(String),
}

/// Trait for resolving advertised service records to reachable addresses.
///
/// Different environments need different strategies: a hub with a live mDNS
/// browser can resolve instance names, a headless tool may only handle host
/// records. This trait allows injecting the appropriate resolver.
pub trait ServiceResolver: Send + Sync {
    /// Resolves a single service record, or `None` if it cannot be resolved.
    fn resolve(&self, service: &CastService) -> Option<SocketAddr>;
}

/// Default resolver handling [`CastService::Host`] records only.
///
/// mDNS instance names are skipped; resolving those belongs to whichever
/// component owns the discovery transport.
#[derive(Debug, Clone, Default)]
pub struct HostResolver;

impl HostResolver {
    /// Creates a new `HostResolver`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates a new `HostResolver` wrapped in an Arc.
    #[must_use]
    pub fn arc() -> Arc<dyn ServiceResolver> {
        Arc::new(Self::new())
    }
}

impl ServiceResolver for HostResolver {
    fn resolve(&self, service: &CastService) -> Option<SocketAddr> {
        match service {
            CastService::Host(addr) => Some(*addr),
            CastService::Mdns(_) => None,
        }
    }
}

/// Discovery configuration shared by device-metadata queries.
///
/// Passed explicitly into every call that touches the network on a device's
/// behalf. Construct once at hub startup and clone freely; clones share the
/// underlying resolver.
#[derive(Clone)]
pub struct DiscoveryContext {
    resolver: Arc<dyn ServiceResolver>,
}

impl DiscoveryContext {
    /// Creates a context with the given resolver.
    pub fn new(resolver: Arc<dyn ServiceResolver>) -> Self {
        Self { resolver }
    }

    /// Creates a context backed by the default [`HostResolver`].
    #[must_use]
    pub fn with_host_resolver() -> Self {
        Self::new(HostResolver::arc())
    }

    /// Resolves a single service record.
    #[must_use]
    pub fn resolve(&self, service: &CastService) -> Option<SocketAddr> {
        self.resolver.resolve(service)
    }

    /// Returns the first resolvable address among the advertised services.
    ///
    /// Service order follows discovery order, so the first hit is the record
    /// the device advertised most directly.
    #[must_use]
    pub fn resolve_any(&self, services: &[CastService]) -> Option<SocketAddr> {
        services.iter().find_map(|s| self.resolve(s))
    }
}
