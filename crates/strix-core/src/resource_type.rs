//! The closed set of discovery resource kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of resource kinds known to the control plane.
pub const RESOURCE_TYPE_COUNT: usize = 9;

/// Abstract resource kind, independent of the protocol version that
/// identifies it on the wire.
///
/// All type-indexed lookups (type URLs, snapshot entries, reconciler
/// buckets) go through this enum. The set is closed: a definition naming a
/// kind outside it fails to parse rather than reaching the reconciler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    /// Aggregated endpoint lists (EDS).
    Endpoint,
    /// Upstream clusters (CDS).
    Cluster,
    /// Route configurations (RDS).
    Route,
    /// Scoped route configurations (SRDS).
    ScopedRoute,
    /// Virtual hosts (VHDS).
    VirtualHost,
    /// Listeners (LDS).
    Listener,
    /// TLS secrets (SDS).
    Secret,
    /// Runtime layers (RTDS).
    Runtime,
    /// Typed extension configs (ECDS).
    ExtensionConfig,
}

impl ResourceType {
    /// All resource kinds, in stable order. Snapshot entries and version
    /// comparisons iterate in this order.
    pub const ALL: [ResourceType; RESOURCE_TYPE_COUNT] = [
        ResourceType::Endpoint,
        ResourceType::Cluster,
        ResourceType::Route,
        ResourceType::ScopedRoute,
        ResourceType::VirtualHost,
        ResourceType::Listener,
        ResourceType::Secret,
        ResourceType::Runtime,
        ResourceType::ExtensionConfig,
    ];

    /// Dense index of this kind, used for array-backed per-type storage.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ResourceType::Endpoint => 0,
            ResourceType::Cluster => 1,
            ResourceType::Route => 2,
            ResourceType::ScopedRoute => 3,
            ResourceType::VirtualHost => 4,
            ResourceType::Listener => 5,
            ResourceType::Secret => 6,
            ResourceType::Runtime => 7,
            ResourceType::ExtensionConfig => 8,
        }
    }

    /// Short human-readable name for logs and error messages.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            ResourceType::Endpoint => "Endpoint",
            ResourceType::Cluster => "Cluster",
            ResourceType::Route => "Route",
            ResourceType::ScopedRoute => "ScopedRoute",
            ResourceType::VirtualHost => "VirtualHost",
            ResourceType::Listener => "Listener",
            ResourceType::Secret => "Secret",
            ResourceType::Runtime => "Runtime",
            ResourceType::ExtensionConfig => "ExtensionConfig",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Discovery protocol API version.
///
/// Only v3 is implemented. The Serializer and Generator factories take the
/// version so a future revision slots in without touching the reconciler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Envoy xDS v3.
    #[default]
    V3,
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::V3 => f.write_str("v3"),
        }
    }
}
