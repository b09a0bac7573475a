//! Protocol type identifiers.
//!
//! Type URLs identify the concrete wire schema of resources for a given
//! [`ApiVersion`]. This module carries the stable mapping between
//! [`ResourceType`] and v3 type URLs.

use std::fmt;

use crate::{ApiVersion, ResourceType};

/// Type URL wrapper for discovery resource types.
///
/// # Example
///
/// ```rust
/// use strix_core::{ApiVersion, ResourceType, TypeUrl};
///
/// let url = TypeUrl::of(ResourceType::Cluster, ApiVersion::V3);
/// assert_eq!(url.short_name(), "Cluster");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeUrl(String);

impl TypeUrl {
    /// Type URL for ClusterLoadAssignment (EDS).
    pub const ENDPOINT: &'static str =
        "type.googleapis.com/envoy.config.endpoint.v3.ClusterLoadAssignment";

    /// Type URL for Cluster (CDS).
    pub const CLUSTER: &'static str = "type.googleapis.com/envoy.config.cluster.v3.Cluster";

    /// Type URL for RouteConfiguration (RDS).
    pub const ROUTE: &'static str =
        "type.googleapis.com/envoy.config.route.v3.RouteConfiguration";

    /// Type URL for ScopedRouteConfiguration (SRDS).
    pub const SCOPED_ROUTE: &'static str =
        "type.googleapis.com/envoy.config.route.v3.ScopedRouteConfiguration";

    /// Type URL for VirtualHost (VHDS).
    pub const VIRTUAL_HOST: &'static str =
        "type.googleapis.com/envoy.config.route.v3.VirtualHost";

    /// Type URL for Listener (LDS).
    pub const LISTENER: &'static str = "type.googleapis.com/envoy.config.listener.v3.Listener";

    /// Type URL for Secret (SDS).
    pub const SECRET: &'static str =
        "type.googleapis.com/envoy.extensions.transport_sockets.tls.v3.Secret";

    /// Type URL for Runtime (RTDS).
    pub const RUNTIME: &'static str = "type.googleapis.com/envoy.service.runtime.v3.Runtime";

    /// Type URL for TypedExtensionConfig (ECDS).
    pub const EXTENSION_CONFIG: &'static str =
        "type.googleapis.com/envoy.config.core.v3.TypedExtensionConfig";

    /// Create a type URL from a string.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The type URL identifying `rtype` in the given API version.
    #[must_use]
    pub fn of(rtype: ResourceType, version: ApiVersion) -> Self {
        Self(Self::str_of(rtype, version).to_string())
    }

    /// Static string form of [`TypeUrl::of`].
    #[must_use]
    pub fn str_of(rtype: ResourceType, version: ApiVersion) -> &'static str {
        match version {
            ApiVersion::V3 => match rtype {
                ResourceType::Endpoint => Self::ENDPOINT,
                ResourceType::Cluster => Self::CLUSTER,
                ResourceType::Route => Self::ROUTE,
                ResourceType::ScopedRoute => Self::SCOPED_ROUTE,
                ResourceType::VirtualHost => Self::VIRTUAL_HOST,
                ResourceType::Listener => Self::LISTENER,
                ResourceType::Secret => Self::SECRET,
                ResourceType::Runtime => Self::RUNTIME,
                ResourceType::ExtensionConfig => Self::EXTENSION_CONFIG,
            },
        }
    }

    /// Reverse mapping: resource kind identified by this URL in the given
    /// API version, if any.
    #[must_use]
    pub fn resource_type(&self, version: ApiVersion) -> Option<ResourceType> {
        ResourceType::ALL
            .into_iter()
            .find(|rtype| Self::str_of(*rtype, version) == self.0)
    }

    /// Get the type URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the short name from the type URL.
    ///
    /// For example, `type.googleapis.com/envoy.config.cluster.v3.Cluster`
    /// returns `Cluster`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit('/')
            .next()
            .and_then(|s| s.rsplit('.').next())
            .unwrap_or(&self.0)
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TypeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TypeUrl {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TypeUrl {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TypeUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_covers_every_kind() {
        for rtype in ResourceType::ALL {
            let url = TypeUrl::of(rtype, ApiVersion::V3);
            assert!(url.as_str().starts_with("type.googleapis.com/"));
            assert_eq!(url.resource_type(ApiVersion::V3), Some(rtype));
        }
    }

    #[test]
    fn short_name() {
        let url = TypeUrl::of(ResourceType::Endpoint, ApiVersion::V3);
        assert_eq!(url.short_name(), "ClusterLoadAssignment");
    }

    #[test]
    fn unknown_url_has_no_kind() {
        let url = TypeUrl::new("type.googleapis.com/acme.Widget");
        assert_eq!(url.resource_type(ApiVersion::V3), None);
    }
}
