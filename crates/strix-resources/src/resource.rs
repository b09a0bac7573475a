//! The [`Resource`] enum tying every concrete schema to its kind.

use serde::ser::{Serialize, Serializer};
use strix_core::{ApiVersion, ResourceType, StrixError, TypeUrl};

use crate::types::{
    Cluster, ClusterLoadAssignment, Listener, RouteConfiguration, Runtime,
    ScopedRouteConfiguration, Secret, TypedExtensionConfig, VirtualHost,
};

/// A protocol resource of one of the nine known kinds.
///
/// Every resource has a name unique within `(node, kind)` and serializes
/// deterministically to canonical JSON for content hashing.
#[derive(Clone, Debug, PartialEq)]
pub enum Resource {
    /// An aggregated endpoint list.
    Endpoint(ClusterLoadAssignment),
    /// An upstream cluster.
    Cluster(Cluster),
    /// A route configuration.
    Route(RouteConfiguration),
    /// A scoped route configuration.
    ScopedRoute(ScopedRouteConfiguration),
    /// A virtual host.
    VirtualHost(VirtualHost),
    /// A listener.
    Listener(Listener),
    /// A TLS secret.
    Secret(Secret),
    /// A runtime layer.
    Runtime(Runtime),
    /// A typed extension config.
    ExtensionConfig(TypedExtensionConfig),
}

impl Resource {
    /// The kind of this resource.
    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Endpoint(_) => ResourceType::Endpoint,
            Resource::Cluster(_) => ResourceType::Cluster,
            Resource::Route(_) => ResourceType::Route,
            Resource::ScopedRoute(_) => ResourceType::ScopedRoute,
            Resource::VirtualHost(_) => ResourceType::VirtualHost,
            Resource::Listener(_) => ResourceType::Listener,
            Resource::Secret(_) => ResourceType::Secret,
            Resource::Runtime(_) => ResourceType::Runtime,
            Resource::ExtensionConfig(_) => ResourceType::ExtensionConfig,
        }
    }

    /// The resource name, unique within `(node, kind)`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Resource::Endpoint(r) => &r.cluster_name,
            Resource::Cluster(r) => &r.name,
            Resource::Route(r) => &r.name,
            Resource::ScopedRoute(r) => &r.name,
            Resource::VirtualHost(r) => &r.name,
            Resource::Listener(r) => &r.name,
            Resource::Secret(r) => &r.name,
            Resource::Runtime(r) => &r.name,
            Resource::ExtensionConfig(r) => &r.name,
        }
    }

    /// Serialize to canonical JSON: map keys sorted lexicographically so
    /// that equal values always produce equal text. This is the hashing
    /// representation.
    pub fn canonical_json(&self) -> Result<String, StrixError> {
        // serde_json::Value stores objects in a BTreeMap, which sorts keys.
        let value = serde_json::to_value(self).map_err(|e| StrixError::Encode {
            type_url: TypeUrl::str_of(self.resource_type(), ApiVersion::V3).to_string(),
            message: e.to_string(),
        })?;
        serde_json::to_string(&value).map_err(|e| StrixError::Encode {
            type_url: TypeUrl::str_of(self.resource_type(), ApiVersion::V3).to_string(),
            message: e.to_string(),
        })
    }

    /// Decode a resource of the given kind from a JSON value.
    pub fn from_json_value(
        rtype: ResourceType,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match rtype {
            ResourceType::Endpoint => Resource::Endpoint(serde_json::from_value(value)?),
            ResourceType::Cluster => Resource::Cluster(serde_json::from_value(value)?),
            ResourceType::Route => Resource::Route(serde_json::from_value(value)?),
            ResourceType::ScopedRoute => Resource::ScopedRoute(serde_json::from_value(value)?),
            ResourceType::VirtualHost => Resource::VirtualHost(serde_json::from_value(value)?),
            ResourceType::Listener => Resource::Listener(serde_json::from_value(value)?),
            ResourceType::Secret => Resource::Secret(serde_json::from_value(value)?),
            ResourceType::Runtime => Resource::Runtime(serde_json::from_value(value)?),
            ResourceType::ExtensionConfig => {
                Resource::ExtensionConfig(serde_json::from_value(value)?)
            }
        })
    }
}

// Resources serialize as their inner schema; the kind is carried out of
// band (snapshot entry, type URL), never in the payload.
impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Resource::Endpoint(r) => r.serialize(serializer),
            Resource::Cluster(r) => r.serialize(serializer),
            Resource::Route(r) => r.serialize(serializer),
            Resource::ScopedRoute(r) => r.serialize(serializer),
            Resource::VirtualHost(r) => r.serialize(serializer),
            Resource::Listener(r) => r.serialize(serializer),
            Resource::Secret(r) => r.serialize(serializer),
            Resource::Runtime(r) => r.serialize(serializer),
            Resource::ExtensionConfig(r) => r.serialize(serializer),
        }
    }
}
