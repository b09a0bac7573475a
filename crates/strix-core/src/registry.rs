//! Registry of resource kinds known to the control plane.
//!
//! The registry provides string-indexed lookups (type URL → kind metadata)
//! for callers that receive type identifiers off the wire. Enum-indexed
//! lookups go directly through [`TypeUrl::of`].

use std::collections::HashMap;

use crate::{ApiVersion, ResourceType, StrixError, TypeUrl};

/// Metadata about a registered resource kind.
#[derive(Debug, Clone)]
pub struct ResourceTypeInfo {
    /// The abstract resource kind.
    pub resource_type: ResourceType,
    /// The protocol type URL identifying it.
    pub type_url: String,
    /// Short name for logs.
    pub short_name: &'static str,
    /// Description of the discovery service serving it.
    pub description: &'static str,
}

/// Stable mapping between abstract resource kinds and protocol-specific
/// type identifiers.
#[derive(Debug)]
pub struct ResourceTypeRegistry {
    version: ApiVersion,
    by_url: HashMap<String, ResourceTypeInfo>,
}

impl ResourceTypeRegistry {
    /// Create a registry populated with every kind the given API version
    /// knows about.
    #[must_use]
    pub fn new(version: ApiVersion) -> Self {
        let mut by_url = HashMap::with_capacity(ResourceType::ALL.len());
        for rtype in ResourceType::ALL {
            let info = ResourceTypeInfo {
                resource_type: rtype,
                type_url: TypeUrl::str_of(rtype, version).to_string(),
                short_name: rtype.short_name(),
                description: describe(rtype),
            };
            by_url.insert(info.type_url.clone(), info);
        }
        Self { version, by_url }
    }

    /// The API version this registry maps for.
    #[inline]
    #[must_use]
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Look up kind metadata by type URL.
    #[must_use]
    pub fn get(&self, type_url: &str) -> Option<&ResourceTypeInfo> {
        self.by_url.get(type_url)
    }

    /// Look up kind metadata by resource kind.
    #[must_use]
    pub fn get_by_type(&self, rtype: ResourceType) -> &ResourceTypeInfo {
        // Every kind is inserted in new(), so the lookup cannot miss.
        &self.by_url[TypeUrl::str_of(rtype, self.version)]
    }

    /// Check whether a type URL is registered.
    #[must_use]
    pub fn contains(&self, type_url: &str) -> bool {
        self.by_url.contains_key(type_url)
    }

    /// All registered type URLs.
    #[must_use]
    pub fn type_urls(&self) -> Vec<&str> {
        self.by_url.keys().map(String::as_str).collect()
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }

    /// Validate that a type URL is registered, with a descriptive error
    /// listing the known URLs when it is not.
    pub fn validate(&self, type_url: &str) -> Result<(), StrixError> {
        if self.contains(type_url) {
            Ok(())
        } else {
            let mut known = self.type_urls();
            known.sort_unstable();
            Err(StrixError::internal(format!(
                "unknown resource type URL '{}', known: {:?}",
                type_url, known
            )))
        }
    }
}

impl Default for ResourceTypeRegistry {
    fn default() -> Self {
        Self::new(ApiVersion::V3)
    }
}

fn describe(rtype: ResourceType) -> &'static str {
    match rtype {
        ResourceType::Endpoint => "Endpoint Discovery Service (EDS)",
        ResourceType::Cluster => "Cluster Discovery Service (CDS)",
        ResourceType::Route => "Route Discovery Service (RDS)",
        ResourceType::ScopedRoute => "Scoped Route Discovery Service (SRDS)",
        ResourceType::VirtualHost => "Virtual Host Discovery Service (VHDS)",
        ResourceType::Listener => "Listener Discovery Service (LDS)",
        ResourceType::Secret => "Secret Discovery Service (SDS)",
        ResourceType::Runtime => "Runtime Discovery Service (RTDS)",
        ResourceType::ExtensionConfig => "Extension Config Discovery Service (ECDS)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_all_kinds() {
        let registry = ResourceTypeRegistry::default();
        assert_eq!(registry.len(), ResourceType::ALL.len());
        for rtype in ResourceType::ALL {
            let info = registry.get_by_type(rtype);
            assert_eq!(info.resource_type, rtype);
            assert!(registry.contains(&info.type_url));
        }
    }

    #[test]
    fn lookup_by_url() {
        let registry = ResourceTypeRegistry::default();
        let info = registry.get(TypeUrl::SECRET).unwrap();
        assert_eq!(info.resource_type, ResourceType::Secret);
        assert_eq!(info.short_name, "Secret");
    }

    #[test]
    fn validate_unknown_url() {
        let registry = ResourceTypeRegistry::default();
        let err = registry.validate("type.googleapis.com/acme.Widget").unwrap_err();
        assert!(err.to_string().contains("unknown resource type URL"));
    }
}
