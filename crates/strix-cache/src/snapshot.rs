//! Snapshot: per-node, per-type resource collections with deterministic
//! content versions.
//!
//! A snapshot holds one entry per [`ResourceType`]. Each entry maps
//! resource names to resources and carries a version string: the empty
//! string for an empty entry, otherwise a SHA-256 digest over the
//! name-sorted `(name, canonical_json)` pairs. Identical sets yield
//! identical versions regardless of construction order; any change to
//! membership or content changes the version.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use strix_core::{
    ResourceType, ResourceVersion, Result, StrixError, VersionTracker, RESOURCE_TYPE_COUNT,
};
use strix_resources::Resource;

/// One resource type's entry within a snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotResources {
    version: ResourceVersion,
    items: HashMap<String, Resource>,
}

impl SnapshotResources {
    /// The content version of this entry.
    #[inline]
    pub fn version(&self) -> &ResourceVersion {
        &self.version
    }

    /// Number of resources in this entry.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this entry holds no resources.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a resource by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.items.get(name)
    }

    /// Iterate over `(name, resource)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Resource)> {
        self.items.iter()
    }
}

/// An internally consistent, versioned resource set for one node.
///
/// Every [`ResourceType`] always has an entry, so per-type reads never
/// fail for a valid type. Snapshots installed in the cache are immutable;
/// mutation happens only on the instance being built by the reconciler.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: [SnapshotResources; RESOURCE_TYPE_COUNT],
}

impl Snapshot {
    /// Create an empty snapshot with an `(empty, "")` entry for every
    /// resource type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry for `rtype` with the given resources, recomputing
    /// its content version. Passing an empty list sets the version to the
    /// empty string, distinguishing "declared empty" from any non-empty
    /// set. Duplicate names keep the last occurrence.
    pub fn set_resources(
        &mut self,
        rtype: ResourceType,
        resources: Vec<Resource>,
    ) -> Result<&mut Self> {
        let mut items = HashMap::with_capacity(resources.len());
        for resource in resources {
            items.insert(resource.name().to_string(), resource);
        }
        let version = compute_version(&items)?;
        self.entries[rtype.index()] = SnapshotResources { version, items };
        Ok(self)
    }

    /// Read-only view of the resources of one type, keyed by name.
    #[inline]
    #[must_use]
    pub fn resources(&self, rtype: ResourceType) -> &HashMap<String, Resource> {
        &self.entries[rtype.index()].items
    }

    /// The full entry for one type.
    #[inline]
    #[must_use]
    pub fn entry(&self, rtype: ResourceType) -> &SnapshotResources {
        &self.entries[rtype.index()]
    }

    /// The content version of one type's entry.
    #[inline]
    #[must_use]
    pub fn version(&self, rtype: ResourceType) -> &ResourceVersion {
        &self.entries[rtype.index()].version
    }

    /// Override one type's version. Escape hatch for tests and bootstrap;
    /// normal reconciliation always goes through [`Snapshot::set_resources`].
    pub fn set_version(&mut self, rtype: ResourceType, version: ResourceVersion) {
        self.entries[rtype.index()].version = version;
    }

    /// Total number of resources across all types.
    #[must_use]
    pub fn total_resources(&self) -> usize {
        self.entries.iter().map(|e| e.len()).sum()
    }

    /// Whether the snapshot holds no resources at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_empty())
    }

    /// Whether any per-type version differs between `self` and `other`.
    #[must_use]
    pub fn differs_from(&self, other: &Snapshot) -> bool {
        ResourceType::ALL
            .into_iter()
            .any(|rtype| self.version(rtype) != other.version(rtype))
    }

    /// Per-type version projection for status reporting.
    #[must_use]
    pub fn version_tracker(&self) -> VersionTracker {
        VersionTracker::from_versions(|rtype| self.version(rtype).clone())
    }

    /// Verify the referential invariant: every route a listener references
    /// exists among the Route resources, and every endpoint assignment a
    /// cluster references exists among the Endpoint resources.
    ///
    /// This check is a diagnostic for callers; the reconciler does not gate
    /// cache writes on it.
    pub fn consistent(&self) -> Result<()> {
        let routes = self.resources(ResourceType::Route);
        for resource in self.resources(ResourceType::Listener).values() {
            if let Resource::Listener(listener) = resource {
                for route_name in listener.route_references() {
                    if !routes.contains_key(route_name) {
                        return Err(StrixError::validation(
                            format!("listeners/{}", listener.name),
                            route_name,
                            format!(
                                "listener '{}' references route '{}' which is not in the snapshot",
                                listener.name, route_name
                            ),
                        ));
                    }
                }
            }
        }

        let endpoints = self.resources(ResourceType::Endpoint);
        for resource in self.resources(ResourceType::Cluster).values() {
            if let Resource::Cluster(cluster) = resource {
                if let Some(target) = cluster.endpoint_reference() {
                    if !endpoints.contains_key(target) {
                        return Err(StrixError::validation(
                            format!("clusters/{}", cluster.name),
                            target,
                            format!(
                                "cluster '{}' references endpoints '{}' which are not in the snapshot",
                                cluster.name, target
                            ),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Hash the name-sorted `(name, canonical_json)` pairs of an entry.
fn compute_version(items: &HashMap<String, Resource>) -> Result<ResourceVersion> {
    if items.is_empty() {
        return Ok(ResourceVersion::empty());
    }

    let mut pairs = Vec::with_capacity(items.len());
    for (name, resource) in items {
        pairs.push((name.as_str(), resource.canonical_json()?));
    }
    pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut hasher = Sha256::new();
    for (name, json) in &pairs {
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(json.as_bytes());
        hasher.update([0u8]);
    }
    Ok(ResourceVersion::new(hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strix_resources::{
        Cluster, ClusterLoadAssignment, FilterChain, Listener, RouteConfiguration, UpstreamHost,
    };

    fn cluster(name: &str) -> Resource {
        Resource::Cluster(Cluster {
            name: name.to_string(),
            ..Cluster::default()
        })
    }

    fn endpoint(cluster_name: &str, hosts: &[(&str, u32)]) -> Resource {
        Resource::Endpoint(ClusterLoadAssignment {
            cluster_name: cluster_name.to_string(),
            endpoints: hosts
                .iter()
                .map(|(a, p)| UpstreamHost::new(*a, *p))
                .collect(),
        })
    }

    #[test]
    fn every_type_has_an_entry() {
        let snap = Snapshot::new();
        for rtype in ResourceType::ALL {
            assert!(snap.resources(rtype).is_empty());
            assert!(snap.version(rtype).is_empty());
        }
    }

    #[test]
    fn empty_entry_has_empty_version() {
        let mut snap = Snapshot::new();
        snap.set_resources(ResourceType::Cluster, vec![]).unwrap();
        assert_eq!(snap.version(ResourceType::Cluster).as_str(), "");
    }

    #[test]
    fn version_is_order_independent() {
        let mut a = Snapshot::new();
        a.set_resources(ResourceType::Cluster, vec![cluster("x"), cluster("y")])
            .unwrap();

        let mut b = Snapshot::new();
        b.set_resources(ResourceType::Cluster, vec![cluster("y"), cluster("x")])
            .unwrap();

        assert_eq!(a.version(ResourceType::Cluster), b.version(ResourceType::Cluster));
        assert!(!a.version(ResourceType::Cluster).is_empty());
    }

    #[test]
    fn version_is_change_sensitive() {
        let mut a = Snapshot::new();
        a.set_resources(
            ResourceType::Endpoint,
            vec![endpoint("foo", &[("10.0.0.1", 8080)])],
        )
        .unwrap();
        a.set_resources(ResourceType::Cluster, vec![cluster("foo")])
            .unwrap();

        let mut b = a.clone();
        b.set_resources(
            ResourceType::Endpoint,
            vec![endpoint("foo", &[("10.0.0.1", 9090)])],
        )
        .unwrap();

        assert_ne!(a.version(ResourceType::Endpoint), b.version(ResourceType::Endpoint));
        // Other types are untouched.
        assert_eq!(a.version(ResourceType::Cluster), b.version(ResourceType::Cluster));
        assert!(a.differs_from(&b));
    }

    #[test]
    fn membership_change_changes_version() {
        let mut a = Snapshot::new();
        a.set_resources(ResourceType::Cluster, vec![cluster("x")])
            .unwrap();
        let v1 = a.version(ResourceType::Cluster).clone();

        a.set_resources(ResourceType::Cluster, vec![cluster("x"), cluster("y")])
            .unwrap();
        assert_ne!(&v1, a.version(ResourceType::Cluster));
    }

    #[test]
    fn consistent_flags_missing_route() {
        let mut snap = Snapshot::new();
        snap.set_resources(
            ResourceType::Listener,
            vec![Resource::Listener(Listener {
                name: "https".to_string(),
                filter_chains: vec![FilterChain {
                    route_config_name: Some("r1".to_string()),
                    tls_secret_name: None,
                }],
                ..Listener::default()
            })],
        )
        .unwrap();

        let err = snap.consistent().unwrap_err();
        assert!(err.to_string().contains("r1"), "error must name the missing route: {err}");

        snap.set_resources(
            ResourceType::Route,
            vec![Resource::Route(RouteConfiguration {
                name: "r1".to_string(),
                virtual_hosts: vec![],
            })],
        )
        .unwrap();
        assert!(snap.consistent().is_ok());
    }

    #[test]
    fn consistent_flags_missing_endpoints() {
        let mut snap = Snapshot::new();
        snap.set_resources(
            ResourceType::Cluster,
            vec![Resource::Cluster(Cluster {
                name: "backend".to_string(),
                eds_service_name: Some("backend".to_string()),
                ..Cluster::default()
            })],
        )
        .unwrap();

        let err = snap.consistent().unwrap_err();
        assert!(err.to_string().contains("backend"));

        snap.set_resources(
            ResourceType::Endpoint,
            vec![endpoint("backend", &[("10.0.0.1", 8080)])],
        )
        .unwrap();
        assert!(snap.consistent().is_ok());
    }

    #[test]
    fn cross_type_name_collisions_allowed() {
        let mut snap = Snapshot::new();
        snap.set_resources(ResourceType::Cluster, vec![cluster("shared")])
            .unwrap();
        snap.set_resources(
            ResourceType::Endpoint,
            vec![endpoint("shared", &[("10.0.0.1", 80)])],
        )
        .unwrap();
        assert!(snap.consistent().is_ok());
        assert_eq!(snap.total_resources(), 2);
    }

    #[test]
    fn set_version_escape_hatch() {
        let mut snap = Snapshot::new();
        snap.set_version(ResourceType::Runtime, ResourceVersion::new("pinned"));
        assert_eq!(snap.version(ResourceType::Runtime).as_str(), "pinned");
    }

    #[test]
    fn version_tracker_projection() {
        let mut snap = Snapshot::new();
        snap.set_resources(ResourceType::Cluster, vec![cluster("foo")])
            .unwrap();
        let tracker = snap.version_tracker();
        assert_eq!(tracker.clusters, snap.version(ResourceType::Cluster).as_str());
        assert_eq!(tracker.endpoints, "");
    }
}
