//! Version tracking for snapshot resources.
//!
//! Versions are deterministic content hashes: identical resource sets yield
//! identical versions regardless of construction order, and any change to
//! membership or content changes the version. The empty version
//! distinguishes "declared empty" from any non-empty set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ResourceType;

/// Content-addressable version of one resource type's entry in a snapshot.
///
/// An empty version represents a type with zero resources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceVersion(String);

impl ResourceVersion {
    /// Create a version from a computed hash string.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// The empty version (type declared with zero resources).
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether this is the empty version.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ResourceVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceVersion {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ResourceVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Read-only projection of a snapshot's per-type versions, surfaced to
/// status-reporting collaborators.
///
/// Virtual hosts are intentionally untracked: they are delivered inline
/// with routes and have no independent status field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionTracker {
    /// Version of the Endpoint entry.
    pub endpoints: String,
    /// Version of the Cluster entry.
    pub clusters: String,
    /// Version of the Route entry.
    pub routes: String,
    /// Version of the ScopedRoute entry.
    pub scoped_routes: String,
    /// Version of the Listener entry.
    pub listeners: String,
    /// Version of the Secret entry.
    pub secrets: String,
    /// Version of the Runtime entry.
    pub runtimes: String,
    /// Version of the ExtensionConfig entry.
    pub extension_configs: String,
}

impl VersionTracker {
    /// Build a tracker from a per-type version lookup function.
    pub fn from_versions<F>(mut version_of: F) -> Self
    where
        F: FnMut(ResourceType) -> ResourceVersion,
    {
        Self {
            endpoints: version_of(ResourceType::Endpoint).into_inner(),
            clusters: version_of(ResourceType::Cluster).into_inner(),
            routes: version_of(ResourceType::Route).into_inner(),
            scoped_routes: version_of(ResourceType::ScopedRoute).into_inner(),
            listeners: version_of(ResourceType::Listener).into_inner(),
            secrets: version_of(ResourceType::Secret).into_inner(),
            runtimes: version_of(ResourceType::Runtime).into_inner(),
            extension_configs: version_of(ResourceType::ExtensionConfig).into_inner(),
        }
    }
}
