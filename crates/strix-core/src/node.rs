//! Node identification.
//!
//! This module provides [`NodeId`], the identity under which a connected
//! agent's configuration snapshot is tracked in the cache.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a connected agent ("node").
///
/// Node IDs are opaque strings supplied by the external reconciliation
/// loop. The cache hashes them with FNV-1a for fast, well-distributed
/// lookups (see `strix-cache`).
///
/// # Example
///
/// ```rust
/// use strix_core::NodeId;
///
/// let node = NodeId::new("sidecar-proxy-7f9c");
/// assert_eq!(node.as_str(), "sidecar-proxy-7f9c");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node ID from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the node ID as a string slice.
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

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
