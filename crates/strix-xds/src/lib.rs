//! # strix-xds
//!
//! Declarative snapshot cache and reconciliation engine for xDS-style
//! control planes.
//!
//! This library converts declarative configuration resources into
//! versioned, internally consistent snapshots served to remote proxy
//! agents. It provides:
//!
//! - A node-keyed snapshot cache with content-addressable per-type versions
//! - A reconciliation engine that rebuilds a node's snapshot from its
//!   declared definitions and writes through only on change
//! - Resource schemas, wire encodings and version-polymorphic generation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strix_xds::prelude::*;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(SnapshotCache::new());
//! let reconciler = CacheReconciler::new(
//!     Arc::clone(&cache) as Arc<dyn Cache>,
//!     Serialization::Yaml,
//!     ApiVersion::V3,
//!     resolver,
//!     secrets,
//! );
//!
//! let tracker = reconciler
//!     .reconcile(&NodeId::new("node-1"), "default", &definitions, "rev-1", &token)
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! This library is organized into several crates:
//!
//! - `strix-core` - Core types, errors and the resource-type registry
//! - `strix-resources` - Resource schemas, serialization and generation
//! - `strix-cache` - Snapshot cache with watch notifications
//! - `strix-reconciler` - The reconciliation engine
//!
//! This crate (`strix-xds`) re-exports all public APIs for convenience.
//!
//! ## Design Principles
//!
//! 1. **No panics in library code** - All errors are returned as `Result`
//! 2. **No partial snapshots** - A reconciliation commits everything or
//!    nothing
//! 3. **Deterministic versions** - Content hashes are independent of
//!    construction order
//! 4. **Observable** - Built-in tracing and cache statistics

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Re-export all sub-crates
pub use strix_cache as cache;
pub use strix_core as core;
pub use strix_reconciler as reconciler;
pub use strix_resources as resources;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use strix_xds::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use strix_core::{
        reason_for_error, ApiVersion, ErrorReason, NodeId, ResourceType, ResourceTypeRegistry,
        ResourceVersion, StrixError, TypeUrl, VersionTracker,
    };

    // Resource types
    pub use strix_resources::{
        generator, marshaller, unmarshaller, Generator, Resource, Serialization, UpstreamHost,
    };

    // Cache types
    pub use strix_cache::{Cache, CacheStats, Snapshot, SnapshotCache, Watch, WatchId};

    // Reconciler types
    pub use strix_reconciler::{
        Blueprint, CacheReconciler, EndpointResolver, ResourceDefinition, SecretLookup,
        SecretMaterial,
    };
}

/// Version information for this crate.
pub mod version {
    /// Crate version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Minimum supported Rust version.
    pub const MSRV: &str = "1.75";

    /// Get version info as a string.
    pub fn version_string() -> String {
        format!("strix-xds {} (MSRV {})", VERSION, MSRV)
    }
}
