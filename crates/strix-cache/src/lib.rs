//! # strix-cache
//!
//! Node-keyed snapshot cache with content-addressable versioning.
//!
//! This crate provides the caching layer of the control plane:
//!
//! - [`Snapshot`] - Per-node, per-type resource collections with
//!   deterministic content versions
//! - [`Cache`] / [`SnapshotCache`] - Concurrent node → snapshot store
//! - [`Watch`] - Subscription system the transport uses to observe
//!   snapshot replacement
//!
//! ## Key Design Decisions
//!
//! - Uses `DashMap` with an FNV hasher for concurrent per-node access;
//!   operations on distinct nodes never contend
//! - Installed snapshots are immutable (`Arc<Snapshot>`) and replaced
//!   wholesale; a reader never observes a half-written snapshot
//! - Per-type versions are SHA-256 digests over the name-sorted canonical
//!   JSON of the type's resources; the empty set hashes to `""`

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod snapshot;
mod stats;
mod watch;

pub use cache::{Cache, SnapshotCache};
pub use snapshot::{Snapshot, SnapshotResources};
pub use stats::CacheStats;
pub use watch::{Watch, WatchId, WatchManager};
