//! Cache trait and the in-memory [`SnapshotCache`] implementation.
//!
//! The cache maps node IDs to immutable snapshots. `SnapshotCache` uses
//! `DashMap` with an FNV hasher, so writes to distinct nodes never
//! contend and readers never observe a half-written snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use fnv::FnvBuildHasher;
use tracing::{debug, trace};

use strix_core::{NodeId, Result, StrixError};

use crate::snapshot::Snapshot;
use crate::stats::CacheStats;
use crate::watch::{Watch, WatchId, WatchManager};

/// Node-keyed snapshot store consumed by the discovery transport.
///
/// Implementations must be safe for concurrent use by one reconciliation
/// worker per node running in parallel. `set_snapshot` is async so that
/// transport-backed implementations can reject a write; the in-memory
/// implementation never does.
#[async_trait]
pub trait Cache: Send + Sync {
    /// An empty snapshot pre-populated with an entry for every resource
    /// type, so per-type reads never fail for a valid type.
    fn new_snapshot(&self) -> Snapshot;

    /// Install or replace the snapshot for `node`, atomically from a
    /// reader's perspective. Fails with [`StrixError::Storage`] only when
    /// the underlying transport rejects the value.
    async fn set_snapshot(&self, node: &NodeId, snapshot: Snapshot) -> Result<()>;

    /// The current snapshot for `node`, or [`StrixError::NotFound`].
    fn get_snapshot(&self, node: &NodeId) -> Result<Arc<Snapshot>>;

    /// Remove the snapshot for `node`. Idempotent.
    fn clear_snapshot(&self, node: &NodeId);

    /// Number of nodes with a cached snapshot.
    fn snapshot_count(&self) -> usize;
}

/// In-memory cache over `DashMap`.
///
/// ## Thread Safety
///
/// All operations are thread-safe with bucket-level locking; operations on
/// distinct node IDs do not interfere. Map references are dropped before
/// watch notification so no lock is held while subscribers are woken.
#[derive(Debug)]
pub struct SnapshotCache {
    snapshots: DashMap<NodeId, Arc<Snapshot>, FnvBuildHasher>,
    watches: WatchManager,
    stats: CacheStats,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCache {
    /// Create a cache with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a cache sized for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: DashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default()),
            watches: WatchManager::new(),
            stats: CacheStats::new(),
        }
    }

    /// Operation counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Subscribe to snapshot replacements for `node`.
    #[inline]
    pub fn create_watch(&self, node: &NodeId) -> Watch {
        self.watches.create_watch(node)
    }

    /// Cancel a watch subscription.
    #[inline]
    pub fn cancel_watch(&self, watch_id: WatchId) {
        self.watches.cancel_watch(watch_id)
    }

    /// Whether `node` has a cached snapshot.
    #[must_use]
    pub fn has_snapshot(&self, node: &NodeId) -> bool {
        self.snapshots.contains_key(node)
    }

    /// All node IDs with a cached snapshot.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        self.snapshots.iter().map(|r| r.key().clone()).collect()
    }
}

#[async_trait]
impl Cache for SnapshotCache {
    fn new_snapshot(&self) -> Snapshot {
        Snapshot::new()
    }

    async fn set_snapshot(&self, node: &NodeId, snapshot: Snapshot) -> Result<()> {
        let snapshot = Arc::new(snapshot);

        // A single map-entry assignment; readers see either the old or the
        // new Arc, never a partial snapshot.
        self.snapshots.insert(node.clone(), Arc::clone(&snapshot));
        self.stats.record_set();

        debug!(
            node = %node,
            resources = snapshot.total_resources(),
            "set snapshot"
        );

        // No DashMap lock is held here.
        self.watches.notify(node, snapshot);
        Ok(())
    }

    fn get_snapshot(&self, node: &NodeId) -> Result<Arc<Snapshot>> {
        // Clone the Arc and drop the map Ref immediately.
        let result = self.snapshots.get(node).map(|r| Arc::clone(&r));

        match result {
            Some(snapshot) => {
                self.stats.record_hit();
                trace!(node = %node, "cache hit");
                Ok(snapshot)
            }
            None => {
                self.stats.record_miss();
                trace!(node = %node, "cache miss");
                Err(StrixError::not_found("snapshot", node.as_str()))
            }
        }
    }

    fn clear_snapshot(&self, node: &NodeId) {
        if self.snapshots.remove(node).is_some() {
            self.stats.record_clear();
            debug!(node = %node, "cleared snapshot");
        }
    }

    fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}
