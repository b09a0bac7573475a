//! Cache operation counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for cache operations.
///
/// All counters are atomic and safe to read from multiple threads. Tests
/// use `snapshots_set` to assert that unchanged reconciliations skip the
/// cache write.
#[derive(Debug, Default)]
pub struct CacheStats {
    snapshots_set: AtomicU64,
    snapshot_hits: AtomicU64,
    snapshot_misses: AtomicU64,
    snapshots_cleared: AtomicU64,
}

impl CacheStats {
    /// Create zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_set(&self) {
        self.snapshots_set.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_hit(&self) {
        self.snapshot_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_miss(&self) {
        self.snapshot_misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_clear(&self) {
        self.snapshots_cleared.fetch_add(1, Ordering::Relaxed);
    }

    /// Total snapshot installs.
    #[inline]
    #[must_use]
    pub fn snapshots_set(&self) -> u64 {
        self.snapshots_set.load(Ordering::Relaxed)
    }

    /// Total successful reads.
    #[inline]
    #[must_use]
    pub fn snapshot_hits(&self) -> u64 {
        self.snapshot_hits.load(Ordering::Relaxed)
    }

    /// Total reads of absent nodes.
    #[inline]
    #[must_use]
    pub fn snapshot_misses(&self) -> u64 {
        self.snapshot_misses.load(Ordering::Relaxed)
    }

    /// Total snapshot removals.
    #[inline]
    #[must_use]
    pub fn snapshots_cleared(&self) -> u64 {
        self.snapshots_cleared.load(Ordering::Relaxed)
    }

    /// Read hit rate in `0.0..=1.0`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let hits = self.snapshot_hits() as f64;
        let total = hits + self.snapshot_misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.snapshots_set.store(0, Ordering::Relaxed);
        self.snapshot_hits.store(0, Ordering::Relaxed);
        self.snapshot_misses.store(0, Ordering::Relaxed);
        self.snapshots_cleared.store(0, Ordering::Relaxed);
    }
}
