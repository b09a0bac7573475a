//! Watch subscriptions for snapshot replacement.
//!
//! The discovery transport subscribes to a node and receives every
//! snapshot installed for it. Channels are bounded; when a subscriber
//! falls behind, intermediate snapshots are dropped (the agent only ever
//! needs the latest one).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, trace};

use strix_core::NodeId;

use crate::Snapshot;

/// Unique identifier for a watch subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

impl WatchId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric value of this watch ID.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for WatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "watch-{}", self.0)
    }
}

/// A subscription receiving snapshot replacements for one node.
#[derive(Debug)]
pub struct Watch {
    id: WatchId,
    node: NodeId,
    receiver: mpsc::Receiver<Arc<Snapshot>>,
}

impl Watch {
    /// This watch's identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> WatchId {
        self.id
    }

    /// The node this watch is subscribed to.
    #[inline]
    #[must_use]
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Receive the next installed snapshot.
    ///
    /// Returns `None` once the watch has been cancelled.
    pub async fn recv(&mut self) -> Option<Arc<Snapshot>> {
        self.receiver.recv().await
    }

    /// Receive without waiting.
    pub fn try_recv(&mut self) -> Result<Arc<Snapshot>, mpsc::error::TryRecvError> {
        self.receiver.try_recv()
    }
}

#[derive(Debug, Clone)]
struct WatchSender {
    id: WatchId,
    sender: mpsc::Sender<Arc<Snapshot>>,
}

impl WatchSender {
    /// Deliver a snapshot without blocking. A full channel drops the
    /// update (the subscriber will get a newer one). Returns `false` when
    /// the receiving side is gone.
    fn try_send(&self, snapshot: Arc<Snapshot>) -> bool {
        match self.sender.try_send(snapshot) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                trace!(watch_id = %self.id, "watch channel full, dropping update");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}

/// Tracks watch subscriptions per node.
///
/// Uses a `Mutex` internally; every critical section is short and free of
/// I/O.
#[derive(Debug)]
pub struct WatchManager {
    watches: Mutex<HashMap<NodeId, Vec<WatchSender>>>,
    channel_buffer: usize,
}

impl Default for WatchManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchManager {
    /// Create a watch manager with the default channel buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer_size(16)
    }

    /// Create a watch manager with a custom channel buffer size.
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            watches: Mutex::new(HashMap::new()),
            channel_buffer: buffer_size,
        }
    }

    /// Subscribe to snapshot replacements for `node`.
    pub fn create_watch(&self, node: &NodeId) -> Watch {
        let id = WatchId::next();
        let (sender, receiver) = mpsc::channel(self.channel_buffer);

        {
            let mut watches = self.watches.lock().expect("watch lock poisoned");
            watches
                .entry(node.clone())
                .or_default()
                .push(WatchSender { id, sender });
        }

        debug!(watch_id = %id, node = %node, "created watch");

        Watch {
            id,
            node: node.clone(),
            receiver,
        }
    }

    /// Cancel a subscription. Unknown IDs are ignored.
    pub fn cancel_watch(&self, watch_id: WatchId) {
        let mut watches = self.watches.lock().expect("watch lock poisoned");
        for senders in watches.values_mut() {
            if let Some(pos) = senders.iter().position(|s| s.id == watch_id) {
                senders.swap_remove(pos);
                debug!(watch_id = %watch_id, "cancelled watch");
                return;
            }
        }
    }

    /// Notify every subscriber of `node` that `snapshot` was installed.
    /// Closed watches are pruned.
    pub fn notify(&self, node: &NodeId, snapshot: Arc<Snapshot>) {
        let senders: Vec<WatchSender> = {
            let watches = self.watches.lock().expect("watch lock poisoned");
            watches.get(node).cloned().unwrap_or_default()
        };

        if senders.is_empty() {
            return;
        }

        let closed: Vec<WatchId> = senders
            .iter()
            .filter(|s| !s.try_send(Arc::clone(&snapshot)))
            .map(|s| s.id)
            .collect();

        if !closed.is_empty() {
            let mut watches = self.watches.lock().expect("watch lock poisoned");
            if let Some(senders) = watches.get_mut(node) {
                senders.retain(|s| !closed.contains(&s.id));
            }
            debug!(count = closed.len(), node = %node, "pruned closed watches");
        }
    }

    /// Number of active watches for `node`.
    #[must_use]
    pub fn watch_count(&self, node: &NodeId) -> usize {
        let watches = self.watches.lock().expect("watch lock poisoned");
        watches.get(node).map(Vec::len).unwrap_or(0)
    }
}
