//! Cache integration tests.

use std::sync::Arc;
use std::time::Duration;

use strix_xds::prelude::*;
use strix_xds::resources::Cluster;

fn snapshot_with_cluster(cache: &SnapshotCache, name: &str) -> Snapshot {
    let mut snapshot = cache.new_snapshot();
    snapshot
        .set_resources(
            ResourceType::Cluster,
            vec![Resource::Cluster(Cluster {
                name: name.to_string(),
                ..Cluster::default()
            })],
        )
        .unwrap();
    snapshot
}

#[tokio::test]
async fn cache_basic_operations() {
    let cache = SnapshotCache::new();
    let node = NodeId::new("test-node");

    let snapshot = snapshot_with_cluster(&cache, "backend");
    cache.set_snapshot(&node, snapshot).await.unwrap();

    let retrieved = cache.get_snapshot(&node).expect("snapshot should exist");
    assert!(retrieved.resources(ResourceType::Cluster).contains_key("backend"));
    assert!(!retrieved.version(ResourceType::Cluster).is_empty());
}

#[tokio::test]
async fn cache_multiple_nodes() {
    let cache = SnapshotCache::new();

    let nodes = ["node-1", "node-2", "node-3"];
    for (i, node_id) in nodes.iter().enumerate() {
        let node = NodeId::new(*node_id);
        let snapshot = snapshot_with_cluster(&cache, &format!("cluster-{i}"));
        cache.set_snapshot(&node, snapshot).await.unwrap();
    }

    assert_eq!(cache.snapshot_count(), 3);

    for (i, node_id) in nodes.iter().enumerate() {
        let snapshot = cache.get_snapshot(&NodeId::new(*node_id)).unwrap();
        assert!(snapshot
            .resources(ResourceType::Cluster)
            .contains_key(&format!("cluster-{i}")));
    }
}

#[tokio::test]
async fn cache_clear_snapshot() {
    let cache = SnapshotCache::new();
    let node = NodeId::new("test-node");

    cache
        .set_snapshot(&node, snapshot_with_cluster(&cache, "backend"))
        .await
        .unwrap();
    assert!(cache.has_snapshot(&node));

    cache.clear_snapshot(&node);
    assert!(!cache.has_snapshot(&node));
}

#[tokio::test]
async fn cache_stats_tracking() {
    let cache = SnapshotCache::new();
    let node = NodeId::new("test-node");

    // Record miss
    assert!(cache.get_snapshot(&node).is_err());
    assert_eq!(cache.stats().snapshot_misses(), 1);
    assert_eq!(cache.stats().snapshot_hits(), 0);

    // Set and hit
    cache
        .set_snapshot(&node, snapshot_with_cluster(&cache, "backend"))
        .await
        .unwrap();
    cache.get_snapshot(&node).unwrap();

    assert_eq!(cache.stats().snapshots_set(), 1);
    assert_eq!(cache.stats().snapshot_hits(), 1);
    assert_eq!(cache.stats().snapshot_misses(), 1);

    // Hit rate should be 0.5
    assert!((cache.stats().hit_rate() - 0.5).abs() < 0.01);
}

#[tokio::test]
async fn cache_watch_notifications() {
    let cache = SnapshotCache::new();
    let node = NodeId::new("test-node");

    let mut watch = cache.create_watch(&node);

    cache
        .set_snapshot(&node, snapshot_with_cluster(&cache, "backend"))
        .await
        .unwrap();

    let result = tokio::time::timeout(Duration::from_secs(1), watch.recv()).await;
    let snapshot = result.expect("watch timed out").unwrap();
    assert!(snapshot.resources(ResourceType::Cluster).contains_key("backend"));
}

#[tokio::test]
async fn cache_multiple_watches() {
    let cache = SnapshotCache::new();
    let node = NodeId::new("test-node");

    let mut watch1 = cache.create_watch(&node);
    let mut watch2 = cache.create_watch(&node);

    cache
        .set_snapshot(&node, snapshot_with_cluster(&cache, "backend"))
        .await
        .unwrap();

    for watch in [&mut watch1, &mut watch2] {
        let result = tokio::time::timeout(Duration::from_secs(1), watch.recv()).await;
        let snapshot = result.expect("watch timed out").unwrap();
        assert!(snapshot.resources(ResourceType::Cluster).contains_key("backend"));
    }
}

#[tokio::test]
async fn cache_cancel_watch() {
    let cache = SnapshotCache::new();
    let node = NodeId::new("test-node");

    let mut watch = cache.create_watch(&node);
    cache.cancel_watch(watch.id());

    // A cancelled watch never sees subsequent installs.
    cache
        .set_snapshot(&node, snapshot_with_cluster(&cache, "backend"))
        .await
        .unwrap();
    assert!(watch.recv().await.is_none());
}

#[test]
fn cache_concurrent_access() {
    use std::thread;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .build()
        .unwrap();
    let cache = Arc::new(SnapshotCache::new());
    let mut handles = vec![];

    for i in 0..10 {
        let cache_clone = Arc::clone(&cache);
        let rt_handle = rt.handle().clone();
        let handle = thread::spawn(move || {
            let node = NodeId::new(format!("node-{i}"));

            for j in 0..100 {
                let snapshot = snapshot_with_cluster(&cache_clone, &format!("cluster-{j}"));
                rt_handle
                    .block_on(cache_clone.set_snapshot(&node, snapshot))
                    .unwrap();
                cache_clone.get_snapshot(&node).unwrap();
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.snapshot_count(), 10);
}
