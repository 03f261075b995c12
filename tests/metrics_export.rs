// ==============================================
// METRICS EXPORT TESTS (integration)
// ==============================================
#![cfg(feature = "metrics")]

use containerkit::metrics::exporter::PrometheusTextExporter;
use containerkit::metrics::snapshot::LruMetricsSnapshot;
use containerkit::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
use containerkit::policy::lru::LruCache;
use containerkit::queue::PriorityQueue;

#[test]
fn lru_snapshot_reflects_traffic_and_exports() {
    let mut cache = LruCache::with_callback(2, |_: u32, _: u32| {});
    for i in 0..5 {
        cache.insert(i, i);
    }
    cache.get(&4);
    cache.get(&0);
    cache.remove(&3);

    let snapshot: LruMetricsSnapshot = cache.snapshot();
    assert_eq!(snapshot.insert_calls, 5);
    assert_eq!(snapshot.insert_new, 5);
    assert_eq!(snapshot.evicted_entries, 3);
    assert_eq!(snapshot.eviction_callbacks, 3);
    assert_eq!(snapshot.get_hits, 1);
    assert_eq!(snapshot.get_misses, 1);
    assert_eq!(snapshot.remove_found, 1);
    assert_eq!(snapshot.cache_len, 1);
    assert_eq!(snapshot.capacity, 2);
    assert!((snapshot.hit_ratio() - 0.5).abs() < f64::EPSILON);

    let exporter = PrometheusTextExporter::new("sessions", Vec::new());
    exporter.export(&snapshot);
    let text = String::from_utf8(exporter.into_inner()).unwrap();
    assert!(text.contains("sessions_evicted_entries_total 3\n"));
    assert!(text.contains("# TYPE sessions_cache_len gauge\n"));
}

#[test]
fn queue_snapshot_exports_queue_len() {
    let mut queue = PriorityQueue::min_first();
    queue.extend([4, 1, 3]);
    queue.dequeue();

    let exporter = PrometheusTextExporter::new("jobs", Vec::new());
    exporter.export(&queue.snapshot());
    let text = String::from_utf8(exporter.into_inner()).unwrap();
    assert!(text.contains("jobs_enqueue_calls_total 3\n"));
    assert!(text.contains("jobs_dequeue_found_total 1\n"));
    assert!(text.contains("jobs_queue_len 2\n"));
}
