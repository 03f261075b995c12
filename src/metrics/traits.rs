//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the
//! containers only ever talk to a recorder, and monitoring code only ever
//! talks to snapshots.
//!
//! ## Architecture
//!
//! ```text
//!                ┌─────────────────────────────┐
//!                │     CoreMetricsRecorder     │
//!                │  get_hit/get_miss/insert    │
//!                │  evict/clear                │
//!                └──────────────┬──────────────┘
//!                               │
//!                               ▼
//!                ┌─────────────────────────────┐      ┌─────────────────────────┐
//!                │     LruMetricsRecorder      │      │  QueueMetricsRecorder   │
//!                │  pop_lru/touch/callback     │      │  enqueue/dequeue/clear  │
//!                └─────────────────────────────┘      └─────────────────────────┘
//!
//!   &self paths (interior mutability):
//!     LruMetricsReadRecorder, QueueMetricsReadRecorder
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any keyed cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_eviction_callback(&mut self);
}

/// Read-only LRU metrics for `&self` methods.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Metrics for priority queues.
pub trait QueueMetricsRecorder {
    fn record_enqueue(&mut self);
    fn record_dequeue_call(&mut self);
    fn record_dequeue_found(&mut self);
    fn record_clear(&mut self);
}

/// Read-only queue metrics for `&self` methods.
pub trait QueueMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
