//! Per-instance counters for the caches and queues (`metrics` feature).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
