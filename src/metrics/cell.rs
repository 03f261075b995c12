use std::sync::atomic::{AtomicU64, Ordering};

/// A counter that can be bumped through `&self`.
///
/// Read-only cache operations (`peek`, `recency_rank`) only get `&self`, and
/// the concurrent wrappers run them under a shared lock, so several readers
/// may increment the same cell at once. Relaxed atomics are enough: the
/// counters are observational and never order other memory.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

impl Clone for MetricsCell {
    fn clone(&self) -> Self {
        Self(AtomicU64::new(self.get()))
    }
}
