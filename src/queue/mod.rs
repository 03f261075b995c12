//! Queues that release elements by priority rather than arrival order.

pub mod priority;

#[cfg(feature = "concurrency")]
pub use priority::ConcurrentPriorityQueue;
pub use priority::PriorityQueue;
