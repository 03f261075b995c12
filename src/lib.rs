//! containerkit: a capacity-bounded LRU cache with eviction callbacks, a
//! comparator-ordered priority queue, and the primitives they are built on.
//!
//! - [`ds`]: chained hash table, slot arena, arena-backed doubly linked list,
//!   binary heap
//! - [`policy::lru`]: `LruCache` (hash index + recency list)
//! - [`queue`]: `PriorityQueue` over the binary heap
//! - [`builder`]: class objects that stamp out caches and queues with shared
//!   hashing or ordering
//!
//! Cargo features: `metrics` (per-instance counters, snapshots, Prometheus
//! text export) and `concurrency` (`parking_lot` lock wrappers).
//!
//! ```
//! use containerkit::prelude::*;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//! assert!(!cache.contains(&"b"));
//!
//! let mut queue = PriorityQueue::min_first();
//! queue.extend([3, 1, 2]);
//! assert_eq!(queue.dequeue(), Some(1));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod queue;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
