pub use crate::builder::{CacheClass, LruCacheClass, PriorityQueueClass, QueueClass};
#[cfg(feature = "concurrency")]
pub use crate::builder::{ConcurrentLruCacheClass, ConcurrentPriorityQueueClass};
pub use crate::ds::{
    BinaryHeap, Comparator, FnComparator, FnHashStrategy, FxHashStrategy, HashStrategy, HashTable,
    IntrusiveList, NaturalOrder, Reversed, SlotArena, SlotId,
};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{LruMetricsSnapshot, QueueMetricsSnapshot};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::{EvictionCallback, LruCache};
#[cfg(feature = "concurrency")]
pub use crate::queue::ConcurrentPriorityQueue;
pub use crate::queue::PriorityQueue;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache, PriorityQueueTrait};
#[cfg(feature = "concurrency")]
pub use crate::traits::ConcurrentCache;
