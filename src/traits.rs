//! # Container Trait Hierarchy
//!
//! Shared interfaces for the caches and queues in this crate, so callers can
//! be written against an operation set rather than a concrete type.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K]) → Vec<Option<V>>    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//!
//!   ┌─────────────────────────────────────────┐
//!   │        PriorityQueueTrait<T>            │
//!   │  enqueue(T) / dequeue() / peek()        │
//!   │  len() / is_empty() / clear()           │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! The single-threaded containers take `&mut self` for anything that changes
//! state, including an LRU `get` (a hit reorders recency). The `concurrency`
//! feature adds lock-wrapped variants that implement [`ConcurrentCache`].

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use containerkit::traits::CoreCache;
/// use containerkit::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the insert pushes the cache over capacity, one entry is evicted
    /// according to the cache's policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction state. Use [`contains`](Self::contains) to test for
    /// a key without touching it.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use containerkit::traits::{CoreCache, MutableCache};
/// use containerkit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(10);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.insert(3, "three");
///
/// let removed = cache.remove_batch(&[1, 99, 3]);
/// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
/// assert_eq!(cache.len(), 1);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations.
///
/// # Example
///
/// ```
/// use containerkit::traits::{CoreCache, LruCacheTrait};
/// use containerkit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(10);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// assert_eq!(cache.recency_rank(&3), Some(0));
/// assert_eq!(cache.recency_rank(&1), Some(2));
///
/// assert!(cache.touch(&1));
/// assert_eq!(cache.peek_lru(), Some((&2, &"second")));
/// assert_eq!(cache.pop_lru(), Some((2, "second")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// This is an explicit removal, not an eviction: no eviction callback runs.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or changing recency.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent).
    ///
    /// Returns `None` if the key is not found. Runs in O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Queue operations for containers that release elements by priority.
///
/// # Example
///
/// ```
/// use containerkit::traits::PriorityQueueTrait;
/// use containerkit::queue::PriorityQueue;
///
/// fn drain<Q: PriorityQueueTrait<u32>>(queue: &mut Q) -> Vec<u32> {
///     std::iter::from_fn(|| queue.dequeue()).collect()
/// }
///
/// let mut queue = PriorityQueue::min_first();
/// queue.enqueue(5);
/// queue.enqueue(3);
/// queue.enqueue(8);
/// assert_eq!(drain(&mut queue), vec![3, 5, 8]);
/// ```
pub trait PriorityQueueTrait<T> {
    /// Adds an element.
    fn enqueue(&mut self, value: T);

    /// Removes and returns the element that ranks first, or `None` if empty.
    fn dequeue(&mut self) -> Option<T>;

    /// Returns the element that ranks first without removing it.
    fn peek(&self) -> Option<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements. The ordering is kept.
    fn clear(&mut self);
}

/// Marker trait for containers that are safe to share across threads.
///
/// Implemented by the `concurrency` feature's lock-wrapped types.
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;

    struct VecCache {
        data: Vec<(i32, String)>,
        capacity: usize,
    }

    impl CoreCache<i32, String> for VecCache {
        fn insert(&mut self, key: i32, value: String) -> Option<String> {
            if let Some(slot) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(&mut slot.1, value));
            }
            if self.data.len() == self.capacity {
                self.data.remove(0);
            }
            self.data.push((key, value));
            None
        }

        fn get(&mut self, key: &i32) -> Option<&String> {
            self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }

        fn contains(&self, key: &i32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn clear(&mut self) {
            self.data.clear();
        }
    }

    impl MutableCache<i32, String> for VecCache {
        fn remove(&mut self, key: &i32) -> Option<String> {
            let pos = self.data.iter().position(|(k, _)| k == key)?;
            Some(self.data.remove(pos).1)
        }
    }

    #[test]
    fn core_cache_default_is_empty() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert!(cache.is_empty());
        cache.insert(1, "one".to_string());
        assert!(!cache.is_empty());
    }

    #[test]
    fn mutable_cache_default_remove_batch_keeps_order() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 4,
        };
        cache.insert(1, "one".to_string());
        cache.insert(2, "two".to_string());
        let removed = cache.remove_batch(&[2, 7, 1]);
        assert_eq!(removed, vec![Some("two".to_string()), None, Some("one".to_string())]);
        assert!(cache.is_empty());
    }
}
