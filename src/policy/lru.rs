//! # Least Recently Used (LRU) Cache
//!
//! A capacity-bounded key/value cache that evicts the entry which has gone
//! longest without being read or written. Evictions can be observed through a
//! callback registered at construction time.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V, H>                              │
//!   │                                                                          │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  index: HashTable<K, SlotId, H>   (chained, HashStrategy-keyed)  │   │
//!   │   │                                                                  │   │
//!   │   │    "k1" ─────────────────────────────────────────────┐           │   │
//!   │   │    "k2" ───────────────────────────────┐             │           │   │
//!   │   │    "k3" ─────────────────┐             │             │           │   │
//!   │   └──────────────────────────┼─────────────┼─────────────┼───────────┘   │
//!   │                              ▼             ▼             ▼               │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  order: IntrusiveList<Entry<K, V>>                               │   │
//!   │   │                                                                  │   │
//!   │   │  head ──► [k3, v3] ◄──► [k2, v2] ◄──► [k1, v1] ◄── tail          │   │
//!   │   │   (MRU)                                          (LRU)           │   │
//!   │   └──────────────────────────────────────────────────────────────────┘   │
//!   │                                                                          │
//!   │   on_evict: Option<Box<dyn FnMut(K, V) + Send + Sync>>                   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index holds node handles only; keys and values are owned by the list
//! nodes (the index keeps its own copy of each key for hashing, hence
//! `K: Clone`).
//!
//! ## Insert Flow
//!
//! ```text
//!   insert(key, value):
//!     1. key indexed?   replace value in place, move node to front, done
//!     2. otherwise      push (key, value) to front, index key → node id
//!     3. len > capacity?
//!          pop back node, delete its key from the index,
//!          then call on_evict(key, value)
//! ```
//!
//! Exactly one entry is evicted per over-capacity insert, and the callback
//! runs after the cache is consistent again. A panicking callback propagates
//! out of `insert`; the eviction has already happened by then.
//!
//! ## Operations
//!
//! | Operation        | Time    | Notes                                   |
//! |------------------|---------|-----------------------------------------|
//! | `insert`         | O(1)*   | amortized over index resizes            |
//! | `get`            | O(1)    | moves the entry to MRU                  |
//! | `peek`           | O(1)    | no reorder                              |
//! | `remove`         | O(1)    | never calls the eviction callback       |
//! | `pop_lru`        | O(1)    | never calls the eviction callback       |
//! | `recency_rank`   | O(n)    | walks the list from the front           |
//! | `iter`           | O(n)    | hash-table order, not recency order     |
//!
//! ## Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use containerkit::policy::lru::LruCache;
//!
//! let evicted = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&evicted);
//! let mut cache = LruCache::with_callback(2, move |key, value| {
//!     sink.lock().unwrap().push((key, value));
//! });
//!
//! cache.insert("k1", 1);
//! cache.insert("k2", 2);
//! cache.insert("k3", 3);
//! assert_eq!(*evicted.lock().unwrap(), vec![("k1", 1)]);
//!
//! cache.get(&"k2");
//! cache.insert("k4", 4);
//! assert_eq!(*evicted.lock().unwrap(), vec![("k1", 1), ("k3", 3)]);
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! - `LruCache`: not synchronized, `&mut self` for every mutation
//! - `ConcurrentLruCache` (`concurrency` feature): `parking_lot::RwLock`
//!   wrapper. The eviction callback runs with the write lock held, so it must
//!   not call back into the same `ConcurrentLruCache`.

use std::fmt;
use std::mem;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

use crate::builder::LruCacheClass;
use crate::ds::hash_table::{
    self, DEFAULT_MAX_LOAD_FACTOR, FxHashStrategy, HashStrategy, HashTable,
};
use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Initial bucket count of the key index.
pub const DEFAULT_INDEX_BUCKETS: usize = 17;

/// Callback invoked with each entry evicted for capacity.
pub type EvictionCallback<K, V> = Box<dyn FnMut(K, V) + Send + Sync>;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Capacity-bounded LRU cache with an optional eviction callback.
///
/// `H` decides how keys are hashed and compared; the default hashes with
/// FxHash and compares with `Eq`.
pub struct LruCache<K, V, H = FxHashStrategy> {
    index: HashTable<K, SlotId, H>,
    order: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    on_evict: Option<EvictionCallback<K, V>>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V, FxHashStrategy>
where
    K: Clone,
    FxHashStrategy: HashStrategy<K>,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) for
    /// user-supplied capacities.
    ///
    /// # Example
    ///
    /// ```
    /// use containerkit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible twin of [`new`](Self::new).
    ///
    /// ```
    /// use containerkit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// assert!(LruCache::<u32, u32>::try_new(1).is_ok());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_config(
            capacity,
            DEFAULT_INDEX_BUCKETS,
            DEFAULT_MAX_LOAD_FACTOR,
            FxHashStrategy::default(),
        )
    }

    /// Creates a cache that reports every capacity eviction to `on_evict`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_callback<F>(capacity: usize, on_evict: F) -> Self
    where
        F: FnMut(K, V) + Send + Sync + 'static,
    {
        let mut cache = Self::new(capacity);
        cache.on_evict = Some(Box::new(on_evict));
        cache
    }
}

impl<K, V, H> LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    /// Creates an empty cache whose index uses `strategy`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_strategy(capacity: usize, strategy: H) -> Self {
        match Self::try_with_config(
            capacity,
            DEFAULT_INDEX_BUCKETS,
            DEFAULT_MAX_LOAD_FACTOR,
            strategy,
        ) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty cache with explicit index sizing.
    ///
    /// Fails if `capacity` or `max_load_factor` is zero.
    pub fn try_with_config(
        capacity: usize,
        initial_buckets: usize,
        max_load_factor: usize,
        strategy: H,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero("capacity"));
        }
        if max_load_factor == 0 {
            return Err(ConfigError::zero("max_load_factor"));
        }
        Ok(Self {
            index: HashTable::with_config(initial_buckets, max_load_factor, strategy),
            order: IntrusiveList::new(),
            capacity,
            on_evict: None,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Installs (or replaces) the eviction callback.
    pub fn set_eviction_callback<F>(&mut self, on_evict: F)
    where
        F: FnMut(K, V) + Send + Sync + 'static,
    {
        self.on_evict = Some(Box::new(on_evict));
    }

    /// Removes the eviction callback, returning it.
    pub fn take_eviction_callback(&mut self) -> Option<EvictionCallback<K, V>> {
        self.on_evict.take()
    }

    pub fn has_eviction_callback(&self) -> bool {
        self.on_evict.is_some()
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Returns the previous value for an existing key. When a new key pushes
    /// the cache over capacity, the least recently used entry is evicted and
    /// handed to the eviction callback before this returns.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            // the node takes the caller's key; the index keeps the one it hashed
            let previous = self.order.get_mut(id).map(|entry| {
                entry.key = key;
                mem::replace(&mut entry.value, value)
            });
            self.order.move_to_front(id);
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.add_entry(key, id);

        if self.order.len() > self.capacity {
            self.evict_lru();
        }
        None
    }

    fn evict_lru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let Some(Entry { key, value }) = self.order.pop_back() else {
            return;
        };
        self.index.delete_entry(&key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        tracing::trace!(
            target: "containerkit::lru",
            len = self.order.len(),
            capacity = self.capacity,
            "evicted least recently used entry"
        );

        if let Some(on_evict) = self.on_evict.as_mut() {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction_callback();
            on_evict(key, value);
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get) but hands out a mutable reference.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns the value for `key` without changing recency.
    ///
    /// ```
    /// use containerkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// assert_eq!(cache.peek(&1), Some(&"one"));
    ///
    /// // 1 is still the LRU entry
    /// cache.insert(3, "three");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.index.get(key)?;
        let value = self.order.get(id).map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            (&self.metrics).record_peek_found();
        }
        value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes `key` and returns its value. No eviction callback runs.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.delete_entry(key)?;
        let entry = self.order.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(entry.value)
    }

    /// Drops every entry. No eviction callbacks run.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.order.clear();
    }

    /// Removes the least recently used entry. No eviction callback runs.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let Entry { key, value } = self.order.pop_back()?;
        self.index.delete_entry(&key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();
        Some((key, value))
    }

    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();
        Some((&entry.key, &entry.value))
    }

    /// Marks `key` most recently used. Returns `false` if it is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        let moved = self.order.move_to_front(id);

        #[cfg(feature = "metrics")]
        if moved {
            self.metrics.record_touch_found();
        }
        moved
    }

    /// Distance of `key` from the MRU end (0 = most recent).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let target = *self.index.get(key)?;
        for (rank, (id, _)) in self.order.iter_entries().enumerate() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            if id == target {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }

    /// Iterates entries from most to least recently used.
    pub fn recency_order(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterates entries in index (hash-table) order, not recency order.
    ///
    /// Reading entries through this iterator does not refresh them.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.index.iter(),
            order: &self.order,
        }
    }

    /// Same as [`iter`](Self::iter).
    pub fn elements(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Removes each key in `keys`. No eviction callback runs.
    pub fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }

    /// A class object that builds caches with this cache's index settings.
    pub fn class(&self) -> LruCacheClass<H>
    where
        H: Clone,
    {
        LruCacheClass::with_strategy(self.index.strategy().clone())
            .with_max_load_factor(self.index.max_load_factor())
    }

    /// Number of times the key index has grown.
    pub fn index_resizes(&self) -> u64 {
        self.index.resize_count()
    }

    /// Checks that the index and the recency list describe the same entries.
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        use crate::error::InvariantError;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} entries but recency list has {}",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.order.iter_entries() {
            match self.index.get(&entry.key) {
                Some(&indexed) if indexed == id => {},
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "index maps node {:?} to {:?}",
                        id, indexed
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "list node {:?} has no index entry",
                        id
                    )));
                },
            }
        }
        let linked = self.order.iter().count();
        if linked != self.order.len() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable from head, len is {}",
                linked,
                self.order.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.index.debug_validate_invariants();
        self.order.debug_validate_invariants();
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, H> LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            eviction_callbacks: self.metrics.eviction_callbacks,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            clear_calls: self.metrics.clear_calls,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.order.len(),
            capacity: self.capacity,
            index_buckets: self.index.bucket_count(),
            index_resizes: self.index.resize_count(),
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V, H> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, H> CoreCache<K, V> for LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V, H> MutableCache<K, V> for LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V, H> LruCacheTrait<K, V> for LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V, H> fmt::Debug for LruCache<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.order.len())
            .field("capacity", &self.capacity)
            .field("index_buckets", &self.index.bucket_count())
            .field("has_eviction_callback", &self.on_evict.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V, H> Extend<(K, V)> for LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, H> IntoIterator for &'a LruCache<K, V, H>
where
    K: Clone,
    H: HashStrategy<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries in index order.
pub struct Iter<'a, K, V> {
    slots: hash_table::Iter<'a, K, SlotId>,
    order: &'a IntrusiveList<Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, &id) = self.slots.next()?;
        let entry = self.order.get(id)?;
        Some((key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Thread-safe LRU cache wrapper using `parking_lot::RwLock`.
///
/// `get` takes the write lock because a hit reorders recency; `peek`,
/// `contains` and the size accessors share the read lock. Values are cloned
/// out so no guard escapes a call.
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V, H = FxHashStrategy> {
    inner: Arc<RwLock<LruCache<K, V, H>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V, H> Clone for ConcurrentLruCache<K, V, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, H> fmt::Debug for ConcurrentLruCache<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.order.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V, FxHashStrategy>
where
    K: Clone + Send + Sync,
    V: Send + Sync,
    FxHashStrategy: HashStrategy<K>,
{
    /// Creates a new thread-safe LRU cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use containerkit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }

    /// Creates a cache whose eviction callback runs under the write lock.
    ///
    /// The callback must not call into this cache; doing so deadlocks.
    pub fn with_callback<F>(capacity: usize, on_evict: F) -> Self
    where
        F: FnMut(K, V) + Send + Sync + 'static,
    {
        Self::from_cache(LruCache::with_callback(capacity, on_evict))
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, H> ConcurrentLruCache<K, V, H>
where
    K: Clone + Send + Sync,
    V: Send + Sync,
    H: HashStrategy<K> + Send + Sync,
{
    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V, H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Inserts or updates `key`. Eviction callbacks run before this returns.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut cache = self.inner.write();
        cache.insert(key, value)
    }

    /// Gets a clone of the value, moving the entry to MRU.
    ///
    /// ```
    /// use containerkit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(2);
    /// cache.insert(1, "one".to_string());
    /// cache.insert(2, "two".to_string());
    /// assert_eq!(cache.get(&1).as_deref(), Some("one"));
    ///
    /// cache.insert(3, "three".to_string()); // evicts 2
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let mut cache = self.inner.write();
        cache.get(key).cloned()
    }

    /// Runs `f` on the value under the write lock, moving the entry to MRU.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let mut cache = self.inner.write();
        cache.get(key).map(f)
    }

    /// Gets a clone of the value without changing recency (read lock).
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let cache = self.inner.read();
        cache.peek(key).cloned()
    }

    /// Runs `f` on the value under the read lock without changing recency.
    pub fn peek_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let cache = self.inner.read();
        cache.peek(key).map(f)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    pub fn remove_batch(&self, keys: &[K]) -> Vec<Option<V>> {
        let mut cache = self.inner.write();
        cache.remove_batch(keys)
    }

    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
    }

    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.capacity()
    }

    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear()
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    pub fn peek_lru(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        let cache = self.inner.read();
        cache.peek_lru().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Copies every entry out under the read lock, in index order.
    pub fn elements_cloned(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        let cache = self.inner.read();
        cache.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, H> Extend<(K, V)> for ConcurrentLruCache<K, V, H>
where
    K: Clone + Send + Sync,
    V: Send + Sync,
    H: HashStrategy<K> + Send + Sync,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let mut cache = self.inner.write();
        cache.extend(iter);
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, H> ConcurrentCache for ConcurrentLruCache<K, V, H>
where
    K: Send + Sync,
    V: Send + Sync,
    H: Send + Sync,
{
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V, H> ConcurrentLruCache<K, V, H>
where
    K: Clone + Send + Sync,
    V: Send + Sync,
    H: HashStrategy<K> + Send + Sync,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V, H> MetricsSnapshotProvider<LruMetricsSnapshot> for ConcurrentLruCache<K, V, H>
where
    K: Clone + Send + Sync,
    V: Send + Sync,
    H: HashStrategy<K> + Send + Sync,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
