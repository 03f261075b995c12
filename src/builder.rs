//! Class objects: reusable factories that remember how a container is keyed
//! or ordered, so new instances can be stamped out with the same settings.
//!
//! An [`LruCacheClass`] carries the hash strategy and index sizing of an
//! [`LruCache`]; a [`PriorityQueueClass`] carries the comparator of a
//! [`PriorityQueue`]. Code that only needs "something that makes caches" can
//! be written against [`CacheClass`] / [`QueueClass`] and accept the
//! lock-wrapped variants too.
//!
//! ## Example
//!
//! ```rust
//! use containerkit::builder::{LruCacheClass, PriorityQueueClass};
//!
//! let class = LruCacheClass::new().with_initial_buckets(64);
//! let mut sessions = class.new_cache::<u64, String>(100);
//! let mut tokens = class.new_cache_with_elements(10, [(1u64, "a"), (2, "b")]);
//! sessions.insert(7, "alice".to_string());
//! assert_eq!(tokens.get(&2), Some(&"b"));
//!
//! let jobs = PriorityQueueClass::max_first().new_queue_with_elements([3, 9, 4]);
//! assert_eq!(jobs.peek(), Some(&9));
//! ```

use crate::ds::binary_heap::{Comparator, NaturalOrder, Reversed};
use crate::ds::hash_table::{DEFAULT_MAX_LOAD_FACTOR, FxHashStrategy, HashStrategy};
use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
use crate::policy::lru::{DEFAULT_INDEX_BUCKETS, LruCache};
#[cfg(feature = "concurrency")]
use crate::queue::ConcurrentPriorityQueue;
use crate::queue::PriorityQueue;

/// Something that builds capacity-bounded caches.
pub trait CacheClass<K, V> {
    type Cache: Extend<(K, V)>;

    /// Fallible constructor; rejects a zero capacity.
    fn try_new_cache(&self, capacity: usize) -> Result<Self::Cache, ConfigError>;

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    fn new_cache(&self, capacity: usize) -> Self::Cache {
        match self.try_new_cache(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds a cache and inserts `elements` in order; later entries win and
    /// the earliest ones are evicted if there are more than `capacity`.
    fn new_cache_with_elements<I>(&self, capacity: usize, elements: I) -> Self::Cache
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut cache = self.new_cache(capacity);
        cache.extend(elements);
        cache
    }
}

/// Something that builds priority queues.
pub trait QueueClass<T> {
    type Queue: Extend<T>;

    fn new_queue(&self) -> Self::Queue;

    fn new_queue_with_elements<I>(&self, elements: I) -> Self::Queue
    where
        I: IntoIterator<Item = T>,
    {
        let mut queue = self.new_queue();
        queue.extend(elements);
        queue
    }
}

/// Factory for [`LruCache`] instances sharing a hash strategy and index sizing.
#[derive(Debug, Clone)]
pub struct LruCacheClass<H = FxHashStrategy> {
    strategy: H,
    initial_buckets: usize,
    max_load_factor: usize,
}

impl<H: Default> Default for LruCacheClass<H> {
    fn default() -> Self {
        Self::with_strategy(H::default())
    }
}

impl LruCacheClass<FxHashStrategy> {
    /// FxHash keys with the default index sizing.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H> LruCacheClass<H> {
    pub fn with_strategy(strategy: H) -> Self {
        Self {
            strategy,
            initial_buckets: DEFAULT_INDEX_BUCKETS,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    /// Initial bucket count of each cache's key index (raised to the table
    /// minimum if smaller).
    pub fn with_initial_buckets(mut self, initial_buckets: usize) -> Self {
        self.initial_buckets = initial_buckets;
        self
    }

    /// Load factor, in percent, above which each cache's index grows.
    pub fn with_max_load_factor(mut self, max_load_factor: usize) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    pub fn strategy(&self) -> &H {
        &self.strategy
    }

    pub fn initial_buckets(&self) -> usize {
        self.initial_buckets
    }

    pub fn max_load_factor(&self) -> usize {
        self.max_load_factor
    }

    /// Builds [`ConcurrentLruCache`]s instead.
    #[cfg(feature = "concurrency")]
    pub fn concurrent(self) -> ConcurrentLruCacheClass<H> {
        ConcurrentLruCacheClass { inner: self }
    }

    /// Fails on a zero capacity or a zero load factor.
    pub fn try_new_cache<K, V>(&self, capacity: usize) -> Result<LruCache<K, V, H>, ConfigError>
    where
        K: Clone,
        H: HashStrategy<K> + Clone,
    {
        LruCache::try_with_config(
            capacity,
            self.initial_buckets,
            self.max_load_factor,
            self.strategy.clone(),
        )
    }

    /// # Panics
    ///
    /// Panics where [`try_new_cache`](Self::try_new_cache) would fail.
    pub fn new_cache<K, V>(&self, capacity: usize) -> LruCache<K, V, H>
    where
        K: Clone,
        H: HashStrategy<K> + Clone,
    {
        match self.try_new_cache(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn new_cache_with_callback<K, V, F>(
        &self,
        capacity: usize,
        on_evict: F,
    ) -> LruCache<K, V, H>
    where
        K: Clone,
        H: HashStrategy<K> + Clone,
        F: FnMut(K, V) + Send + Sync + 'static,
    {
        let mut cache = self.new_cache(capacity);
        cache.set_eviction_callback(on_evict);
        cache
    }

    pub fn new_cache_with_elements<K, V, I>(
        &self,
        capacity: usize,
        elements: I,
    ) -> LruCache<K, V, H>
    where
        K: Clone,
        H: HashStrategy<K> + Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut cache = self.new_cache(capacity);
        cache.extend(elements);
        cache
    }
}

impl<K, V, H> CacheClass<K, V> for LruCacheClass<H>
where
    K: Clone,
    H: HashStrategy<K> + Clone,
{
    type Cache = LruCache<K, V, H>;

    fn try_new_cache(&self, capacity: usize) -> Result<Self::Cache, ConfigError> {
        LruCacheClass::try_new_cache(self, capacity)
    }
}

/// Factory for [`ConcurrentLruCache`] instances.
#[cfg(feature = "concurrency")]
#[derive(Debug, Clone)]
pub struct ConcurrentLruCacheClass<H = FxHashStrategy> {
    inner: LruCacheClass<H>,
}

#[cfg(feature = "concurrency")]
impl<K, V, H> CacheClass<K, V> for ConcurrentLruCacheClass<H>
where
    K: Clone + Send + Sync,
    V: Send + Sync,
    H: HashStrategy<K> + Clone + Send + Sync,
{
    type Cache = ConcurrentLruCache<K, V, H>;

    fn try_new_cache(&self, capacity: usize) -> Result<Self::Cache, ConfigError> {
        self.inner
            .try_new_cache(capacity)
            .map(ConcurrentLruCache::from_cache)
    }
}

/// Factory for [`PriorityQueue`] instances sharing a comparator.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueueClass<C = NaturalOrder> {
    comparator: C,
}

impl PriorityQueueClass<NaturalOrder> {
    pub fn min_first() -> Self {
        Self::new(NaturalOrder)
    }
}

impl PriorityQueueClass<Reversed<NaturalOrder>> {
    pub fn max_first() -> Self {
        Self::new(Reversed(NaturalOrder))
    }
}

impl<C> PriorityQueueClass<C> {
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Builds [`ConcurrentPriorityQueue`]s instead.
    #[cfg(feature = "concurrency")]
    pub fn concurrent(self) -> ConcurrentPriorityQueueClass<C> {
        ConcurrentPriorityQueueClass { inner: self }
    }

    pub fn new_queue<T>(&self) -> PriorityQueue<T, C>
    where
        C: Comparator<T> + Clone,
    {
        PriorityQueue::with_comparator(self.comparator.clone())
    }

    /// Builds a queue and enqueues `elements` in iteration order.
    pub fn new_queue_with_elements<T, I>(&self, elements: I) -> PriorityQueue<T, C>
    where
        C: Comparator<T> + Clone,
        I: IntoIterator<Item = T>,
    {
        PriorityQueue::with_elements(elements, self.comparator.clone())
    }
}

impl<T, C> QueueClass<T> for PriorityQueueClass<C>
where
    C: Comparator<T> + Clone,
{
    type Queue = PriorityQueue<T, C>;

    fn new_queue(&self) -> Self::Queue {
        PriorityQueueClass::new_queue(self)
    }

    fn new_queue_with_elements<I>(&self, elements: I) -> Self::Queue
    where
        I: IntoIterator<Item = T>,
    {
        PriorityQueueClass::new_queue_with_elements(self, elements)
    }
}

/// Factory for [`ConcurrentPriorityQueue`] instances.
#[cfg(feature = "concurrency")]
#[derive(Debug, Clone)]
pub struct ConcurrentPriorityQueueClass<C = NaturalOrder> {
    inner: PriorityQueueClass<C>,
}

#[cfg(feature = "concurrency")]
impl<T, C> QueueClass<T> for ConcurrentPriorityQueueClass<C>
where
    T: Send + Sync,
    C: Comparator<T> + Clone + Send + Sync,
{
    type Queue = ConcurrentPriorityQueue<T, C>;

    fn new_queue(&self) -> Self::Queue {
        ConcurrentPriorityQueue::from_queue(self.inner.new_queue())
    }

    fn new_queue_with_elements<I>(&self, elements: I) -> Self::Queue
    where
        I: IntoIterator<Item = T>,
    {
        ConcurrentPriorityQueue::from_queue(self.inner.new_queue_with_elements(elements))
    }
}
