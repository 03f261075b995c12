//! # Priority Queue
//!
//! A queue over [`BinaryHeap`] whose dequeue order is decided by a
//! [`Comparator`] value chosen at construction.
//!
//! ```text
//!   enqueue(5) enqueue(3) enqueue(8) enqueue(1)
//!
//!   min_first():  dequeue → 1, 3, 5, 8
//!   max_first():  dequeue → 8, 5, 3, 1
//! ```
//!
//! Equal-ranked elements leave in heap order, which is not insertion order.
//! Wrap elements with a sequence number in the comparator if FIFO ties are
//! needed.
//!
//! ## Example
//!
//! ```
//! use containerkit::queue::PriorityQueue;
//!
//! let mut queue = PriorityQueue::max_first();
//! queue.extend([5, 3, 8, 1]);
//!
//! assert_eq!(queue.peek(), Some(&8));
//! assert_eq!(queue.dequeue(), Some(8));
//! assert_eq!(queue.len(), 3);
//!
//! // ordered view without draining
//! let rest: Vec<_> = queue.iter_ordered().collect();
//! assert_eq!(rest, vec![5, 3, 1]);
//! assert_eq!(queue.len(), 3);
//! ```

use std::fmt;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

use crate::builder::PriorityQueueClass;
use crate::ds::binary_heap::{self, BinaryHeap, Comparator, NaturalOrder, Reversed};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::QueueMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::QueueMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, QueueMetricsReadRecorder, QueueMetricsRecorder,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::PriorityQueueTrait;

/// Comparator-ordered queue.
pub struct PriorityQueue<T, C = NaturalOrder> {
    heap: BinaryHeap<T, C>,
    #[cfg(feature = "metrics")]
    metrics: QueueMetrics,
}

impl<T: Ord> PriorityQueue<T, NaturalOrder> {
    /// Smallest element first.
    pub fn min_first() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> PriorityQueue<T, Reversed<NaturalOrder>> {
    /// Largest element first.
    pub fn max_first() -> Self {
        Self::with_comparator(Reversed(NaturalOrder))
    }
}

impl<T, C> PriorityQueue<T, C>
where
    C: Comparator<T>,
{
    /// Creates an empty queue ordered by `comparator`.
    ///
    /// ```
    /// use containerkit::ds::FnComparator;
    /// use containerkit::queue::PriorityQueue;
    ///
    /// // shortest string first
    /// let mut queue = PriorityQueue::with_comparator(FnComparator(|a: &&str, b: &&str| {
    ///     a.len().cmp(&b.len())
    /// }));
    /// queue.enqueue("three");
    /// queue.enqueue("a");
    /// queue.enqueue("to");
    /// assert_eq!(queue.dequeue(), Some("a"));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::from_heap(BinaryHeap::new(comparator))
    }

    /// Creates a queue and enqueues `elements` one at a time, in iteration
    /// order. Equal-ranked elements come out exactly as they would after the
    /// same sequence of [`enqueue`](Self::enqueue) calls.
    pub fn with_elements<I>(elements: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut queue = Self::with_comparator(comparator);
        queue.extend(elements);
        queue
    }

    /// Builds a queue from `elements` in one linear-time heapify pass.
    ///
    /// Dequeue order matches [`with_elements`](Self::with_elements) except
    /// among equal-ranked elements, and no enqueue calls are recorded.
    pub fn heapify(elements: Vec<T>, comparator: C) -> Self {
        Self::from_heap(BinaryHeap::from_vec(elements, comparator))
    }

    fn from_heap(heap: BinaryHeap<T, C>) -> Self {
        Self {
            heap,
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::default(),
        }
    }

    pub fn enqueue(&mut self, value: T) {
        #[cfg(feature = "metrics")]
        self.metrics.record_enqueue();

        self.heap.push(value);
    }

    /// Removes the element that ranks first. `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_dequeue_call();

        let value = self.heap.pop();

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_dequeue_found();
        }
        value
    }

    pub fn peek(&self) -> Option<&T> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let value = self.heap.first();

        #[cfg(feature = "metrics")]
        if value.is_some() {
            (&self.metrics).record_peek_found();
        }
        value
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every element and keeps the ordering.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.heap.clear();
    }

    pub fn comparator(&self) -> &C {
        self.heap.comparator()
    }

    /// Iterates elements in heap storage order (cheap, unordered).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Iterates a copy of the queue in dequeue order, leaving `self` intact.
    pub fn iter_ordered(&self) -> binary_heap::IntoIter<T, C>
    where
        T: Clone,
        C: Clone,
    {
        self.heap.clone().into_iter()
    }

    /// Consumes the queue, returning elements in dequeue order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec()
    }

    /// A class object that builds queues with this queue's ordering.
    pub fn class(&self) -> PriorityQueueClass<C>
    where
        C: Clone,
    {
        PriorityQueueClass::new(self.heap.comparator().clone())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.heap.debug_validate_invariants();
    }
}

#[cfg(feature = "metrics")]
impl<T, C> PriorityQueue<T, C>
where
    C: Comparator<T>,
{
    pub fn metrics_snapshot(&self) -> QueueMetricsSnapshot {
        QueueMetricsSnapshot {
            enqueue_calls: self.metrics.enqueue_calls,
            dequeue_calls: self.metrics.dequeue_calls,
            dequeue_found: self.metrics.dequeue_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            clear_calls: self.metrics.clear_calls,
            queue_len: self.heap.len(),
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<T, C> MetricsSnapshotProvider<QueueMetricsSnapshot> for PriorityQueue<T, C>
where
    C: Comparator<T>,
{
    fn snapshot(&self) -> QueueMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<T, C> PriorityQueueTrait<T> for PriorityQueue<T, C>
where
    C: Comparator<T>,
{
    #[inline]
    fn enqueue(&mut self, value: T) {
        PriorityQueue::enqueue(self, value)
    }

    #[inline]
    fn dequeue(&mut self) -> Option<T> {
        PriorityQueue::dequeue(self)
    }

    #[inline]
    fn peek(&self) -> Option<&T> {
        PriorityQueue::peek(self)
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        PriorityQueue::clear(self)
    }
}

impl<T, C> Clone for PriorityQueue<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            heap: self.heap.clone(),
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::default(),
        }
    }
}

impl<T, C> Default for PriorityQueue<T, C>
where
    C: Comparator<T> + Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}

impl<T, C> Extend<T> for PriorityQueue<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T, C> FromIterator<T> for PriorityQueue<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_elements(iter, C::default())
    }
}

impl<T, C> IntoIterator for PriorityQueue<T, C>
where
    C: Comparator<T>,
{
    type Item = T;
    type IntoIter = binary_heap::IntoIter<T, C>;

    /// Drains the queue in dequeue order.
    fn into_iter(self) -> Self::IntoIter {
        self.heap.into_iter()
    }
}

/// Thread-safe priority queue using `parking_lot::RwLock`.
#[cfg(feature = "concurrency")]
pub struct ConcurrentPriorityQueue<T, C = NaturalOrder> {
    inner: Arc<RwLock<PriorityQueue<T, C>>>,
}

#[cfg(feature = "concurrency")]
impl<T, C> Clone for ConcurrentPriorityQueue<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<T, C> fmt::Debug for ConcurrentPriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentPriorityQueue")
            .field("len", &self.inner.read().heap.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<T, C> ConcurrentPriorityQueue<T, C>
where
    T: Send + Sync,
    C: Comparator<T> + Send + Sync,
{
    /// Creates an empty queue ordered by `comparator`.
    ///
    /// ```
    /// use containerkit::ds::NaturalOrder;
    /// use containerkit::queue::ConcurrentPriorityQueue;
    ///
    /// let queue = ConcurrentPriorityQueue::with_comparator(NaturalOrder);
    /// let producer = queue.clone();
    /// std::thread::spawn(move || producer.enqueue(3)).join().unwrap();
    /// queue.enqueue(1);
    /// assert_eq!(queue.dequeue(), Some(1));
    /// assert_eq!(queue.dequeue(), Some(3));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::from_queue(PriorityQueue::with_comparator(comparator))
    }

    /// Wraps an existing queue.
    pub fn from_queue(queue: PriorityQueue<T, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(queue)),
        }
    }

    pub fn enqueue(&self, value: T) {
        self.inner.write().enqueue(value);
    }

    pub fn dequeue(&self) -> Option<T> {
        self.inner.write().dequeue()
    }

    /// Runs `f` on the first-ranked element under the read lock.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let queue = self.inner.read();
        queue.peek().map(f)
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.peek_with(T::clone)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Copies the queue out in dequeue order, under the read lock.
    pub fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Clone,
        C: Clone,
    {
        self.inner.read().iter_ordered().collect()
    }
}

#[cfg(feature = "concurrency")]
impl<T, C> Extend<T> for ConcurrentPriorityQueue<T, C>
where
    T: Send + Sync,
    C: Comparator<T> + Send + Sync,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.write().extend(iter);
    }
}

#[cfg(feature = "concurrency")]
impl<T, C> ConcurrentCache for ConcurrentPriorityQueue<T, C>
where
    T: Send + Sync,
    C: Send + Sync,
{
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<T, C> ConcurrentPriorityQueue<T, C>
where
    T: Send + Sync,
    C: Comparator<T> + Send + Sync,
{
    pub fn metrics_snapshot(&self) -> QueueMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::binary_heap::FnComparator;

    #[test]
    fn min_first_dequeues_ascending() {
        let mut queue = PriorityQueue::min_first();
        for n in [5, 3, 8, 1] {
            queue.enqueue(n);
        }
        let drained: Vec<_> = std::iter::from_fn(|| queue.dequeue()).collect();
        assert_eq!(drained, vec![1, 3, 5, 8]);
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn max_first_dequeues_descending() {
        let queue: PriorityQueue<_, _> = {
            let mut q = PriorityQueue::max_first();
            q.extend([5, 3, 8, 1]);
            q
        };
        assert_eq!(queue.into_sorted_vec(), vec![8, 5, 3, 1]);
    }

    #[test]
    fn iter_ordered_leaves_queue_untouched() {
        let mut queue = PriorityQueue::min_first();
        queue.extend([4, 2, 9]);
        let ordered: Vec<_> = queue.iter_ordered().collect();
        assert_eq!(ordered, vec![2, 4, 9]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().len(), 3);
        assert_eq!(queue.dequeue(), Some(2));
    }

    #[test]
    fn clear_keeps_comparator() {
        let mut queue = PriorityQueue::max_first();
        queue.extend([1, 2]);
        queue.clear();
        assert!(queue.is_empty());
        queue.extend([1, 7, 3]);
        assert_eq!(queue.peek(), Some(&7));
    }

    #[test]
    fn collect_uses_default_comparator() {
        let queue: PriorityQueue<u32> = [9, 4, 6].into_iter().collect();
        assert_eq!(queue.peek(), Some(&4));
        queue.debug_validate_invariants();
        assert_eq!(queue.into_iter().collect::<Vec<_>>(), vec![4, 6, 9]);
    }

    #[test]
    fn closure_comparator_orders_by_key() {
        let by_priority = FnComparator(|a: &(u8, &str), b: &(u8, &str)| b.0.cmp(&a.0));
        let mut queue = PriorityQueue::with_elements(
            [(1, "low"), (9, "urgent"), (5, "normal")],
            by_priority,
        );
        assert_eq!(queue.dequeue().map(|(_, name)| name), Some("urgent"));
        assert_eq!(queue.dequeue().map(|(_, name)| name), Some("normal"));
    }

    #[test]
    fn with_elements_keeps_enqueue_order_for_ties() {
        let items = [(1, 'a'), (1, 'b'), (0, 'c'), (1, 'd'), (0, 'e')];
        let by_rank = |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0);

        let mut one_by_one = PriorityQueue::with_comparator(FnComparator(by_rank));
        for item in items {
            one_by_one.enqueue(item);
        }
        let expected = one_by_one.into_sorted_vec();
        assert_eq!(expected, vec![(0, 'c'), (0, 'e'), (1, 'd'), (1, 'a'), (1, 'b')]);

        let built = PriorityQueue::with_elements(items, FnComparator(by_rank));
        assert_eq!(built.into_sorted_vec(), expected);
        let built = PriorityQueueClass::new(FnComparator(by_rank)).new_queue_with_elements(items);
        assert_eq!(built.into_sorted_vec(), expected);
    }

    #[test]
    fn heapify_builds_valid_queue() {
        let queue = PriorityQueue::heapify(vec![9, 4, 7, 1, 8], NaturalOrder);
        queue.debug_validate_invariants();
        assert_eq!(queue.into_sorted_vec(), vec![1, 4, 7, 8, 9]);
    }

    #[test]
    fn class_builds_queue_with_same_order() {
        let queue: PriorityQueue<i32, _> = PriorityQueue::max_first();
        let mut other = queue.class().new_queue();
        other.extend([1, 3, 2]);
        assert_eq!(other.dequeue(), Some(3));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn bulk_construction_counts_every_enqueue() {
        let queue = PriorityQueue::with_elements([3, 1, 2], NaturalOrder);
        assert_eq!(queue.metrics_snapshot().enqueue_calls, 3);
        let collected: PriorityQueue<u32> = [5, 6].into_iter().collect();
        assert_eq!(collected.metrics_snapshot().enqueue_calls, 2);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_count_dequeue_hits() {
        let mut queue = PriorityQueue::min_first();
        queue.enqueue(1);
        queue.dequeue();
        queue.dequeue();
        queue.peek();
        let snapshot = queue.metrics_snapshot();
        assert_eq!(snapshot.enqueue_calls, 1);
        assert_eq!(snapshot.dequeue_calls, 2);
        assert_eq!(snapshot.dequeue_found, 1);
        assert_eq!(snapshot.peek_calls, 1);
        assert_eq!(snapshot.peek_found, 0);
        assert_eq!(snapshot.queue_len, 0);
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn concurrent_queue_basic_ops() {
        let queue = ConcurrentPriorityQueue::with_comparator(Reversed(NaturalOrder));
        queue.enqueue(2);
        queue.enqueue(5);
        assert_eq!(queue.peek(), Some(5));
        assert_eq!(queue.peek_with(|v| v * 10), Some(50));
        assert_eq!(queue.to_sorted_vec(), vec![5, 2]);
        assert_eq!(queue.dequeue(), Some(5));
        assert_eq!(format!("{queue:?}"), "ConcurrentPriorityQueue { len: 1, .. }");
        queue.clear();
        assert!(queue.is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::ds::binary_heap::FnComparator;
    use proptest::prelude::*;

    proptest! {
        /// Interleaved enqueue/dequeue matches a sorted-vector model.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_dequeue_matches_sorted_model(
            ops in prop::collection::vec(prop::option::of(any::<i16>()), 0..200)
        ) {
            let mut queue = PriorityQueue::min_first();
            let mut model: Vec<i16> = Vec::new();
            for op in ops {
                match op {
                    Some(value) => {
                        queue.enqueue(value);
                        model.push(value);
                        model.sort_unstable();
                    }
                    None => {
                        let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                        prop_assert_eq!(queue.dequeue(), expected);
                    }
                }
                prop_assert_eq!(queue.len(), model.len());
                prop_assert_eq!(queue.peek(), model.first());
            }
        }

        /// Bulk construction drains exactly like one-by-one enqueues, ties included.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_with_elements_matches_enqueue(
            values in prop::collection::vec((0u8..4, any::<u16>()), 0..100)
        ) {
            let by_rank = |a: &(u8, u16), b: &(u8, u16)| a.0.cmp(&b.0);
            let built = PriorityQueue::with_elements(values.clone(), FnComparator(by_rank));
            let mut pushed = PriorityQueue::with_comparator(FnComparator(by_rank));
            for value in values {
                pushed.enqueue(value);
            }
            prop_assert_eq!(built.into_sorted_vec(), pushed.into_sorted_vec());
        }

        /// Heapify agrees with enqueueing once ties are impossible.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_heapify_matches_enqueue_for_distinct_values(
            values in prop::collection::btree_set(any::<u16>(), 0..100)
        ) {
            let values: Vec<u16> = values.into_iter().collect();
            let built = PriorityQueue::heapify(values.clone(), Reversed(NaturalOrder));
            let mut pushed = PriorityQueue::max_first();
            pushed.extend(values);
            prop_assert_eq!(built.into_sorted_vec(), pushed.into_sorted_vec());
        }
    }
}
