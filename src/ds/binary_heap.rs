//! Array-backed binary heap ordered by a caller-supplied [`Comparator`].
//!
//! Unlike `std::collections::BinaryHeap`, the ordering is a value carried by
//! the heap rather than the element's `Ord` impl, so the same element type can
//! be queued min-first, max-first, or by an arbitrary key.
//!
//! ## Architecture
//!
//! ```text
//!   elements: [ 1 | 3 | 8 | 5 ]          (NaturalOrder, min-first)
//!
//!                 1            parent(i) = (i - 1) / 2
//!               /   \          left(i)   = 2i + 1
//!              3     8         right(i)  = 2i + 2
//!             /
//!            5
//! ```
//!
//! `compare(a, b) == Less` means `a` ranks ahead of `b`. The heap keeps
//! `compare(parent, child) != Greater` for every child, so `elements[0]` is
//! always the element that leaves next.
//!
//! ## Operations
//!
//! | Operation   | Time      |
//! |-------------|-----------|
//! | `push`      | O(log n)  |
//! | `pop`       | O(log n)  |
//! | `first`     | O(1)      |
//! | `from_vec`  | O(n)      |
//!
//! When both children of a node compare equal during sift-down, the left
//! child is promoted. Equal elements therefore leave in an order decided by
//! their array positions, not by insertion order.
//!
//! ## Example
//!
//! ```
//! use containerkit::ds::{BinaryHeap, NaturalOrder};
//!
//! let mut heap = BinaryHeap::new(NaturalOrder);
//! for n in [5, 3, 8, 1] {
//!     heap.push(n);
//! }
//! assert_eq!(heap.first(), Some(&1));
//! assert_eq!(heap.into_sorted_vec(), vec![1, 3, 5, 8]);
//! ```
use std::cmp::Ordering;
use std::fmt;

/// Three-way comparison deciding which of two elements ranks ahead.
pub trait Comparator<T: ?Sized> {
    /// `Less` when `a` should leave the heap before `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders by `Ord`; the smallest element ranks first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator by swapping its operands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Adapts a closure `Fn(&T, &T) -> Ordering` into a [`Comparator`].
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparator")
    }
}

/// Binary heap over a dense `Vec<T>`.
#[derive(Clone)]
pub struct BinaryHeap<T, C> {
    elements: Vec<T>,
    comparator: C,
}

impl<T, C> BinaryHeap<T, C> {
    /// Returns the element that ranks first without removing it.
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Removes all elements. The comparator is kept.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Iterates elements in storage order (not priority order).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// The backing array, root first.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T, C> BinaryHeap<T, C>
where
    C: Comparator<T>,
{
    /// Creates an empty heap ordered by `comparator`.
    pub fn new(comparator: C) -> Self {
        Self {
            elements: Vec::new(),
            comparator,
        }
    }

    pub fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            comparator,
        }
    }

    /// Builds a heap from arbitrary elements in linear time.
    pub fn from_vec(elements: Vec<T>, comparator: C) -> Self {
        let mut heap = Self {
            elements,
            comparator,
        };
        for idx in (0..heap.elements.len() / 2).rev() {
            heap.sift_down(idx);
        }
        heap
    }

    /// Appends `value` and restores the heap order above it.
    pub fn push(&mut self, value: T) {
        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
    }

    /// Removes and returns the element that ranks first.
    pub fn pop(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let top = self.elements.pop();
        self.sift_down(0);
        top
    }

    /// Drains the heap into a vector in priority order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.elements.len());
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.ranks_ahead(idx, parent) {
                self.elements.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let best = if right < len && self.ranks_ahead(right, left) {
                right
            } else {
                left
            };
            if self.ranks_ahead(best, idx) {
                self.elements.swap(idx, best);
                idx = best;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn ranks_ahead(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.elements[a], &self.elements[b]) == Ordering::Less
    }

    /// Asserts the heap order for every parent/child pair.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        for idx in 1..self.elements.len() {
            let parent = (idx - 1) / 2;
            assert_ne!(
                self.comparator
                    .compare(&self.elements[parent], &self.elements[idx]),
                Ordering::Greater,
                "heap order violated between {parent} and {idx}"
            );
        }
    }
}

impl<T, C> Default for BinaryHeap<T, C>
where
    C: Comparator<T> + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T, C> Extend<T> for BinaryHeap<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.elements.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

impl<T, C> IntoIterator for BinaryHeap<T, C>
where
    C: Comparator<T>,
{
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    /// Consumes the heap, yielding elements in priority order.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { heap: self }
    }
}

/// Owning iterator that pops elements in priority order.
#[derive(Debug, Clone)]
pub struct IntoIter<T, C> {
    heap: BinaryHeap<T, C>,
}

impl<T, C> Iterator for IntoIter<T, C>
where
    C: Comparator<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> where C: Comparator<T> {}
