//! Open-chaining hash table with pluggable hashing and equality.
//!
//! Keys are placed by a caller-supplied [`HashStrategy`], which provides both
//! the hash function and the equality test. Each bucket holds a singly linked
//! chain of owned entries; new entries are prepended.
//!
//! ## Architecture
//!
//! ```text
//!   buckets (len = 11)
//!   ┌────┬──────────────────────────────────────────┐
//!   │  0 │ None                                     │
//!   │  1 │ [k12 → v] ─► [k1 → v] ─► None            │
//!   │  2 │ [k2 → v] ─► None                         │
//!   │ .. │ ...                                      │
//!   │ 10 │ [k21 → v] ─► None                        │
//!   └────┴──────────────────────────────────────────┘
//!
//!   bucket(key) = |hash(key) rem bucket_count|
//! ```
//!
//! ## Resize policy
//!
//! The load factor is kept in integer percent. After every
//! [`add_entry`](HashTable::add_entry) the table grows when
//! `len * 100 > bucket_count * max_load_factor`, to `2 * bucket_count + 1`
//! buckets (never fewer than [`MIN_BUCKETS`]). Every entry is rehashed, and
//! the order of colliding keys inside a bucket is not preserved.
//!
//! ## Example
//!
//! ```
//! use containerkit::ds::{FnHashStrategy, HashTable};
//!
//! // Case-insensitive keys.
//! let strategy = FnHashStrategy::new(
//!     |key: &String| {
//!         key.bytes()
//!             .fold(0i64, |h, b| h.wrapping_mul(31).wrapping_add(b.to_ascii_lowercase() as i64))
//!     },
//!     |a: &String, b: &String| a.eq_ignore_ascii_case(b),
//! );
//! let mut table = HashTable::with_strategy(strategy);
//! table.add_entry("Alpha".to_string(), 1);
//! assert_eq!(table.get(&"ALPHA".to_string()), Some(&1));
//! ```
use std::fmt;

use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};

/// Smallest bucket count a table is created or resized with.
pub const MIN_BUCKETS: usize = 11;

/// Default resize threshold, in percent of the bucket count.
pub const DEFAULT_MAX_LOAD_FACTOR: usize = 80;

/// Hash function and equality test used to place and find keys.
///
/// Implementations must be consistent: keys that compare equal must hash to
/// the same value.
pub trait HashStrategy<K: ?Sized> {
    fn hash(&self, key: &K) -> i64;
    fn equals(&self, a: &K, b: &K) -> bool;
}

/// [`HashStrategy`] built from a [`BuildHasher`] and the key's `Eq`.
#[derive(Debug, Clone, Default)]
pub struct BuildHasherStrategy<S = FxBuildHasher> {
    build_hasher: S,
}

/// The default strategy: FxHash plus `Eq`.
pub type FxHashStrategy = BuildHasherStrategy<FxBuildHasher>;

impl<S> BuildHasherStrategy<S> {
    pub fn new(build_hasher: S) -> Self {
        Self { build_hasher }
    }
}

impl<K, S> HashStrategy<K> for BuildHasherStrategy<S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> i64 {
        self.build_hasher.hash_one(key) as i64
    }

    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// [`HashStrategy`] made of two closures.
#[derive(Clone)]
pub struct FnHashStrategy<H, E> {
    hash: H,
    equals: E,
}

impl<H, E> FnHashStrategy<H, E> {
    pub fn new(hash: H, equals: E) -> Self {
        Self { hash, equals }
    }
}

impl<K, H, E> HashStrategy<K> for FnHashStrategy<H, E>
where
    K: ?Sized,
    H: Fn(&K) -> i64,
    E: Fn(&K, &K) -> bool,
{
    #[inline]
    fn hash(&self, key: &K) -> i64 {
        (self.hash)(key)
    }

    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        (self.equals)(a, b)
    }
}

impl<H, E> fmt::Debug for FnHashStrategy<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHashStrategy").finish_non_exhaustive()
    }
}

struct Entry<K, V> {
    key: K,
    value: V,
    next: Option<Box<Entry<K, V>>>,
}

type Chain<K, V> = Option<Box<Entry<K, V>>>;

#[inline]
fn bucket_for(hash: i64, bucket_count: usize) -> usize {
    // remainder first, then drop the sign
    (hash % bucket_count as i64).unsigned_abs() as usize
}

fn empty_buckets<K, V>(count: usize) -> Vec<Chain<K, V>> {
    let mut buckets = Vec::with_capacity(count);
    buckets.resize_with(count, || None);
    buckets
}

/// Chained hash table keyed through a [`HashStrategy`].
///
/// [`add_entry`](Self::add_entry) does not look for an existing key; use
/// [`insert`](Self::insert) for upsert semantics.
pub struct HashTable<K, V, H = FxHashStrategy> {
    buckets: Vec<Chain<K, V>>,
    len: usize,
    max_load_factor: usize,
    strategy: H,
    resizes: u64,
}

impl<K, V, H> HashTable<K, V, H> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Resize threshold in percent.
    pub fn max_load_factor(&self) -> usize {
        self.max_load_factor
    }

    pub fn strategy(&self) -> &H {
        &self.strategy
    }

    /// Number of times the table has grown since it was created.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    /// Drops every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut chain = bucket.take();
            while let Some(mut entry) = chain {
                chain = entry.next.take();
            }
        }
        self.len = 0;
    }

    /// Iterates entries from the last bucket to the first, each chain head first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            chain: None,
            remaining: self.len,
        }
    }

    /// Chain length of every bucket, in bucket order.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_bucket_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|bucket| {
                let mut count = 0;
                let mut link = bucket.as_deref();
                while let Some(entry) = link {
                    count += 1;
                    link = entry.next.as_deref();
                }
                count
            })
            .collect()
    }
}

impl<K, V, H> HashTable<K, V, H>
where
    H: HashStrategy<K> + Default,
{
    /// Creates an empty table with [`MIN_BUCKETS`] buckets and the default
    /// load factor.
    pub fn new() -> Self {
        Self::with_config(MIN_BUCKETS, DEFAULT_MAX_LOAD_FACTOR, H::default())
    }
}

impl<K, V, H> HashTable<K, V, H>
where
    H: HashStrategy<K>,
{
    /// Creates an empty table using `strategy`.
    pub fn with_strategy(strategy: H) -> Self {
        Self::with_config(MIN_BUCKETS, DEFAULT_MAX_LOAD_FACTOR, strategy)
    }

    /// Creates an empty table.
    ///
    /// `initial_buckets` below [`MIN_BUCKETS`] is raised to it, and a
    /// `max_load_factor` of zero is raised to one percent.
    pub fn with_config(initial_buckets: usize, max_load_factor: usize, strategy: H) -> Self {
        Self {
            buckets: empty_buckets(initial_buckets.max(MIN_BUCKETS)),
            len: 0,
            max_load_factor: max_load_factor.max(1),
            strategy,
            resizes: 0,
        }
    }

    /// Bucket `key` lives in under the current bucket count.
    pub fn bucket_index(&self, key: &K) -> usize {
        bucket_for(self.strategy.hash(key), self.buckets.len())
    }

    /// Returns the stored key and value matching `key`.
    pub fn find_entry(&self, key: &K) -> Option<(&K, &V)> {
        let mut link = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(entry) = link {
            if self.strategy.equals(key, &entry.key) {
                return Some((&entry.key, &entry.value));
            }
            link = entry.next.as_deref();
        }
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_entry(key).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket = self.bucket_index(key);
        let strategy = &self.strategy;
        let mut link = self.buckets[bucket].as_deref_mut();
        while let Some(entry) = link {
            if strategy.equals(key, &entry.key) {
                return Some(&mut entry.value);
            }
            link = entry.next.as_deref_mut();
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_entry(key).is_some()
    }

    /// Prepends a new entry to its bucket, then grows the table if the load
    /// factor threshold is exceeded.
    ///
    /// An existing entry for an equal key is not replaced; it is shadowed
    /// until the new entry is deleted.
    pub fn add_entry(&mut self, key: K, value: V) {
        let bucket = self.bucket_index(&key);
        let next = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(Entry { key, value, next }));
        self.len += 1;
        if self.is_overloaded() {
            let grown = (self.buckets.len() * 2 + 1).max(MIN_BUCKETS);
            self.resize(grown);
        }
    }

    /// Replaces the value for `key` if present, otherwise adds a new entry.
    /// Returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.add_entry(key, value);
        None
    }

    /// Unlinks the first entry in `key`'s chain that equals `key`.
    pub fn delete_entry(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Like [`delete_entry`](Self::delete_entry) but also returns the stored key.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let bucket = self.bucket_index(key);
        let strategy = &self.strategy;
        let mut link = &mut self.buckets[bucket];
        while link
            .as_ref()
            .is_some_and(|entry| !strategy.equals(key, &entry.key))
        {
            link = &mut link.as_mut()?.next;
        }
        let mut entry = link.take()?;
        *link = entry.next.take();
        self.len -= 1;
        Some((entry.key, entry.value))
    }

    fn is_overloaded(&self) -> bool {
        self.len.saturating_mul(100) > self.buckets.len().saturating_mul(self.max_load_factor)
    }

    fn resize(&mut self, bucket_count: usize) {
        let old = std::mem::replace(&mut self.buckets, empty_buckets(bucket_count));
        let old_count = old.len();
        for mut chain in old.into_iter().rev() {
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                let bucket = bucket_for(self.strategy.hash(&entry.key), bucket_count);
                entry.next = self.buckets[bucket].take();
                self.buckets[bucket] = Some(entry);
            }
        }
        self.resizes += 1;
        tracing::debug!(
            target: "containerkit::hash_table",
            old_buckets = old_count,
            new_buckets = bucket_count,
            entries = self.len,
            "hash table resized"
        );
    }

    /// Checks chain placement and the entry count (debug/test builds only).
    ///
    /// The load factor is not checked: growth happens once per insert, so a
    /// table with a very low threshold can stay above it for several inserts.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut count = 0usize;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            let mut link = bucket.as_deref();
            while let Some(entry) = link {
                assert_eq!(
                    bucket_for(self.strategy.hash(&entry.key), self.buckets.len()),
                    idx,
                    "entry stored in the wrong bucket"
                );
                count += 1;
                link = entry.next.as_deref();
            }
        }
        assert_eq!(count, self.len);
        assert!(self.buckets.len() >= MIN_BUCKETS);
    }
}

impl<K, V, H> Default for HashTable<K, V, H>
where
    H: HashStrategy<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> Drop for HashTable<K, V, H> {
    fn drop(&mut self) {
        // unlink iteratively so a long chain cannot overflow the stack
        self.clear();
    }
}

impl<K, V, H> fmt::Debug for HashTable<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, H> IntoIterator for &'a HashTable<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(&K, &V)` in bucket order, last bucket first.
pub struct Iter<'a, K, V> {
    buckets: &'a [Chain<K, V>],
    chain: Option<&'a Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, &entry.value));
            }
            let (last, rest) = self.buckets.split_last()?;
            self.buckets = rest;
            self.chain = last.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_strategy()
    -> FnHashStrategy<impl Fn(&i64) -> i64 + Clone, impl Fn(&i64, &i64) -> bool + Clone> {
        FnHashStrategy::new(|key: &i64| *key, |a: &i64, b: &i64| a == b)
    }

    #[test]
    fn hash_table_lowest_load_factor_grows_once_per_insert() {
        let mut table = HashTable::with_config(MIN_BUCKETS, 1, FxHashStrategy::default());
        table.add_entry(1u32, 'a');
        assert_eq!(table.bucket_count(), 23);
        table.add_entry(2, 'b');
        // still above the threshold after growing to 47
        assert_eq!(table.bucket_count(), 47);
        table.debug_validate_invariants();

        for key in 3..=8 {
            table.add_entry(key, 'x');
            table.debug_validate_invariants();
        }
        // grew on inserts 1-6 and 8, never twice for one insert
        assert_eq!(table.resize_count(), 7);
        assert_eq!(table.bucket_count(), 1535);
        assert_eq!(table.get(&2), Some(&'b'));
    }

    #[test]
    fn hash_table_starts_with_minimum_buckets() {
        let table: HashTable<u32, u32> = HashTable::with_config(3, 80, FxHashStrategy::default());
        assert_eq!(table.bucket_count(), MIN_BUCKETS);
        assert_eq!(table.max_load_factor(), 80);
        assert!(table.is_empty());
    }

    #[test]
    fn hash_table_ninth_insert_triggers_single_resize() {
        let mut table = HashTable::with_config(11, 80, identity_strategy());
        for key in 0..8 {
            table.add_entry(key, key * 10);
        }
        // 800 <= 880
        assert_eq!(table.bucket_count(), 11);
        assert_eq!(table.resize_count(), 0);

        table.add_entry(8, 80);
        // 900 > 880, grows to 2 * 11 + 1
        assert_eq!(table.bucket_count(), 23);
        assert_eq!(table.resize_count(), 1);
        assert_eq!(table.len(), 9);
        for key in 0..9 {
            assert_eq!(table.get(&key), Some(&(key * 10)));
        }
        table.debug_validate_invariants();
    }

    #[test]
    fn hash_table_negative_hash_uses_absolute_remainder() {
        let table: HashTable<i64, (), _> = HashTable::with_config(11, 80, identity_strategy());
        assert_eq!(table.bucket_index(&-5), 5);
        assert_eq!(table.bucket_index(&-16), 5);
        assert_eq!(table.bucket_index(&16), 5);
        assert_eq!(table.bucket_index(&i64::MIN), (i64::MIN % 11).unsigned_abs() as usize);
    }

    #[test]
    fn hash_table_colliding_keys_share_a_chain() {
        let strategy = FnHashStrategy::new(|_: &&str| 7, |a: &&str, b: &&str| a == b);
        let mut table = HashTable::with_strategy(strategy);
        table.add_entry("a", 1);
        table.add_entry("b", 2);
        table.add_entry("c", 3);

        let lengths = table.debug_bucket_lengths();
        assert_eq!(lengths[7], 3);
        assert_eq!(lengths.iter().sum::<usize>(), 3);

        // middle of the chain
        assert_eq!(table.delete_entry(&"b"), Some(2));
        assert_eq!(table.get(&"a"), Some(&1));
        assert_eq!(table.get(&"c"), Some(&3));
        // chain head
        assert_eq!(table.delete_entry(&"c"), Some(3));
        // chain tail
        assert_eq!(table.delete_entry(&"a"), Some(1));
        assert!(table.is_empty());
        table.debug_validate_invariants();
    }

    #[test]
    fn hash_table_delete_missing_is_noop() {
        let mut table: HashTable<&str, u8> = HashTable::new();
        table.add_entry("x", 1);
        assert_eq!(table.delete_entry(&"y"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn hash_table_add_entry_shadows_duplicates() {
        let mut table: HashTable<&str, u8> = HashTable::new();
        table.add_entry("k", 1);
        table.add_entry("k", 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"k"), Some(&2));
        assert_eq!(table.delete_entry(&"k"), Some(2));
        assert_eq!(table.get(&"k"), Some(&1));
    }

    #[test]
    fn hash_table_insert_upserts() {
        let mut table: HashTable<String, u32> = HashTable::new();
        assert_eq!(table.insert("a".into(), 1), None);
        assert_eq!(table.insert("a".into(), 2), Some(1));
        assert_eq!(table.len(), 1);
        if let Some(value) = table.get_mut(&"a".to_string()) {
            *value += 40;
        }
        assert_eq!(table.find_entry(&"a".to_string()), Some((&"a".to_string(), &42)));
    }

    #[test]
    fn hash_table_clear_keeps_buckets() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        for key in 0..100 {
            table.add_entry(key, key);
        }
        let buckets = table.bucket_count();
        assert!(buckets > MIN_BUCKETS);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.bucket_count(), buckets);
        assert_eq!(table.get(&5), None);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn hash_table_iterates_last_bucket_first() {
        let mut table = HashTable::with_strategy(identity_strategy());
        table.add_entry(0, 'a');
        table.add_entry(1, 'b');
        table.add_entry(2, 'c');
        table.add_entry(13, 'd'); // same bucket as 2, prepended
        let keys: Vec<_> = table.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![13, 2, 1, 0]);
        assert_eq!(table.iter().len(), 4);
    }

    #[test]
    fn hash_table_long_chain_drops_cleanly() {
        let strategy = FnHashStrategy::new(|_: &u32| 0, |a: &u32, b: &u32| a == b);
        let mut table = HashTable::with_config(MIN_BUCKETS, 1_000_000_000, strategy);
        for key in 0..100_000 {
            table.add_entry(key, ());
        }
        assert_eq!(table.debug_bucket_lengths()[0], 100_000);
        drop(table);
    }

    #[test]
    fn hash_table_debug_formats_as_map() {
        let mut table: HashTable<u8, &str> = HashTable::new();
        table.add_entry(1, "one");
        assert_eq!(format!("{table:?}"), r#"{1: "one"}"#);
    }
}
