#![no_main]

use containerkit::policy::lru::LruCache;
use libfuzzer_sys::fuzz_target;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Fuzz LruCache against a recency-ordered VecDeque model (front = MRU) and
// check that the eviction callback fires exactly for capacity evictions.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16) + 1;
    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let mut cache = LruCache::with_callback(capacity, move |_: u8, _: u8| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    let mut model: VecDeque<(u8, u8)> = VecDeque::new();
    let mut expected_evictions = 0usize;

    let take = |model: &mut VecDeque<(u8, u8)>, key: u8| {
        model
            .iter()
            .position(|(k, _)| *k == key)
            .and_then(|pos| model.remove(pos))
    };

    for chunk in ops.chunks_exact(2) {
        let (op, key) = (chunk[0] % 6, chunk[1] % 32);
        let value = chunk[0];
        match op {
            0 | 1 => {
                let previous = take(&mut model, key).map(|(_, v)| v);
                model.push_front((key, value));
                if model.len() > capacity {
                    model.pop_back();
                    expected_evictions += 1;
                }
                assert_eq!(cache.insert(key, value), previous);
            }
            2 => {
                let hit = take(&mut model, key);
                if let Some(entry) = hit {
                    model.push_front(entry);
                }
                assert_eq!(cache.get(&key).copied(), hit.map(|(_, v)| v));
            }
            3 => {
                let removed = take(&mut model, key).map(|(_, v)| v);
                assert_eq!(cache.remove(&key), removed);
            }
            4 => {
                assert_eq!(cache.pop_lru(), model.pop_back());
            }
            5 => {
                let expected = model.iter().find(|(k, _)| *k == key).map(|(_, v)| v);
                assert_eq!(cache.peek(&key), expected);
            }
            _ => unreachable!(),
        }
        assert_eq!(cache.len(), model.len());
        assert!(cache.len() <= capacity);
        assert_eq!(evictions.load(Ordering::Relaxed), expected_evictions);
    }

    let order: Vec<(u8, u8)> = cache.recency_order().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(order, model.into_iter().collect::<Vec<_>>());
    #[cfg(debug_assertions)]
    cache.debug_validate_invariants();
});
