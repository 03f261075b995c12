// ==============================================
// CONCURRENT WRAPPER TESTS (integration)
// ==============================================
#![cfg(feature = "concurrency")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

mod concurrent_lru {
    use containerkit::policy::lru::ConcurrentLruCache;
    use containerkit::traits::ConcurrentCache;

    use super::*;

    fn assert_concurrent<T: ConcurrentCache + Clone + 'static>() {}

    #[test]
    fn wrapper_is_shareable() {
        assert_concurrent::<ConcurrentLruCache<String, Vec<u8>>>();
    }

    #[test]
    fn parallel_inserts_respect_capacity_and_count_evictions() {
        let evictions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evictions);
        let cache: ConcurrentLruCache<(usize, usize), usize> =
            ConcurrentLruCache::with_callback(64, move |_, _| {
                counter.fetch_add(1, Ordering::Relaxed);
            });

        let num_threads = 8;
        let per_thread = 500;
        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..per_thread {
                        cache.insert((thread_id, i), i);
                        assert!(cache.len() <= 64);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 64);
        assert_eq!(
            evictions.load(Ordering::Relaxed),
            num_threads * per_thread - 64
        );
    }

    #[test]
    fn readers_and_writers_interleave() {
        let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(128);
        for i in 0..128 {
            cache.insert(i, format!("v{i}"));
        }

        let writers: Vec<_> = (0..2)
            .map(|w| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..1_000u32 {
                        let key = (i * 7 + w) % 256;
                        cache.insert(key, format!("v{key}"));
                        let _ = cache.get(&(i % 128));
                    }
                })
            })
            .collect();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..2_000u32 {
                        let key = i % 256;
                        if let Some(value) = cache.peek(&key) {
                            assert_eq!(value, format!("v{key}"));
                        }
                        let _ = cache.peek_with(&key, String::len);
                        assert!(cache.len() <= cache.capacity());
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
        let snapshot = cache.elements_cloned();
        assert_eq!(snapshot.len(), cache.len());
        assert!(snapshot.iter().all(|(k, v)| *v == format!("v{k}")));
    }

    #[test]
    fn removals_race_with_inserts() {
        let cache: ConcurrentLruCache<u16, u16> = ConcurrentLruCache::new(32);
        let inserter = {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..2_000u16 {
                    cache.insert(i % 64, i);
                }
            })
        };
        let remover = {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..2_000u16 {
                    let _ = cache.remove(&(i % 64));
                    let _ = cache.pop_lru();
                }
            })
        };
        inserter.join().unwrap();
        remover.join().unwrap();
        assert!(cache.len() <= 32);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.peek_lru(), None);
    }
}

mod concurrent_priority_queue {
    use containerkit::ds::{NaturalOrder, Reversed};
    use containerkit::queue::ConcurrentPriorityQueue;

    use super::*;

    #[test]
    fn producers_then_drain_in_priority_order() {
        let queue = ConcurrentPriorityQueue::with_comparator(Reversed(NaturalOrder));
        let producers: Vec<_> = (0..4u32)
            .map(|p| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for i in 0..250u32 {
                        queue.enqueue(p * 1_000 + i);
                    }
                })
            })
            .collect();
        for handle in producers {
            handle.join().unwrap();
        }

        assert_eq!(queue.len(), 1_000);
        assert_eq!(queue.peek(), Some(3_249));
        let drained = queue.to_sorted_vec();
        assert!(drained.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn consumers_never_see_an_element_twice() {
        let queue = ConcurrentPriorityQueue::with_comparator(NaturalOrder);
        for i in 0..2_000u32 {
            queue.enqueue(i);
        }
        let taken = Arc::new(AtomicUsize::new(0));
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                let taken = Arc::clone(&taken);
                thread::spawn(move || {
                    let mut last = None;
                    while let Some(value) = queue.dequeue() {
                        // each consumer sees an increasing subsequence
                        if let Some(prev) = last {
                            assert!(value > prev);
                        }
                        last = Some(value);
                        taken.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();
        for handle in consumers {
            handle.join().unwrap();
        }
        assert_eq!(taken.load(Ordering::Relaxed), 2_000);
        assert!(queue.is_empty());
    }
}
