use containerkit::policy::lru::LruCache;
use std::sync::mpsc;

fn main() {
    // evicted entries are flushed to a "backing store" over a channel
    let (tx, rx) = mpsc::channel();
    let mut cache = LruCache::with_callback(2, move |key: &'static str, value: u32| {
        let _ = tx.send((key, value));
    });

    cache.insert("k1", 1);
    cache.insert("k2", 2);
    cache.insert("k3", 3);
    cache.get(&"k2");
    cache.insert("k4", 4);

    // explicit removal does not count as an eviction
    cache.remove(&"k4");

    drop(cache);
    for (key, value) in rx {
        println!("flushed {key}={value}");
    }
}

// Expected output:
// flushed k1=1
// flushed k3=3
