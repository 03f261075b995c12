#![no_main]

use containerkit::ds::{FnHashStrategy, HashTable, MIN_BUCKETS};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

// Fuzz upserts, duplicate adds and deletes on a HashTable whose hash function
// is deliberately weak (many collisions, negative hashes) and compare against
// std's HashMap.
fuzz_target!(|data: &[u8]| {
    let Some((&load, ops)) = data.split_first() else {
        return;
    };
    let strategy = FnHashStrategy::new(
        |key: &u16| i64::from(*key % 37) - 18,
        |a: &u16, b: &u16| a == b,
    );
    let mut table = HashTable::with_config(MIN_BUCKETS, usize::from(load % 200) + 1, strategy);
    let mut model: HashMap<u16, u16> = HashMap::new();

    for chunk in ops.chunks_exact(3) {
        let key = u16::from(chunk[1]);
        let value = u16::from(chunk[2]);
        match chunk[0] % 4 {
            0 => {
                assert_eq!(table.insert(key, value), model.insert(key, value));
            }
            1 => {
                assert_eq!(table.delete_entry(&key), model.remove(&key));
            }
            2 => {
                assert_eq!(table.get(&key), model.get(&key));
                assert_eq!(table.contains_key(&key), model.contains_key(&key));
            }
            3 => {
                if chunk[1] == 0 {
                    let buckets = table.bucket_count();
                    table.clear();
                    model.clear();
                    assert_eq!(table.bucket_count(), buckets);
                }
            }
            _ => unreachable!(),
        }
        assert_eq!(table.len(), model.len());
        assert!(table.bucket_count() >= MIN_BUCKETS);
    }

    assert_eq!(table.iter().count(), model.len());
    for (key, value) in &table {
        assert_eq!(model.get(key), Some(value));
    }
    #[cfg(debug_assertions)]
    table.debug_validate_invariants();
});
