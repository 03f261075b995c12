use containerkit::ds::{FnHashStrategy, HashTable};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn bench_table_add_entry_growth(c: &mut Criterion) {
    c.bench_function("hash_table_add_entry_growth", |b| {
        b.iter_batched(
            HashTable::<u64, u64>::new,
            |mut table| {
                for i in 0..8192u64 {
                    table.add_entry(std::hint::black_box(i), i);
                }
                table
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_table_lookup(c: &mut Criterion) {
    c.bench_function("hash_table_lookup", |b| {
        b.iter_batched(
            || {
                let mut table: HashTable<u64, u64> = HashTable::new();
                for i in 0..8192u64 {
                    table.add_entry(i, i);
                }
                table
            },
            |table| {
                for i in 0..16_384u64 {
                    let _ = std::hint::black_box(table.get(&std::hint::black_box(i)));
                }
                table
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_table_delete(c: &mut Criterion) {
    c.bench_function("hash_table_delete", |b| {
        b.iter_batched(
            || {
                let mut table: HashTable<u64, u64> = HashTable::new();
                for i in 0..8192u64 {
                    table.add_entry(i, i);
                }
                table
            },
            |mut table| {
                for i in 0..8192u64 {
                    let _ = std::hint::black_box(table.delete_entry(&i));
                }
                table
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_table_load_factor(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_table_load_factor");
    for load in [40usize, 80, 200] {
        group.bench_function(format!("lf_{load}"), |b| {
            b.iter_batched(
                || {
                    HashTable::with_config(
                        11,
                        load,
                        FnHashStrategy::new(
                            |k: &u64| k.wrapping_mul(0x9E37_79B9_7F4A_7C15) as i64,
                            |a: &u64, b: &u64| a == b,
                        ),
                    )
                },
                |mut table| {
                    for i in 0..4096u64 {
                        table.add_entry(i, i);
                    }
                    for i in 0..4096u64 {
                        let _ = std::hint::black_box(table.get(&i));
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_table_add_entry_growth,
    bench_table_lookup,
    bench_table_delete,
    bench_table_load_factor
);
criterion_main!(benches);
