use containerkit::ds::NaturalOrder;
use containerkit::queue::PriorityQueue;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_values(n: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    (0..n).map(|_| rng.random()).collect()
}

fn bench_queue_enqueue(c: &mut Criterion) {
    let values = random_values(4096);
    c.bench_function("priority_queue_enqueue", |b| {
        b.iter_batched(
            PriorityQueue::min_first,
            |mut queue| {
                for &value in &values {
                    queue.enqueue(std::hint::black_box(value));
                }
                queue
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queue_drain(c: &mut Criterion) {
    let values = random_values(4096);
    c.bench_function("priority_queue_drain", |b| {
        b.iter_batched(
            || PriorityQueue::with_elements(values.clone(), NaturalOrder),
            |mut queue| {
                while let Some(value) = queue.dequeue() {
                    std::hint::black_box(value);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queue_heapify_vs_push(c: &mut Criterion) {
    let values = random_values(4096);
    let mut group = c.benchmark_group("priority_queue_build");
    group.bench_function("heapify", |b| {
        b.iter_batched(
            || values.clone(),
            |values| PriorityQueue::heapify(values, NaturalOrder),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("extend", |b| {
        b.iter_batched(
            || values.clone(),
            |values| {
                let mut queue = PriorityQueue::min_first();
                queue.extend(values);
                queue
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_queue_mixed(c: &mut Criterion) {
    let values = random_values(8192);
    c.bench_function("priority_queue_mixed", |b| {
        b.iter_batched(
            || PriorityQueue::with_elements(values[..1024].iter().copied(), NaturalOrder),
            |mut queue| {
                for &value in &values[1024..] {
                    queue.enqueue(value);
                    std::hint::black_box(queue.dequeue());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_queue_enqueue,
    bench_queue_drain,
    bench_queue_heapify_vs_push,
    bench_queue_mixed
);
criterion_main!(benches);
