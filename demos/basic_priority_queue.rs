use containerkit::builder::PriorityQueueClass;
use containerkit::ds::FnComparator;
use containerkit::queue::PriorityQueue;

#[derive(Debug, Clone)]
struct Job {
    name: &'static str,
    priority: u8,
}

fn main() {
    let mut numbers = PriorityQueue::min_first();
    numbers.extend([5, 3, 8, 1]);
    let drained: Vec<_> = std::iter::from_fn(|| numbers.dequeue()).collect();
    println!("min-first: {drained:?}");

    // highest priority first
    let by_priority = FnComparator(|a: &Job, b: &Job| b.priority.cmp(&a.priority));
    let jobs = PriorityQueueClass::new(by_priority);
    let mut queue = jobs.new_queue_with_elements([
        Job { name: "backup", priority: 1 },
        Job { name: "page-oncall", priority: 9 },
        Job { name: "reindex", priority: 4 },
    ]);
    println!("next: {:?}", queue.peek().map(|job| job.name));
    while let Some(job) = queue.dequeue() {
        println!("run {} (priority {})", job.name, job.priority);
    }
}

// Expected output:
// min-first: [1, 3, 5, 8]
// next: Some("page-oncall")
// run page-oncall (priority 9)
// run reindex (priority 4)
// run backup (priority 1)
