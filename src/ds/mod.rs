pub mod binary_heap;
pub mod hash_table;
pub mod intrusive_list;
pub mod slot_arena;

pub use binary_heap::{BinaryHeap, Comparator, FnComparator, NaturalOrder, Reversed};
pub use hash_table::{
    BuildHasherStrategy, DEFAULT_MAX_LOAD_FACTOR, FnHashStrategy, FxHashStrategy, HashStrategy,
    HashTable, MIN_BUCKETS,
};
pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
