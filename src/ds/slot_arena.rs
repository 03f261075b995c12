//! Slot arena with stable, generation-checked handles.
//!
//! Values live in a `Vec` of slots; vacated slots go onto a free list and are
//! reused by later inserts. Every insert stamps its slot with a fresh
//! generation, and a [`SlotId`] carries the stamp it was issued with, so an id
//! whose slot has since been freed (and possibly reused) resolves to nothing.
//!
//! ```text
//!   slots:     [ a@0 | -@1 | c@2 | -@3 ]     value@generation
//!   free_list: [ 3, 1 ]                      (next insert reuses slot 1 as @4)
//! ```
//!
//! Used as backing storage for [`IntrusiveList`](crate::ds::IntrusiveList)
//! nodes, which is how the LRU cache gets O(1) relinking without raw pointers.

/// Handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId {
    index: usize,
    generation: u64,
}

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns the generation stamp the id was issued with.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

/// Vector-backed arena that hands out [`SlotId`]s.
#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
    // never reset, so ids issued before `clear` or `shrink_to_fit` stay dead
    next_generation: u64,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty arena with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
            next_generation: 0,
        }
    }

    /// Stores `value` and returns its handle. Vacated slots are reused first.
    pub fn insert(&mut self, value: T) -> SlotId {
        let generation = self.next_generation;
        self.next_generation += 1;
        let slot = Slot {
            generation,
            value: Some(value),
        };
        let index = match self.free_list.pop() {
            Some(index) => {
                debug_assert!(self.slots[index].value.is_none());
                self.slots[index] = slot;
                index
            },
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId { index, generation }
    }

    /// Removes the value at `id`. Returns `None` for a vacant, stale or
    /// unknown id.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.live_slot_mut(id)?.value.take()?;
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.live_slot(id)?.value.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.live_slot_mut(id)?.value.as_mut()
    }

    /// Returns `true` if `id` refers to the value it was issued for.
    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the backing vector can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every value. Previously issued ids stop resolving.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Releases spare capacity. Trailing vacant slots are trimmed first.
    pub fn shrink_to_fit(&mut self) {
        while matches!(self.slots.last(), Some(slot) if slot.value.is_none()) {
            self.slots.pop();
        }
        let live_slots = self.slots.len();
        self.free_list.retain(|&index| index < live_slots);
        self.slots.shrink_to_fit();
        self.free_list.shrink_to_fit();
    }

    /// Approximate heap footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Slot<T>>()
            + self.free_list.capacity() * std::mem::size_of::<usize>()
    }

    /// Iterates occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let id = SlotId {
                index,
                generation: slot.generation,
            };
            slot.value.as_ref().map(|value| (id, value))
        })
    }

    fn live_slot(&self, id: SlotId) -> Option<&Slot<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
    }

    fn live_slot_mut(&mut self, id: SlotId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let occupied = self.slots.iter().filter(|slot| slot.value.is_some()).count();
        assert_eq!(occupied, self.len);
        assert_eq!(self.slots.len() - occupied, self.free_list.len());
        for &index in &self.free_list {
            assert!(self.slots[index].value.is_none(), "free slot {index} is occupied");
        }
        for slot in &self.slots {
            assert!(slot.generation < self.next_generation);
        }
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.remove(id1), None);
        assert_eq!(arena.len(), 1);

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
        arena.debug_validate_invariants();
    }

    #[test]
    fn slot_arena_unknown_id_is_absent() {
        let mut arena: SlotArena<u32> = SlotArena::new();
        let unknown = SlotId {
            index: 7,
            generation: 0,
        };
        assert!(!arena.contains(unknown));
        assert_eq!(arena.get(unknown), None);
        assert_eq!(arena.get_mut(unknown), None);
        assert_eq!(arena.remove(unknown), None);
    }

    #[test]
    fn slot_arena_stale_id_misses_reused_slot() {
        let mut arena = SlotArena::new();
        let stale = arena.insert("a");
        arena.remove(stale);
        let fresh = arena.insert("b");
        assert_eq!(stale.index(), fresh.index());
        assert_ne!(stale, fresh);

        assert!(!arena.contains(stale));
        assert_eq!(arena.get(stale), None);
        assert_eq!(arena.get_mut(stale), None);
        assert_eq!(arena.remove(stale), None);
        assert_eq!(arena.get(fresh), Some(&"b"));
        assert_eq!(arena.len(), 1);
        arena.debug_validate_invariants();
    }

    #[test]
    fn slot_arena_ids_die_across_clear_and_shrink() {
        let mut arena = SlotArena::new();
        let before_clear = arena.insert(1);
        arena.clear();
        let after_clear = arena.insert(2);
        assert_eq!(before_clear.index(), after_clear.index());
        assert_eq!(arena.get(before_clear), None);

        let trimmed = arena.insert(3);
        arena.remove(trimmed);
        arena.shrink_to_fit();
        let appended = arena.insert(4);
        assert_eq!(trimmed.index(), appended.index());
        assert_eq!(arena.get(trimmed), None);
        assert_eq!(arena.get(appended), Some(&4));
    }

    #[test]
    fn slot_arena_shrink_trims_trailing_vacancies() {
        let mut arena = SlotArena::with_capacity(16);
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);
        arena.shrink_to_fit();
        arena.debug_validate_invariants();

        // slot 1 is still free, slot 3 was trimmed
        let reused = arena.insert(10);
        assert_eq!(reused.index(), 1);
        let appended = arena.insert(11);
        assert_eq!(appended.index(), 3);
    }

    #[test]
    fn slot_arena_iter_skips_vacant() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);
        let seen: Vec<_> = arena.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(seen, vec![(a, 'a'), (c, 'c')]);
    }
}
