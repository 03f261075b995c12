#![no_main]

use containerkit::ds::{IntrusiveList, SlotId};
use libfuzzer_sys::fuzz_target;
use std::collections::VecDeque;

// Fuzz arbitrary operation sequences on IntrusiveList against a VecDeque of
// (id, value) pairs. Ids are only ever picked from live entries, since slots
// are reused after removal.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u8> = IntrusiveList::new();
    let mut model: VecDeque<(SlotId, u8)> = VecDeque::new();

    for chunk in data.chunks_exact(2) {
        let (op, value) = (chunk[0] % 8, chunk[1]);
        let pick = |model: &VecDeque<(SlotId, u8)>| {
            (!model.is_empty()).then(|| (value as usize) % model.len())
        };

        match op {
            0 => {
                let id = list.push_front(value);
                model.push_front((id, value));
            }
            1 => {
                let id = list.push_back(value);
                model.push_back((id, value));
            }
            2 => {
                assert_eq!(list.pop_front(), model.pop_front().map(|(_, v)| v));
            }
            3 => {
                assert_eq!(list.pop_back(), model.pop_back().map(|(_, v)| v));
            }
            4 => {
                if let Some(pos) = pick(&model) {
                    let entry = model.remove(pos).unwrap();
                    assert!(list.move_to_front(entry.0));
                    model.push_front(entry);
                    assert_eq!(list.front_id(), Some(entry.0));
                }
            }
            5 => {
                if let Some(pos) = pick(&model) {
                    let entry = model.remove(pos).unwrap();
                    assert!(list.move_to_back(entry.0));
                    model.push_back(entry);
                    assert_eq!(list.back_id(), Some(entry.0));
                }
            }
            6 => {
                if let Some(pos) = pick(&model) {
                    let (id, expected) = model.remove(pos).unwrap();
                    assert_eq!(list.remove(id), Some(expected));
                    assert!(!list.contains(id));
                }
            }
            7 => {
                if value % 16 == 0 {
                    list.clear();
                    model.clear();
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.front(), model.front().map(|(_, v)| v));
        assert_eq!(list.back(), model.back().map(|(_, v)| v));
    }

    let values: Vec<u8> = list.iter().copied().collect();
    let expected: Vec<u8> = model.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, expected);
    #[cfg(debug_assertions)]
    list.debug_validate_invariants();
});
