//! Property tests for the quantified invariants over arbitrary legal
//! call sequences: alignment divisibility, monotonic offset, rejected
//! allocations leaving state untouched, and sequence count bounds.

use arena_mem::{AllocKind, Arena, ArenaSequence};
use proptest::prelude::*;

fn fresh_arena(id: u64, capacity: usize) -> Arena {
    Arena::new(id, capacity, AllocKind::Transient, 64).unwrap()
}

proptest! {
    #[test]
    fn every_allocation_is_aligned_and_offset_is_monotonic(
        sizes in prop::collection::vec(1usize..256, 0..64),
        alignments in prop::collection::vec(prop::sample::select(vec![1usize, 2, 4, 8, 16, 32, 64]), 0..64),
    ) {
        let arena = fresh_arena(1, 1 << 20);
        let mut prev_offset = arena.offset();
        for (size, align) in sizes.iter().zip(alignments.iter()) {
            if let Some(ptr) = arena.allocate(*size, *align, "prop") {
                prop_assert_eq!((ptr.as_ptr() as usize) % align, 0);
                prop_assert!(arena.offset() >= prev_offset);
                prev_offset = arena.offset();
            } else {
                // A rejected allocation must leave offset untouched.
                prop_assert_eq!(arena.offset(), prev_offset);
            }
        }
    }

    #[test]
    fn out_of_capacity_allocations_never_mutate_state(
        size in 1usize..4096,
        align in prop::sample::select(vec![1usize, 2, 4, 8, 16, 32, 64]),
    ) {
        let arena = fresh_arena(2, 16);
        let offset_before = arena.offset();
        let waste_before = arena.waste();
        if arena.allocate(size, align, "prop").is_none() {
            prop_assert_eq!(arena.offset(), offset_before);
            prop_assert_eq!(arena.waste(), waste_before);
        }
    }

    #[test]
    fn sequence_count_stays_within_capacity(
        ops in prop::collection::vec(0i32..3, 0..128),
        capacity in 1usize..32,
    ) {
        let arena = fresh_arena(3, 1 << 16);
        let mut seq: ArenaSequence<i32> = ArenaSequence::new(&arena, capacity, "prop").unwrap();
        for op in ops {
            match op {
                0 => { let _ = seq.add(1); }
                1 => { let _ = seq.remove_at(None); }
                _ => { let _ = seq.insert_at(0, 2); }
            }
            prop_assert!(seq.count() <= seq.capacity());
        }
    }

    #[test]
    fn sequence_insert_remove_is_identity_on_prefix(
        values in prop::collection::vec(any::<i32>(), 1..16),
        extra in any::<i32>(),
    ) {
        let arena = fresh_arena(4, 1 << 16);
        let mut seq: ArenaSequence<i32> = ArenaSequence::new(&arena, values.len() + 1, "prop").unwrap();
        seq.add_many(&values).unwrap();
        let before = seq.to_owned_array();

        let i = values.len() / 2;
        seq.insert_at(i, extra).unwrap();
        seq.remove_at(Some(i)).unwrap();

        prop_assert_eq!(seq.to_owned_array(), before);
    }
}
