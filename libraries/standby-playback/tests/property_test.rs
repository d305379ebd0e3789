//! Property-based tests for the queue store
//!
//! Uses proptest to verify invariants across many random operation
//! sequences.

use proptest::prelude::*;
use standby_core::{QueueItem, VideoId};
use standby_playback::QueueStore;
use standby_storage::MemoryStore;

const KEY: &str = "queue";

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Append(String),
    MoveBy(usize, isize),
    RemoveAt(usize),
    Select(usize),
    Clear,
}

fn arbitrary_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,11}"
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arbitrary_id().prop_map(Op::Append),
        3 => (0usize..12, -2isize..=2).prop_map(|(i, d)| Op::MoveBy(i, d)),
        2 => (0usize..12).prop_map(Op::RemoveAt),
        2 => (0usize..12).prop_map(Op::Select),
        1 => Just(Op::Clear),
    ]
}

fn apply(queue: &mut QueueStore, op: &Op) {
    match op {
        Op::Append(id) => {
            let outcome = queue.append(QueueItem::new(VideoId::parse(id.as_str()).unwrap(), 0));
            if outcome.selection_needed {
                queue.select(0);
            }
        }
        Op::MoveBy(index, delta) => {
            queue.move_by(*index, *delta);
        }
        Op::RemoveAt(index) => {
            queue.remove_at(*index);
        }
        Op::Select(index) => {
            queue.select(*index);
        }
        Op::Clear => queue.clear(),
    }
}

fn filled(ids: &[String]) -> QueueStore {
    let mut queue = QueueStore::in_memory();
    queue.append_many(
        ids.iter()
            .map(|id| QueueItem::new(VideoId::parse(id.as_str()).unwrap(), 0)),
    );
    queue
}

// ===== Property Tests =====

proptest! {
    /// Property: the current index always points inside the queue, and is
    /// only absent for an empty queue or before anything was selected
    #[test]
    fn current_index_always_valid(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let mut queue = QueueStore::in_memory();

        for op in &ops {
            apply(&mut queue, op);

            match queue.current_index() {
                Some(index) => prop_assert!(index < queue.len(), "{op:?} left index {index} past {}", queue.len()),
                None => prop_assert!(queue.is_empty(), "{op:?} left a non-empty queue unselected"),
            }
        }
    }

    /// Property: moveBy(i, +1) then moveBy(i + 1, -1) restores order and selection
    #[test]
    fn move_by_is_self_inverse(
        ids in prop::collection::vec(arbitrary_id(), 2..20),
        index_seed in any::<usize>(),
        current_seed in any::<usize>(),
    ) {
        let mut queue = filled(&ids);
        let index = index_seed % (ids.len() - 1);
        queue.select(current_seed % ids.len());
        let before = queue.snapshot();

        prop_assert!(queue.move_by(index, 1));
        prop_assert!(queue.move_by(index + 1, -1));
        prop_assert_eq!(queue.snapshot(), before);
    }

    /// Property: the selected entry is the same entry after any move
    #[test]
    fn current_follows_its_entry(
        ids in prop::collection::vec(arbitrary_id(), 1..20),
        moves in prop::collection::vec((0usize..20, -3isize..=3), 0..30),
    ) {
        let mut queue = filled(&ids);
        queue.select(0);
        let selected = queue.current_key();

        for (index, delta) in moves {
            queue.move_by(index, delta);
            prop_assert_eq!(queue.current_key(), selected);
        }
    }

    /// Property: persisting then restoring yields identical items and selection
    #[test]
    fn persistence_round_trip(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let store = MemoryStore::new();
        let mut queue = QueueStore::open(Box::new(store.clone()), KEY);
        for op in &ops {
            apply(&mut queue, op);
        }

        let restored = QueueStore::open(Box::new(store), KEY);
        prop_assert_eq!(restored.snapshot(), queue.snapshot());
    }

    /// Property: out-of-range removals never change the queue
    #[test]
    fn out_of_range_remove_is_noop(
        ids in prop::collection::vec(arbitrary_id(), 0..10),
        extra in 0usize..5,
    ) {
        let mut queue = filled(&ids);
        let before = queue.snapshot();

        prop_assert!(queue.remove_at(ids.len() + extra).is_none());
        prop_assert_eq!(queue.snapshot(), before);
    }
}
