//! Persistent queue with a current-entry pointer
//!
//! Owns the ordered entries, the selection and the write-through to the
//! host's key-value store. Index arguments that fall outside the queue are
//! silent no-ops; callers learn about them from the returned `bool`/`Option`.

use crate::types::EntryKey;
use standby_core::{QueueItem, VideoId};
use standby_storage::{queue_state, KeyValueStore, MemoryStore, QueueSnapshot};
use tracing::{debug, warn};

/// Result of appending a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Identity of the new entry
    pub key: EntryKey,
    /// Nothing was selected before; the caller should select index 0
    pub selection_needed: bool,
}

/// Result of appending or replacing a batch of entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    pub keys: Vec<EntryKey>,
    pub selection_needed: bool,
}

/// Result of removing an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: QueueItem,
    /// The removed entry was the selected one
    pub removed_current: bool,
    /// Selection after the removal
    pub current_index: Option<usize>,
}

/// Ordered, persisted list of queue entries
pub struct QueueStore {
    items: Vec<QueueItem>,
    /// Parallel to `items`
    keys: Vec<EntryKey>,
    current_index: Option<usize>,
    next_key: u64,
    store: Box<dyn KeyValueStore>,
    storage_key: String,
}

impl QueueStore {
    /// Open the queue persisted under `storage_key`
    ///
    /// Unreadable or missing state yields an empty queue; persistence
    /// problems never prevent the queue from working in memory.
    pub fn open(store: Box<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let snapshot = match queue_state::load(store.as_ref(), &storage_key) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key = %storage_key, error = %e, "Could not restore queue; starting empty");
                QueueSnapshot::default()
            }
        };

        let mut queue = Self {
            items: Vec::new(),
            keys: Vec::new(),
            current_index: None,
            next_key: 0,
            store,
            storage_key,
        };
        queue.restore(snapshot);
        queue
    }

    /// Queue backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()), "queue")
    }

    /// Replace in-memory state with `snapshot` without writing it back
    ///
    /// A selection outside the restored items is dropped.
    pub fn restore(&mut self, snapshot: QueueSnapshot) {
        self.items.clear();
        self.keys.clear();
        for item in snapshot.items {
            self.push(item);
        }
        self.current_index = snapshot
            .current_index
            .filter(|&index| index < self.items.len());

        debug!(
            items = self.items.len(),
            current = ?self.current_index,
            "Queue restored"
        );
    }

    // ===== Queries =====

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QueueItem> {
        self.items.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current(&self) -> Option<&QueueItem> {
        self.current_index.and_then(|i| self.items.get(i))
    }

    pub fn current_key(&self) -> Option<EntryKey> {
        self.current_index.and_then(|i| self.keys.get(i).copied())
    }

    pub fn key_at(&self, index: usize) -> Option<EntryKey> {
        self.keys.get(index).copied()
    }

    /// Where the entry with `key` sits now, if it is still queued
    pub fn position_of(&self, key: EntryKey) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            items: self.items.clone(),
            current_index: self.current_index,
        }
    }

    // ===== Mutations =====

    /// Append an entry to the end of the queue
    ///
    /// The selection itself is left to the caller: when nothing was
    /// selected, `selection_needed` is set and index 0 should be selected.
    pub fn append(&mut self, item: QueueItem) -> AppendOutcome {
        let key = self.push(item);
        self.persist();
        AppendOutcome {
            key,
            selection_needed: self.current_index.is_none(),
        }
    }

    /// Append several entries, persisting once
    pub fn append_many(&mut self, items: impl IntoIterator<Item = QueueItem>) -> BatchOutcome {
        let keys: Vec<EntryKey> = items.into_iter().map(|item| self.push(item)).collect();
        if keys.is_empty() {
            return BatchOutcome::default();
        }

        self.persist();
        BatchOutcome {
            selection_needed: self.current_index.is_none(),
            keys,
        }
    }

    /// Replace the whole queue and clear the selection
    pub fn replace(&mut self, items: impl IntoIterator<Item = QueueItem>) -> BatchOutcome {
        self.items.clear();
        self.keys.clear();
        self.current_index = None;

        let keys: Vec<EntryKey> = items.into_iter().map(|item| self.push(item)).collect();
        self.persist();

        BatchOutcome {
            selection_needed: !keys.is_empty(),
            keys,
        }
    }

    /// Swap the entry at `index` with its neighbour `delta` positions away
    ///
    /// The current pointer follows the entry it pointed at. Returns `false`
    /// (and changes nothing) when either position is outside the queue.
    pub fn move_by(&mut self, index: usize, delta: isize) -> bool {
        let Some(target) = index.checked_add_signed(delta) else {
            return false;
        };
        if index >= self.items.len() || target >= self.items.len() {
            return false;
        }
        if index == target {
            return true;
        }

        self.items.swap(index, target);
        self.keys.swap(index, target);

        self.current_index = self.current_index.map(|current| {
            if current == index {
                target
            } else if current == target {
                index
            } else {
                current
            }
        });

        self.persist();
        true
    }

    /// Remove the entry at `index`
    ///
    /// Removing the selected entry selects whatever slid into its slot, or
    /// the new last entry when it was last, or nothing when the queue is now
    /// empty. Removing an earlier entry shifts the selection down by one.
    pub fn remove_at(&mut self, index: usize) -> Option<RemoveOutcome> {
        if index >= self.items.len() {
            return None;
        }

        let removed = self.items.remove(index);
        self.keys.remove(index);

        let removed_current = self.current_index == Some(index);
        self.current_index = match self.current_index {
            Some(current) if current == index => {
                if self.items.is_empty() {
                    None
                } else {
                    Some(index.min(self.items.len() - 1))
                }
            }
            Some(current) if index < current => Some(current - 1),
            other => other,
        };

        self.persist();

        Some(RemoveOutcome {
            removed,
            removed_current,
            current_index: self.current_index,
        })
    }

    /// Point the selection at `index`
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.current_index = Some(index);
        self.persist();
        true
    }

    /// Remove every entry and clear the selection
    pub fn clear(&mut self) {
        self.items.clear();
        self.keys.clear();
        self.current_index = None;
        self.persist();
    }

    /// Set the display title of the entry at `index`
    pub fn update_title(&mut self, index: usize, title: impl Into<String>) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.title = Some(title.into());
        self.persist();
        true
    }

    /// Apply a late title lookup to the entry it was requested for
    ///
    /// Dropped when that entry has been removed in the meantime, or when the
    /// video id no longer matches, wherever the entry has moved to.
    pub fn resolve_title(&mut self, key: EntryKey, id: &VideoId, title: impl Into<String>) -> bool {
        let Some(index) = self.position_of(key) else {
            debug!(%key, %id, "Dropping title for removed entry");
            return false;
        };
        if &self.items[index].id != id {
            debug!(%key, %id, "Dropping title for mismatched entry");
            return false;
        }
        self.update_title(index, title)
    }

    // ===== Internals =====

    fn allocate_key(&mut self) -> EntryKey {
        let key = EntryKey::new(self.next_key);
        self.next_key += 1;
        key
    }

    fn push(&mut self, item: QueueItem) -> EntryKey {
        let key = self.allocate_key();
        self.items.push(item);
        self.keys.push(key);
        key
    }

    /// Write-through; failures keep the in-memory queue authoritative
    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = queue_state::save(self.store.as_mut(), &self.storage_key, &snapshot) {
            warn!(key = %self.storage_key, error = %e, "Failed to persist queue");
        }
    }
}

impl std::fmt::Debug for QueueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueStore")
            .field("items", &self.items)
            .field("current_index", &self.current_index)
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> QueueItem {
        QueueItem::new(VideoId::parse(id).unwrap(), 0)
    }

    fn ids(queue: &QueueStore) -> Vec<&str> {
        queue.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn append_signals_selection_only_when_nothing_selected() {
        let mut queue = QueueStore::in_memory();

        let first = queue.append(item("aaa"));
        assert!(first.selection_needed);
        assert!(queue.select(0));

        let second = queue.append(item("bbb"));
        assert!(!second.selection_needed);
        assert_ne!(first.key, second.key);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn move_by_swaps_and_current_follows() {
        let mut queue = QueueStore::in_memory();
        queue.append_many([item("aaa"), item("bbb"), item("ccc")]);
        queue.select(1);

        assert!(queue.move_by(1, -1));
        assert_eq!(ids(&queue), ["bbb", "aaa", "ccc"]);
        assert_eq!(queue.current_index(), Some(0));

        // Neighbour of the selected entry moves onto it
        assert!(queue.move_by(1, -1));
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn move_by_out_of_bounds_is_noop() {
        let mut queue = QueueStore::in_memory();
        queue.append_many([item("aaa"), item("bbb")]);

        assert!(!queue.move_by(0, -1));
        assert!(!queue.move_by(1, 1));
        assert!(!queue.move_by(5, -1));
        assert_eq!(ids(&queue), ["aaa", "bbb"]);
    }

    #[test]
    fn remove_before_current_shifts_selection() {
        let mut queue = QueueStore::in_memory();
        queue.append_many([item("aaa"), item("bbb"), item("ccc")]);
        queue.select(2);

        let outcome = queue.remove_at(0).unwrap();
        assert!(!outcome.removed_current);
        assert_eq!(outcome.current_index, Some(1));
        assert_eq!(queue.current().unwrap().id.as_str(), "ccc");
    }

    #[test]
    fn remove_last_current_selects_new_last() {
        let mut queue = QueueStore::in_memory();
        queue.append_many([item("aaa"), item("bbb")]);
        queue.select(1);

        let outcome = queue.remove_at(1).unwrap();
        assert!(outcome.removed_current);
        assert_eq!(outcome.current_index, Some(0));
    }

    #[test]
    fn remove_out_of_bounds_is_none() {
        let mut queue = QueueStore::in_memory();
        queue.append(item("aaa"));
        assert!(queue.remove_at(1).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn resolve_title_follows_moved_entry() {
        let mut queue = QueueStore::in_memory();
        let keys = queue.append_many([item("aaa"), item("bbb")]).keys;
        queue.move_by(0, 1);

        let id = VideoId::parse("aaa").unwrap();
        assert!(queue.resolve_title(keys[0], &id, "Song A"));
        assert_eq!(queue.get(1).unwrap().title.as_deref(), Some("Song A"));
        assert_eq!(queue.get(0).unwrap().title, None);
    }

    #[test]
    fn resolve_title_dropped_after_removal() {
        let mut queue = QueueStore::in_memory();
        let keys = queue.append_many([item("aaa"), item("bbb")]).keys;
        queue.remove_at(0);

        let id = VideoId::parse("aaa").unwrap();
        assert!(!queue.resolve_title(keys[0], &id, "Song A"));
        assert_eq!(queue.get(0).unwrap().title, None);
    }

    #[test]
    fn replace_clears_selection() {
        let mut queue = QueueStore::in_memory();
        queue.append(item("aaa"));
        queue.select(0);

        let outcome = queue.replace([item("bbb"), item("ccc")]);
        assert!(outcome.selection_needed);
        assert_eq!(outcome.keys.len(), 2);
        assert_eq!(queue.current_index(), None);
        assert_eq!(ids(&queue), ["bbb", "ccc"]);
    }

    #[test]
    fn restore_drops_out_of_range_selection() {
        let mut queue = QueueStore::in_memory();
        queue.restore(QueueSnapshot {
            items: vec![item("aaa")],
            current_index: Some(3),
        });
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current_index(), None);
    }
}
