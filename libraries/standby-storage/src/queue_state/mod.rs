//! Persisted queue state: `{ "queue": [...], "currentIndex": n }`

use crate::error::Result;
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use standby_core::QueueItem;
use tracing::{debug, warn};

/// Queue contents and selection as stored between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub items: Vec<QueueItem>,
    /// `None` when nothing is selected (stored as -1)
    pub current_index: Option<usize>,
}

#[derive(Serialize)]
struct PersistedQueue<'a> {
    queue: &'a [QueueItem],
    #[serde(rename = "currentIndex")]
    current_index: i64,
}

/// Lenient read shape: one bad entry or a bad index must not cost the whole queue
#[derive(Deserialize)]
struct StoredQueue {
    #[serde(default)]
    queue: Option<serde_json::Value>,
    #[serde(rename = "currentIndex", default)]
    current_index: Option<serde_json::Value>,
}

impl StoredQueue {
    fn entries(&mut self) -> Vec<serde_json::Value> {
        match self.queue.take() {
            Some(serde_json::Value::Array(entries)) => entries,
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!(found = %other, "Persisted queue is not a list, ignoring it");
                Vec::new()
            }
        }
    }

    /// Non-negative integer index, anything else means no selection
    fn selected(&self) -> Option<usize> {
        self.current_index
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|i| usize::try_from(i).ok())
    }
}

/// Load the queue snapshot stored under `key`
///
/// A missing key yields an empty snapshot. Entries that no longer decode
/// (empty or implausible ids) are dropped and the selection is remapped; a
/// selection that pointed at a dropped entry or past the end becomes `None`.
pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<QueueSnapshot> {
    let Some(raw) = store.get(key)? else {
        debug!(key, "No persisted queue");
        return Ok(QueueSnapshot::default());
    };

    let mut stored: StoredQueue = serde_json::from_str(&raw)?;
    let selected = stored.selected();
    let entries = stored.entries();

    let mut items = Vec::with_capacity(entries.len());
    let mut current_index = None;

    for (position, value) in entries.into_iter().enumerate() {
        match serde_json::from_value::<QueueItem>(value) {
            Ok(item) => {
                if selected == Some(position) {
                    current_index = Some(items.len());
                }
                items.push(item);
            }
            Err(e) => warn!(position, error = %e, "Dropping unreadable queue entry"),
        }
    }

    debug!(
        items = items.len(),
        current = ?current_index,
        "Restored persisted queue"
    );

    Ok(QueueSnapshot {
        items,
        current_index,
    })
}

/// Store `snapshot` under `key`, replacing what was there
pub fn save(store: &mut dyn KeyValueStore, key: &str, snapshot: &QueueSnapshot) -> Result<()> {
    let persisted = PersistedQueue {
        queue: &snapshot.items,
        current_index: snapshot.current_index.map_or(-1, |i| i as i64),
    };
    let json = serde_json::to_string(&persisted)?;
    store.set(key, &json)
}
