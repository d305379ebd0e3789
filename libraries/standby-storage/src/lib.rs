//! Standby Storage
//!
//! Flat key-value persistence for the widget: the queue snapshot and the
//! global cover art. Browser builds persist to `localStorage`; native hosts
//! and tests use the in-memory or JSON-file stores.
//!
//! # Architecture
//!
//! - **Capability**: `KeyValueStore` is all the core needs from a host
//! - **Vertical Slicing**: each record (`queue_state`, `cover_art`) owns its
//!   encoding and its key handling
//! - **Best Effort**: callers treat every `StorageError` as "keep going with
//!   in-memory state"
//!
//! # Example
//!
//! ```rust
//! use standby_storage::{queue_state, MemoryStore, QueueSnapshot};
//!
//! let mut store = MemoryStore::new();
//! queue_state::save(&mut store, "queue", &QueueSnapshot::default()).unwrap();
//!
//! let restored = queue_state::load(&store, "queue").unwrap();
//! assert!(restored.items.is_empty());
//! assert_eq!(restored.current_index, None);
//! ```

mod error;
mod store;

#[cfg(feature = "wasm")]
mod local_storage;

// Vertical slices
pub mod cover_art;
pub mod queue_state;

pub use error::{Result, StorageError};
pub use queue_state::QueueSnapshot;
pub use store::{FileStore, KeyValueStore, MemoryStore};

#[cfg(feature = "wasm")]
pub use local_storage::LocalStorageStore;
