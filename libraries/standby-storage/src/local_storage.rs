//! Browser `localStorage` store (wasm builds)

use crate::error::{Result, StorageError};
use crate::store::KeyValueStore;
use web_sys::Storage;

/// `window.localStorage`
///
/// Private browsing and sandboxed iframes can deny access; every call then
/// reports `StorageError::Unavailable`.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Bind to the current window's `localStorage`, if reachable
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage is not available; queue will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::unavailable("localStorage is not available"))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::unavailable(format!("{err:?}"))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(|e| js_error(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(|e| js_error(&e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(|e| js_error(&e))
    }
}
