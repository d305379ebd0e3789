//! Global cover art: one image data URL shown for every track

use crate::error::{Result, StorageError};
use crate::store::KeyValueStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

const DATA_URL_PREFIX: &str = "data:image/";

/// Read the stored cover art data URL
pub fn get(store: &dyn KeyValueStore, key: &str) -> Result<Option<String>> {
    store.get(key)
}

/// Store a cover art data URL
///
/// Only `data:image/...` URLs are accepted.
pub fn set(store: &mut dyn KeyValueStore, key: &str, data_url: &str) -> Result<()> {
    if !data_url.starts_with(DATA_URL_PREFIX) || !data_url.contains(',') {
        return Err(StorageError::InvalidCover(
            "expected a data:image/... URL".to_string(),
        ));
    }
    debug!(key, bytes = data_url.len(), "Storing cover art");
    store.set(key, data_url)
}

/// Store raw image bytes, encoding them as a base64 data URL
///
/// Returns the data URL that was stored.
pub fn set_image(
    store: &mut dyn KeyValueStore,
    key: &str,
    mime_type: &str,
    bytes: &[u8],
) -> Result<String> {
    let data_url = to_data_url(mime_type, bytes)?;
    set(store, key, &data_url)?;
    Ok(data_url)
}

/// Remove the cover art
pub fn clear(store: &mut dyn KeyValueStore, key: &str) -> Result<()> {
    store.remove(key)
}

/// Encode image bytes as a `data:` URL
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> Result<String> {
    if !mime_type.starts_with("image/") {
        return Err(StorageError::InvalidCover(format!(
            "{mime_type} is not an image type"
        )));
    }
    if bytes.is_empty() {
        return Err(StorageError::InvalidCover("image is empty".to_string()));
    }
    Ok(format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const KEY: &str = "ytlink_global_cover_v1";

    #[test]
    fn image_bytes_become_data_url() {
        let mut store = MemoryStore::new();
        let url = set_image(&mut store, KEY, "image/png", &[0x89, b'P', b'N', b'G']).unwrap();

        assert_eq!(url, "data:image/png;base64,iVBORw==");
        assert_eq!(get(&store, KEY).unwrap().as_deref(), Some(url.as_str()));
    }

    #[test]
    fn rejects_non_image_values() {
        let mut store = MemoryStore::new();
        assert!(set(&mut store, KEY, "https://example.com/cover.png").is_err());
        assert!(set_image(&mut store, KEY, "text/plain", b"hi").is_err());
        assert!(set_image(&mut store, KEY, "image/png", &[]).is_err());
        assert_eq!(get(&store, KEY).unwrap(), None);
    }

    #[test]
    fn clear_removes_cover() {
        let mut store = MemoryStore::new();
        set(&mut store, KEY, "data:image/gif;base64,R0lGOD").unwrap();
        clear(&mut store, KEY).unwrap();
        assert_eq!(get(&store, KEY).unwrap(), None);
    }
}
