//! Queue entries and search candidates

use super::VideoId;
use serde::{Deserialize, Serialize};

/// A single entry in the playback queue
///
/// This is exactly what gets persisted: `{ "id", "start", "title" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Platform video identifier
    pub id: VideoId,

    /// Seed offset in whole seconds
    #[serde(rename = "start", alias = "startOffset", default)]
    pub start_offset: u32,

    /// Display title, resolved asynchronously; `None` until then
    #[serde(default)]
    pub title: Option<String>,
}

impl QueueItem {
    /// Create an untitled entry starting at `start_offset` seconds
    pub fn new(id: VideoId, start_offset: u32) -> Self {
        Self {
            id,
            start_offset,
            title: None,
        }
    }

    /// Attach a known title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title to show, falling back to the identifier
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// A track offered by search or a playlist listing, not yet queued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub id: VideoId,

    #[serde(default)]
    pub title: String,

    /// Comma-joined artist names
    #[serde(default)]
    pub artists: String,

    /// Length in seconds, when the source knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl CandidateTrack {
    pub fn new(id: VideoId, title: impl Into<String>, artists: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artists: artists.into(),
            duration: None,
        }
    }

    /// Case-insensitive substring match over id, title and artists
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.as_str().to_lowercase().contains(needle)
            || self.title.to_lowercase().contains(needle)
            || self.artists.to_lowercase().contains(needle)
    }
}

impl From<CandidateTrack> for QueueItem {
    fn from(candidate: CandidateTrack) -> Self {
        let title = (!candidate.title.is_empty()).then_some(candidate.title);
        Self {
            id: candidate.id,
            start_offset: 0,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> VideoId {
        VideoId::parse(s).unwrap()
    }

    #[test]
    fn display_title_falls_back_to_id() {
        let item = QueueItem::new(id("abc123"), 0);
        assert_eq!(item.display_title(), "abc123");

        let item = item.with_title("Song");
        assert_eq!(item.display_title(), "Song");
    }

    #[test]
    fn queue_item_persisted_shape() {
        let item = QueueItem::new(id("abc123"), 90);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "abc123", "start": 90, "title": null })
        );
    }

    #[test]
    fn queue_item_reads_legacy_and_alias_fields() {
        let item: QueueItem = serde_json::from_str(r#"{"id":"abc123"}"#).unwrap();
        assert_eq!(item.start_offset, 0);
        assert!(item.title.is_none());

        let item: QueueItem =
            serde_json::from_str(r#"{"id":"abc123","startOffset":12,"title":"T"}"#).unwrap();
        assert_eq!(item.start_offset, 12);
        assert_eq!(item.title.as_deref(), Some("T"));
    }

    #[test]
    fn candidate_matching_is_case_insensitive() {
        let candidate = CandidateTrack::new(id("fJ9rUzIMcZQ"), "Bohemian Rhapsody", "Queen");
        assert!(candidate.matches("queen"));
        assert!(candidate.matches("rhapsody"));
        assert!(candidate.matches("fj9r"));
        assert!(!candidate.matches("despacito"));
    }

    #[test]
    fn candidate_becomes_titled_queue_item() {
        let item: QueueItem = CandidateTrack::new(id("kJQP7kiw5Fk"), "Despacito", "Luis Fonsi").into();
        assert_eq!(item.title.as_deref(), Some("Despacito"));
        assert_eq!(item.start_offset, 0);

        let untitled: QueueItem = CandidateTrack::new(id("kJQP7kiw5Fk"), "", "").into();
        assert!(untitled.title.is_none());
    }
}
