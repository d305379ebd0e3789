//! Bundled catalog used when no search backend is configured.

use standby_core::{CandidateTrack, VideoId};

const BUNDLED: &[(&str, &str, &str, u32)] = &[
    (
        "ApXoWvfEYVU",
        "Sunflower (Spider\u{2011}Man: Into the Spider\u{2011}Verse)",
        "Post Malone & Swae Lee",
        130,
    ),
    ("fJ9rUzIMcZQ", "Bohemian Rhapsody", "Queen", 355),
    ("kJQP7kiw5Fk", "Despacito", "Luis Fonsi", 282),
];

/// Fixed list of tracks searched by substring.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tracks: Vec<CandidateTrack>,
}

impl StaticCatalog {
    pub fn new(tracks: Vec<CandidateTrack>) -> Self {
        Self { tracks }
    }

    /// The catalog shipped with the widget.
    pub fn bundled() -> Self {
        let tracks = BUNDLED
            .iter()
            .filter_map(|&(id, title, artists, duration)| {
                let mut track = CandidateTrack::new(VideoId::parse(id).ok()?, title, artists);
                track.duration = Some(duration);
                Some(track)
            })
            .collect();
        Self { tracks }
    }

    pub fn tracks(&self) -> &[CandidateTrack] {
        &self.tracks
    }

    /// Case-insensitive substring match over id, title and artists.
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<CandidateTrack> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.tracks
            .iter()
            .filter(|track| track.matches(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}
