//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it changes state; hosts drain them after every call and
//! re-render what changed.

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Controller state changed
    StateChanged { state: PlaybackState },

    /// A different entry became current (or none did)
    TrackChanged {
        index: Option<usize>,
        video_id: Option<String>,
    },

    /// Entries were added, removed, reordered or retitled
    QueueChanged {
        length: usize,
        current_index: Option<usize>,
    },

    /// Artwork for the current entry resolved, or was cleared
    ArtworkChanged { url: Option<String> },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// A user action was rejected
    Error { message: String },
}
