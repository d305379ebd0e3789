//! Error types for playback management

use standby_link::ParseFailure;
use thiserror::Error;

/// Playback errors
///
/// Index misuse is never an error here: out-of-range queue operations are
/// silent no-ops that report `false`/`None`.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently selected
    #[error("No track selected")]
    NoTrackSelected,

    /// Pasted text is not a usable link; the queue was not touched
    #[error("Invalid link: {0}")]
    InvalidLink(#[from] ParseFailure),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
