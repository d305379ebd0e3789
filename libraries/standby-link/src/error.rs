//! Error types for link parsing

use thiserror::Error;

/// Why a pasted link was rejected
///
/// Surfaced to the user as a rejected input; the queue is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// Input was empty or whitespace only
    #[error("Nothing to parse")]
    Empty,

    /// Input is not an absolute URL
    #[error("Not a URL")]
    NotAUrl,

    /// URL points somewhere other than YouTube
    #[error("Unsupported host")]
    UnsupportedHost,

    /// YouTube URL without a usable video identifier
    #[error("No video id in link")]
    MissingId,
}

/// Result type for link parsing
pub type Result<T> = std::result::Result<T, ParseFailure>;
