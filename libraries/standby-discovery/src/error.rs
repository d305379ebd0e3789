//! Error types for discovery lookups.

use standby_core::StandbyError;
use thiserror::Error;

/// Errors from search, title and thumbnail lookups.
///
/// Only `SearchBackendUnavailable` is meant for the user; everything else is
/// logged and dropped by the widget.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Search backend is unreachable or answered with an error
    #[error("Search is unavailable: {0}")]
    SearchBackendUnavailable(String),

    /// Title lookup failed
    #[error("Metadata lookup failed: {0}")]
    MetadataLookupFailed(String),

    /// None of the thumbnail candidates exist
    #[error("No thumbnail available for {0}")]
    ThumbnailUnavailable(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid base or endpoint URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<DiscoveryError> for StandbyError {
    fn from(err: DiscoveryError) -> Self {
        StandbyError::metadata(err.to_string())
    }
}

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
