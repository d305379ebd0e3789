/// Core error types for Standby
use thiserror::Error;

/// Result type alias using `StandbyError`
pub type Result<T> = std::result::Result<T, StandbyError>;

/// Core error type for Standby
#[derive(Error, Debug)]
pub enum StandbyError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// A video identifier was empty or contained characters the platform never uses
    #[error("Invalid video id: {0:?}")]
    InvalidVideoId(String),

    /// Metadata lookup failed (network, HTTP status, or missing field)
    #[error("Metadata lookup failed: {0}")]
    Metadata(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl StandbyError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}

impl From<config::ConfigError> for StandbyError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
