/// Identifier types for Standby entities
use crate::error::{Result, StandbyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Video identifier as issued by the video platform
///
/// Opaque to Standby. The only checks are non-emptiness and a plausible
/// charset (`[A-Za-z0-9_-]`); the platform decides whether it exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap an identifier
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if Self::is_plausible(&id) {
            Ok(Self(id))
        } else {
            Err(StandbyError::InvalidVideoId(id))
        }
    }

    /// Whether `id` is non-empty and uses only URL-safe identifier characters
    pub fn is_plausible(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = StandbyError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
