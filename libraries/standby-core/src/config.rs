/// Widget configuration
use crate::error::{Result, StandbyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for a Standby widget
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WidgetConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_search")]
    pub search: SearchSettings,

    #[serde(default = "default_metadata")]
    pub metadata: MetadataSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Key holding `{ queue, currentIndex }`
    #[serde(default = "default_queue_key")]
    pub queue_key: String,

    /// Key holding the global cover art data URL
    #[serde(default = "default_cover_key")]
    pub cover_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default)]
    pub end_of_queue: EndOfQueue,

    /// Volume applied when a session starts (0-100)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    /// Period of the progress poll
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Base URL of the search backend; `None` disables remote search
    #[serde(default)]
    pub backend_url: Option<String>,

    #[serde(default)]
    pub fallback: SearchFallback,

    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetadataSettings {
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// What `next` does past the last queue entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfQueue {
    /// Stay on the last entry and go idle
    #[default]
    Stop,
    /// Continue from the first entry
    Wrap,
}

/// Search behaviour when no backend is configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFallback {
    /// Return no results
    None,
    /// Substring match over the bundled catalog
    #[default]
    StaticCatalog,
}

impl WidgetConfig {
    /// Load configuration from `standby.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(PathBuf::from("standby.toml"))
    }

    /// Load configuration from a specific file (if present) and environment
    ///
    /// Environment variables use the `STANDBY_` prefix and `__` between
    /// section and key, e.g. `STANDBY_PLAYBACK__END_OF_QUEUE=wrap`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("STANDBY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            end_of_queue = ?config.playback.end_of_queue,
            backend = ?config.search.backend_url,
            "Loaded widget configuration"
        );

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.queue_key.is_empty() || self.storage.cover_key.is_empty() {
            return Err(StandbyError::config("storage keys must not be empty"));
        }

        if self.storage.queue_key == self.storage.cover_key {
            return Err(StandbyError::config(
                "queue and cover art must use different storage keys",
            ));
        }

        if self.playback.initial_volume > 100 {
            return Err(StandbyError::config(format!(
                "initial volume {} is above 100",
                self.playback.initial_volume
            )));
        }

        if self.playback.poll_interval_ms == 0 {
            return Err(StandbyError::config("poll interval must be positive"));
        }

        if let Some(url) = &self.search.backend_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StandbyError::config(format!(
                    "search backend URL must start with http:// or https://, got {url:?}"
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        queue_key: default_queue_key(),
        cover_key: default_cover_key(),
    }
}

fn default_queue_key() -> String {
    "ytlink_queue_global_v1".to_string()
}

fn default_cover_key() -> String {
    "ytlink_global_cover_v1".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        end_of_queue: EndOfQueue::default(),
        initial_volume: default_initial_volume(),
        poll_interval_ms: default_poll_interval_ms(),
    }
}

fn default_initial_volume() -> u8 {
    70
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_search() -> SearchSettings {
    SearchSettings {
        backend_url: None,
        fallback: SearchFallback::default(),
        result_limit: default_result_limit(),
    }
}

fn default_result_limit() -> usize {
    10
}

fn default_metadata() -> MetadataSettings {
    MetadataSettings {
        oembed_endpoint: default_oembed_endpoint(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_oembed_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            playback: default_playback(),
            search: default_search(),
            metadata: default_metadata(),
        }
    }
}
