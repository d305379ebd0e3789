//! Standby Core
//!
//! Platform-agnostic types, capability traits, configuration and error
//! handling shared by every Standby crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `VideoId`, `QueueItem`, `CandidateTrack`
//! - **Capabilities**: `PlayerCapability` (the embeddable video player) and
//!   `MetadataLookup` (best-effort title resolution)
//! - **Configuration**: `WidgetConfig`, loaded from `standby.toml` and
//!   `STANDBY_*` environment variables
//! - **Error Handling**: `StandbyError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use standby_core::{QueueItem, VideoId};
//!
//! let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
//! let item = QueueItem::new(id, 42);
//!
//! assert_eq!(item.start_offset, 42);
//! assert_eq!(item.display_title(), "dQw4w9WgXcQ");
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{
    EndOfQueue, MetadataSettings, PlaybackSettings, SearchFallback, SearchSettings,
    StorageSettings, WidgetConfig,
};
pub use error::{Result, StandbyError};
pub use traits::{MetadataLookup, PlayerCapability, PlayerState};
pub use types::{CandidateTrack, QueueItem, VideoId};
