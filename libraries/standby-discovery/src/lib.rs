//! Search, title and thumbnail lookups for the Standby player.
//!
//! Everything here is optional and best effort:
//!
//! - **Search**: an HTTP backend (`/api/search`, `/api/playlist/<id>`), with a
//!   bundled catalog or no results when none is configured
//! - **Titles**: the public oEmbed endpoint
//! - **Thumbnails**: `i.ytimg.com` candidates, best resolution first
//!
//! Lookups report failures as `DiscoveryError`; only a failing search
//! backend is meant to reach the user.
//!
//! # Example
//!
//! ```ignore
//! use standby_core::WidgetConfig;
//! use standby_discovery::SearchService;
//! use std::time::Duration;
//!
//! let config = WidgetConfig::load()?;
//! let search = SearchService::from_settings(&config.search, Duration::from_secs(10))?;
//!
//! for track in search.search("queen").await? {
//!     println!("{} - {}", track.artists, track.title);
//! }
//! ```

mod backend;
mod catalog;
mod error;
mod oembed;
mod search;
mod thumbnail;

pub use backend::{HttpSearchBackend, SearchBackend};
pub use catalog::StaticCatalog;
pub use error::{DiscoveryError, Result};
pub use oembed::{lookup_title_or_none, lookup_titles_in_turn, OEmbedLookup};
pub use search::SearchService;
pub use thumbnail::{resolve_thumbnail, thumbnail_candidates, HttpThumbnailProbe, ThumbnailProbe};
