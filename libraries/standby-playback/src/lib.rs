//! Standby - Playback Management
//!
//! Platform-agnostic queue and playback control for the Standby widget.
//!
//! This crate provides:
//! - A persistent queue with a current-entry pointer
//! - A four-state controller (idle, loading, playing, paused) over an
//!   embeddable player
//! - Configurable end-of-queue behaviour (stop or wrap)
//! - Volume and mute, seek by percentage, progress sampling
//! - Identity-checked application of late titles and artwork
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `standby-playback` never talks to a player, a DOM or the network itself:
//! - The player is a `PlayerCapability` supplied by the host
//! - Persistence is a `KeyValueStore` supplied by the host
//! - Title and artwork lookups run elsewhere and report back by `EntryKey`
//!
//! The optional `wasm` feature adds a browser widget that binds all of the
//! above to a `YT.Player`, `localStorage` and the discovery clients.
//!
//! # Example
//!
//! ```rust
//! use standby_core::{PlaybackSettings, PlayerCapability, PlayerState, VideoId};
//! use standby_playback::{PlaybackController, PlaybackState, QueueStore};
//!
//! #[derive(Default)]
//! struct SilentPlayer;
//!
//! impl PlayerCapability for SilentPlayer {
//!     fn load_and_play(&mut self, _id: &VideoId, _start: u32) {}
//!     fn cue_only(&mut self, _id: &VideoId, _start: u32) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek_to(&mut self, _seconds: f64) {}
//!     fn set_volume(&mut self, _level: u8) {}
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn duration(&self) -> f64 { 0.0 }
//!     fn state(&self) -> PlayerState { PlayerState::Unstarted }
//! }
//!
//! let settings = PlaybackSettings {
//!     end_of_queue: Default::default(),
//!     initial_volume: 70,
//!     poll_interval_ms: 250,
//! };
//! let mut controller = PlaybackController::new(
//!     QueueStore::in_memory(),
//!     Box::new(SilentPlayer),
//!     &settings,
//! );
//!
//! // First link starts playing immediately
//! controller.submit_link("https://youtu.be/abc123?t=90").unwrap();
//! assert_eq!(controller.state(), PlaybackState::Loading);
//!
//! controller.handle_player_state(PlayerState::Playing);
//! assert_eq!(controller.state(), PlaybackState::Playing);
//! ```

mod controller;
mod error;
pub mod events;
mod progress;
mod queue;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use progress::{format_clock, ProgressSnapshot};
pub use queue::{AppendOutcome, BatchOutcome, QueueStore, RemoveOutcome};
pub use types::{EntryKey, PlaybackState};
pub use volume::Volume;
