/// Capability traits consumed by the Standby core
use crate::error::Result;
use crate::types::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// State reported by the embeddable player
///
/// Buffering and cued notifications are folded into `Unstarted`; the
/// controller only reacts to the four states below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Nothing started yet (also: buffering, cued)
    Unstarted,
    Playing,
    Paused,
    /// Current video reached its end
    Ended,
}

/// Embeddable video player capability
///
/// Implemented by the host: an iframe player in the browser, a fake in
/// tests. The core never implements playback itself.
pub trait PlayerCapability {
    /// Load a video and start playing at `start_offset` seconds
    fn load_and_play(&mut self, id: &VideoId, start_offset: u32);

    /// Load a video without starting playback
    fn cue_only(&mut self, id: &VideoId, start_offset: u32);

    fn play(&mut self);

    fn pause(&mut self);

    fn stop(&mut self);

    /// Seek to an absolute position in seconds
    fn seek_to(&mut self, seconds: f64);

    /// Set output volume (0-100)
    fn set_volume(&mut self, level: u8);

    /// Elapsed seconds in the current video
    fn current_time(&self) -> f64;

    /// Total seconds of the current video, 0 when unknown
    fn duration(&self) -> f64;

    fn state(&self) -> PlayerState;
}

/// Best-effort title lookup
///
/// Failures must never affect playback; callers log and drop them.
#[async_trait(?Send)]
pub trait MetadataLookup {
    /// Resolve a display title for a video
    async fn lookup_title(&self, id: &VideoId) -> Result<String>;
}
