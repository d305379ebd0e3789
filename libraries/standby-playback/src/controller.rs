//! Playback controller - main coordination logic
//!
//! Owns the queue and drives the embedded player through a four-state
//! machine. Every user action and every player report goes through here, on
//! one thread, so queue mutations and the progress poll never overlap.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    progress::{ProgressSnapshot, ProgressTracker},
    queue::QueueStore,
    types::{EntryKey, PlaybackState},
    volume::Volume,
};
use standby_core::{
    EndOfQueue, PlaybackSettings, PlayerCapability, PlayerState, QueueItem, VideoId,
    WidgetConfig,
};
use standby_storage::KeyValueStore;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Queue-driven controller for an embedded video player
pub struct PlaybackController {
    queue: QueueStore,
    player: Box<dyn PlayerCapability>,
    state: PlaybackState,
    end_of_queue: EndOfQueue,
    volume: Volume,
    progress: ProgressTracker,
    poll_interval: Duration,

    // Artwork resolved for the entry with this key
    artwork: Option<(EntryKey, String)>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller over an already opened queue
    pub fn new(
        queue: QueueStore,
        player: Box<dyn PlayerCapability>,
        settings: &PlaybackSettings,
    ) -> Self {
        Self {
            queue,
            player,
            state: PlaybackState::Idle,
            end_of_queue: settings.end_of_queue,
            volume: Volume::new(settings.initial_volume),
            progress: ProgressTracker::default(),
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
            artwork: None,
            pending_events: Vec::new(),
        }
    }

    /// Open the persisted queue from `store` and build a controller
    pub fn from_config(
        config: &WidgetConfig,
        store: Box<dyn KeyValueStore>,
        player: Box<dyn PlayerCapability>,
    ) -> Self {
        let queue = QueueStore::open(store, config.storage.queue_key.clone());
        Self::new(queue, player, &config.playback)
    }

    /// Resume the previous session
    ///
    /// Applies the volume and cues the persisted current entry without
    /// starting playback.
    pub fn restore_session(&mut self) {
        self.player.set_volume(self.volume.effective());

        if let Some(index) = self.queue.current_index() {
            self.load_index(index, false);
        }

        info!(
            items = self.queue.len(),
            current = ?self.queue.current_index(),
            "Session restored"
        );
        self.emit_queue_changed();
        self.emit_volume_changed();
    }

    // ===== Queue Operations =====

    /// Parse pasted text and queue the link it contains
    ///
    /// A rejected link leaves the queue untouched and queues an `Error`
    /// event for the UI.
    pub fn submit_link(&mut self, raw: &str) -> Result<EntryKey> {
        match standby_link::parse(raw) {
            Ok(seed) => Ok(self.enqueue(seed.into_item())),
            Err(failure) => {
                warn!(%failure, "Rejected pasted link");
                self.pending_events.push(PlaybackEvent::Error {
                    message: failure.to_string(),
                });
                Err(PlaybackError::InvalidLink(failure))
            }
        }
    }

    /// Append an entry; starts playback when nothing was selected
    pub fn enqueue(&mut self, item: QueueItem) -> EntryKey {
        let outcome = self.queue.append(item);
        debug!(key = %outcome.key, length = self.queue.len(), "Queued entry");
        self.emit_queue_changed();

        if outcome.selection_needed {
            self.load_index(0, true);
        }
        outcome.key
    }

    /// Append several entries; starts playback when nothing was selected
    pub fn enqueue_many(&mut self, items: Vec<QueueItem>) -> Vec<EntryKey> {
        let outcome = self.queue.append_many(items);
        if outcome.keys.is_empty() {
            return outcome.keys;
        }
        self.emit_queue_changed();

        if outcome.selection_needed {
            self.load_index(0, true);
        }
        outcome.keys
    }

    /// Replace the queue with `items` and play the first one
    pub fn play_now(&mut self, items: Vec<QueueItem>) -> Vec<EntryKey> {
        let outcome = self.queue.replace(items);
        self.emit_queue_changed();

        if outcome.selection_needed {
            self.load_index(0, true);
        } else {
            self.stop_playback();
        }
        outcome.keys
    }

    /// Jump to the entry at `index`
    pub fn select(&mut self, index: usize) -> bool {
        self.load_index(index, true)
    }

    /// Move the entry at `index` by `delta` positions
    pub fn move_by(&mut self, index: usize, delta: isize) -> bool {
        let moved = self.queue.move_by(index, delta);
        if moved {
            self.emit_queue_changed();
        }
        moved
    }

    /// Remove the entry at `index`
    ///
    /// Removing the current entry loads whatever the queue selects in its
    /// place, or stops when the queue is now empty.
    pub fn remove_at(&mut self, index: usize) -> Option<QueueItem> {
        let outcome = self.queue.remove_at(index)?;
        debug!(index, removed_current = outcome.removed_current, "Removed entry");
        self.emit_queue_changed();

        if outcome.removed_current {
            match outcome.current_index {
                Some(current) => {
                    self.load_index(current, true);
                }
                None => self.stop_playback(),
            }
        }

        Some(outcome.removed)
    }

    /// Remove every entry and stop the player
    pub fn clear(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
        self.stop_playback();
    }

    // ===== Navigation =====

    /// Skip to the following entry
    ///
    /// At the last entry this is a no-op under `EndOfQueue::Stop` and wraps
    /// to the first entry under `EndOfQueue::Wrap`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        match self.next_index() {
            Some(index) => self.load_index(index, true),
            None => false,
        }
    }

    /// Go back to the preceding entry
    pub fn previous(&mut self) -> bool {
        match self.previous_index() {
            Some(index) => self.load_index(index, true),
            None => false,
        }
    }

    fn next_index(&self) -> Option<usize> {
        let len = self.queue.len();
        match self.queue.current_index() {
            None => (len > 0).then_some(0),
            Some(current) if current + 1 < len => Some(current + 1),
            Some(_) => (self.end_of_queue == EndOfQueue::Wrap && len > 0).then_some(0),
        }
    }

    fn previous_index(&self) -> Option<usize> {
        let len = self.queue.len();
        match self.queue.current_index()? {
            0 => (self.end_of_queue == EndOfQueue::Wrap && len > 0).then(|| len - 1),
            current => Some(current - 1),
        }
    }

    // ===== Player Reports =====

    /// Feed a state change reported by the embedded player
    pub fn handle_player_state(&mut self, reported: PlayerState) {
        debug!(?reported, state = self.state.as_str(), "Player reported state");

        match reported {
            PlayerState::Unstarted => {}
            PlayerState::Playing => {
                if self.queue.current().is_some() {
                    self.progress.sample(self.player.as_ref());
                    self.set_state(PlaybackState::Playing);
                }
            }
            PlayerState::Paused => {
                if matches!(self.state, PlaybackState::Playing | PlaybackState::Loading) {
                    self.progress.sample(self.player.as_ref());
                    self.set_state(PlaybackState::Paused);
                }
            }
            PlayerState::Ended => {
                // Idle covers a cued restore and an already finished queue
                if self.state != PlaybackState::Idle && self.queue.current().is_some() {
                    self.handle_track_finished();
                } else {
                    debug!(state = self.state.as_str(), "Ignoring ended report");
                }
            }
        }
    }

    fn handle_track_finished(&mut self) {
        match self.next_index() {
            Some(index) => {
                self.load_index(index, true);
            }
            None => {
                info!("Reached end of queue");
                self.set_state(PlaybackState::Idle);
            }
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback of the current entry
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Playing => {}
            PlaybackState::Paused => {
                self.player.play();
                self.set_state(PlaybackState::Playing);
            }
            PlaybackState::Loading => self.player.play(),
            PlaybackState::Idle => {
                if self.queue.current().is_some() {
                    // Cued or finished entry; the player reports when it starts
                    self.player.play();
                } else if !self.queue.is_empty() {
                    self.load_index(0, true);
                }
            }
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Loading) {
            self.player.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seek within the current entry
    ///
    /// # Arguments
    /// * `percent` - Position as percentage of duration (0-100, clamped)
    ///
    /// Ignored while the duration is still unknown.
    pub fn seek_to_percent(&mut self, percent: f64) -> Result<()> {
        if self.queue.current().is_none() {
            return Err(PlaybackError::NoTrackSelected);
        }

        let total = self.progress.sample(self.player.as_ref()).total;
        if total <= 0.0 {
            debug!("Duration unknown; ignoring seek");
            return Ok(());
        }

        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.player.seek_to(total * percent / 100.0);
        Ok(())
    }

    // ===== Volume Control =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    fn apply_volume(&mut self) {
        self.player.set_volume(self.volume.effective());
        self.emit_volume_changed();
    }

    // ===== Progress =====

    /// Sample elapsed and total time for the seek bar
    ///
    /// Hosts call this every [`poll_interval`](Self::poll_interval). It
    /// never mutates the queue.
    pub fn poll_progress(&mut self) -> ProgressSnapshot {
        if self.queue.current().is_none() {
            return ProgressSnapshot::default();
        }
        self.progress.sample(self.player.as_ref())
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    // ===== Late Metadata =====

    /// Entries still waiting for a display title
    pub fn untitled_entries(&self) -> Vec<(EntryKey, VideoId)> {
        self.queue
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.title.is_none())
            .filter_map(|(index, item)| Some((self.queue.key_at(index)?, item.id.clone())))
            .collect()
    }

    /// Apply a title lookup that finished after the fact
    pub fn resolve_title(&mut self, key: EntryKey, id: &VideoId, title: &str) -> bool {
        let applied = self.queue.resolve_title(key, id, title);
        if applied {
            self.emit_queue_changed();
        }
        applied
    }

    /// Apply resolved artwork if `key` is still the current entry
    pub fn apply_artwork(&mut self, key: EntryKey, url: impl Into<String>) -> bool {
        if self.queue.current_key() != Some(key) {
            debug!(%key, "Dropping artwork for entry that is no longer current");
            return false;
        }

        let url = url.into();
        self.pending_events.push(PlaybackEvent::ArtworkChanged {
            url: Some(url.clone()),
        });
        self.artwork = Some((key, url));
        true
    }

    pub fn artwork(&self) -> Option<&str> {
        self.artwork.as_ref().map(|(_, url)| url.as_str())
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn queue(&self) -> &QueueStore {
        &self.queue
    }

    pub fn current_item(&self) -> Option<&QueueItem> {
        self.queue.current()
    }

    pub fn current_key(&self) -> Option<EntryKey> {
        self.queue.current_key()
    }

    pub fn end_of_queue(&self) -> EndOfQueue {
        self.end_of_queue
    }

    pub fn set_end_of_queue(&mut self, mode: EndOfQueue) {
        self.end_of_queue = mode;
    }

    // ===== Events =====

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Select `index` and hand its entry to the player
    ///
    /// `autoplay` loads and starts the entry; otherwise it is only cued and
    /// the controller stays idle until the player reports playback.
    fn load_index(&mut self, index: usize, autoplay: bool) -> bool {
        if !self.queue.select(index) {
            return false;
        }
        let Some(item) = self.queue.current().cloned() else {
            return false;
        };

        info!(index, id = %item.id, start = item.start_offset, autoplay, "Loading entry");

        self.progress.reset();
        self.clear_artwork();

        if autoplay {
            self.player.load_and_play(&item.id, item.start_offset);
            self.set_state(PlaybackState::Loading);
        } else {
            self.player.cue_only(&item.id, item.start_offset);
            self.set_state(PlaybackState::Idle);
        }

        self.pending_events.push(PlaybackEvent::TrackChanged {
            index: Some(index),
            video_id: Some(item.id.to_string()),
        });
        true
    }

    fn stop_playback(&mut self) {
        self.player.stop();
        self.progress.reset();
        self.clear_artwork();
        self.set_state(PlaybackState::Idle);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            index: None,
            video_id: None,
        });
    }

    fn clear_artwork(&mut self) {
        if self.artwork.take().is_some() {
            self.pending_events
                .push(PlaybackEvent::ArtworkChanged { url: None });
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = self.state.as_str(), to = state.as_str(), "State transition");
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.current_index(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("queue", &self.queue)
            .field("end_of_queue", &self.end_of_queue)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}
