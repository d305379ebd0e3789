//! Browser widget: controller + `YT.Player` + `localStorage` + lookups

use super::player::{player_state_from_code, JsPlayer, YtPlayer};
use crate::{EntryKey, PlaybackController, PlaybackEvent, ProgressSnapshot, Volume};
use js_sys::{Function, Promise};
use serde::Serialize;
use standby_core::{CandidateTrack, QueueItem, VideoId, WidgetConfig};
use standby_discovery::{
    lookup_titles_in_turn, resolve_thumbnail, HttpThumbnailProbe, OEmbedLookup, SearchService,
};
use standby_storage::{cover_art, LocalStorageStore};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// State shared with background lookups
struct Shared {
    controller: RefCell<PlaybackController>,
    on_event: RefCell<Option<Function>>,
    artwork_requested: Cell<Option<EntryKey>>,
}

impl Shared {
    /// Hand queued controller events to the page
    fn flush(&self) {
        let events = self.controller.borrow_mut().drain_events();
        if events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::TrackChanged { .. }))
        {
            self.artwork_requested.set(None);
        }

        // Clone so the callback may re-register itself
        let Some(callback) = self.on_event.borrow().clone() else {
            return;
        };
        for event in events {
            if let Ok(value) = serde_wasm_bindgen::to_value(&event) {
                callback.call1(&JsValue::NULL, &value).ok();
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressView {
    current: f64,
    total: f64,
    percent: f64,
    elapsed_label: String,
    total_label: String,
    remaining_label: String,
}

impl From<ProgressSnapshot> for ProgressView {
    fn from(snapshot: ProgressSnapshot) -> Self {
        Self {
            current: snapshot.current,
            total: snapshot.total,
            percent: snapshot.percent(),
            elapsed_label: snapshot.elapsed_label(),
            total_label: snapshot.total_label(),
            remaining_label: snapshot.remaining_label(),
        }
    }
}

/// Queue player widget for the browser
///
/// The page owns the `YT.Player` and forwards its `onStateChange` codes to
/// [`handle_player_state`](Self::handle_player_state); everything else
/// (queue, persistence, titles, artwork, search) happens here.
#[wasm_bindgen]
pub struct StandbyWidget {
    shared: Rc<Shared>,
    search: Rc<SearchService>,
    titles: Rc<OEmbedLookup>,
    thumbnails: Rc<HttpThumbnailProbe>,
    cover_store: LocalStorageStore,
    cover_key: String,
}

#[wasm_bindgen]
impl StandbyWidget {
    /// Create a widget around a ready `YT.Player`
    ///
    /// `config` is an optional plain object shaped like the TOML
    /// configuration; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(player: YtPlayer, config: JsValue) -> Result<StandbyWidget, JsValue> {
        console_error_panic_hook::set_once();

        let config: WidgetConfig = if config.is_undefined() || config.is_null() {
            WidgetConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        config.validate().map_err(js_error)?;

        let timeout = Duration::from_secs(config.metadata.timeout_secs);
        let controller = PlaybackController::from_config(
            &config,
            Box::new(LocalStorageStore::new()),
            Box::new(JsPlayer::new(player)),
        );

        Ok(Self {
            shared: Rc::new(Shared {
                controller: RefCell::new(controller),
                on_event: RefCell::new(None),
                artwork_requested: Cell::new(None),
            }),
            search: Rc::new(SearchService::from_settings(&config.search, timeout).map_err(js_error)?),
            titles: Rc::new(OEmbedLookup::from_settings(&config.metadata).map_err(js_error)?),
            thumbnails: Rc::new(HttpThumbnailProbe::new(timeout).map_err(js_error)?),
            cover_store: LocalStorageStore::new(),
            cover_key: config.storage.cover_key,
        })
    }

    /// Register the event callback; receives one object per event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        *self.shared.on_event.borrow_mut() = Some(callback);
    }

    /// Cue the persisted queue and start background lookups
    pub fn restore(&self) {
        self.shared.controller.borrow_mut().restore_session();
        self.after_change();

        let pending = self.shared.controller.borrow().untitled_entries();
        self.spawn_title_lookups(pending);
    }

    // ===== Queue =====

    /// Queue a pasted link; rejects text that is not a usable link
    #[wasm_bindgen(js_name = submitLink)]
    pub fn submit_link(&self, raw: &str) -> Result<(), JsValue> {
        let result = self.shared.controller.borrow_mut().submit_link(raw);
        self.after_change();

        let key = result.map_err(js_error)?;
        self.spawn_titles_for(&[key]);
        Ok(())
    }

    /// Append search or playlist results (array of `{id, title, artists}`)
    #[wasm_bindgen(js_name = enqueueCandidates)]
    pub fn enqueue_candidates(&self, candidates: JsValue) -> Result<(), JsValue> {
        let items = decode_candidates(candidates)?;
        let keys = self.shared.controller.borrow_mut().enqueue_many(items);
        self.after_change();
        self.spawn_titles_for(&keys);
        Ok(())
    }

    /// Replace the queue with search or playlist results and play them
    #[wasm_bindgen(js_name = playCandidates)]
    pub fn play_candidates(&self, candidates: JsValue) -> Result<(), JsValue> {
        let items = decode_candidates(candidates)?;
        let keys = self.shared.controller.borrow_mut().play_now(items);
        self.after_change();
        self.spawn_titles_for(&keys);
        Ok(())
    }

    pub fn select(&self, index: usize) -> bool {
        let selected = self.shared.controller.borrow_mut().select(index);
        self.after_change();
        selected
    }

    #[wasm_bindgen(js_name = moveBy)]
    pub fn move_by(&self, index: usize, delta: i32) -> bool {
        let moved = self
            .shared
            .controller
            .borrow_mut()
            .move_by(index, delta as isize);
        self.after_change();
        moved
    }

    #[wasm_bindgen(js_name = removeAt)]
    pub fn remove_at(&self, index: usize) -> bool {
        let removed = self.shared.controller.borrow_mut().remove_at(index);
        self.after_change();
        removed.is_some()
    }

    pub fn clear(&self) {
        self.shared.controller.borrow_mut().clear();
        self.after_change();
    }

    /// Queue entries as `[{id, start, title}]`
    #[wasm_bindgen(js_name = getQueue)]
    pub fn get_queue(&self) -> JsValue {
        let controller = self.shared.controller.borrow();
        serde_wasm_bindgen::to_value(controller.queue().items()).unwrap_or(JsValue::NULL)
    }

    /// Selected index, -1 when nothing is selected
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> i32 {
        self.shared
            .controller
            .borrow()
            .queue()
            .current_index()
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    // ===== Playback =====

    /// Forward a `YT.PlayerState` code from `onStateChange`
    #[wasm_bindgen(js_name = handlePlayerState)]
    pub fn handle_player_state(&self, code: i32) {
        self.shared
            .controller
            .borrow_mut()
            .handle_player_state(player_state_from_code(code));
        self.after_change();
    }

    pub fn next(&self) -> bool {
        let moved = self.shared.controller.borrow_mut().next();
        self.after_change();
        moved
    }

    pub fn previous(&self) -> bool {
        let moved = self.shared.controller.borrow_mut().previous();
        self.after_change();
        moved
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) {
        self.shared.controller.borrow_mut().toggle_play_pause();
        self.after_change();
    }

    /// Seek by percentage (0-100)
    #[wasm_bindgen(js_name = seekToPercent)]
    pub fn seek_to_percent(&self, percent: f64) -> Result<(), JsValue> {
        let result = self.shared.controller.borrow_mut().seek_to_percent(percent);
        self.after_change();
        result.map_err(js_error)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.shared.controller.borrow().state().as_str().to_string()
    }

    /// Sample progress: `{current, total, percent, elapsedLabel, totalLabel, remainingLabel}`
    #[wasm_bindgen(js_name = pollProgress)]
    pub fn poll_progress(&self) -> JsValue {
        let snapshot = self.shared.controller.borrow_mut().poll_progress();
        serde_wasm_bindgen::to_value(&ProgressView::from(snapshot)).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = pollIntervalMs)]
    pub fn poll_interval_ms(&self) -> u32 {
        let interval = self.shared.controller.borrow().poll_interval();
        u32::try_from(interval.as_millis()).unwrap_or(u32::MAX)
    }

    // ===== Volume =====

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f64) {
        let Some(level) = Volume::level_from_f64(level) else {
            debug!(level, "Ignoring non-finite volume");
            return;
        };
        self.shared.controller.borrow_mut().set_volume(level);
        self.shared.flush();
    }

    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> u8 {
        self.shared.controller.borrow().volume()
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.shared.controller.borrow_mut().toggle_mute();
        self.shared.flush();
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.shared.controller.borrow().is_muted()
    }

    // ===== Search =====

    /// Search for candidates; resolves to `[{id, title, artists}]`
    pub fn search(&self, query: String) -> Promise {
        let search = Rc::clone(&self.search);
        future_to_promise(async move {
            let results = search.search(&query).await.map_err(js_error)?;
            serde_wasm_bindgen::to_value(&results).map_err(js_error)
        })
    }

    /// Fetch a playlist's tracks; resolves to `[{id, title, artists}]`
    pub fn playlist(&self, playlist_id: String) -> Promise {
        let search = Rc::clone(&self.search);
        future_to_promise(async move {
            let tracks = search.playlist(&playlist_id).await.map_err(js_error)?;
            serde_wasm_bindgen::to_value(&tracks).map_err(js_error)
        })
    }

    // ===== Cover Art =====

    /// Store image bytes as the global cover; returns the data URL
    #[wasm_bindgen(js_name = setCoverImage)]
    pub fn set_cover_image(&mut self, mime_type: &str, bytes: &[u8]) -> Result<String, JsValue> {
        cover_art::set_image(&mut self.cover_store, &self.cover_key, mime_type, bytes)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = getCover)]
    pub fn get_cover(&self) -> Option<String> {
        cover_art::get(&self.cover_store, &self.cover_key)
            .ok()
            .flatten()
    }

    #[wasm_bindgen(js_name = clearCover)]
    pub fn clear_cover(&mut self) -> Result<(), JsValue> {
        cover_art::clear(&mut self.cover_store, &self.cover_key).map_err(js_error)
    }
}

impl StandbyWidget {
    fn after_change(&self) {
        self.shared.flush();
        self.refresh_artwork();
    }

    fn spawn_titles_for(&self, keys: &[EntryKey]) {
        let pending: Vec<(EntryKey, VideoId)> = self
            .shared
            .controller
            .borrow()
            .untitled_entries()
            .into_iter()
            .filter(|(key, _)| keys.contains(key))
            .collect();
        self.spawn_title_lookups(pending);
    }

    /// Look titles up one at a time; each result is checked against its entry
    fn spawn_title_lookups(&self, pending: Vec<(EntryKey, VideoId)>) {
        if pending.is_empty() {
            return;
        }
        let shared = Rc::clone(&self.shared);
        let titles = Rc::clone(&self.titles);
        spawn_local(async move {
            lookup_titles_in_turn(
                titles.as_ref(),
                pending,
                |key| shared.controller.borrow().queue().position_of(key).is_some(),
                |key, id, title| {
                    let applied = shared.controller.borrow_mut().resolve_title(key, id, &title);
                    if applied {
                        shared.flush();
                    }
                },
            )
            .await;
        });
    }

    /// Resolve artwork once per newly current entry
    fn refresh_artwork(&self) {
        let current = {
            let controller = self.shared.controller.borrow();
            controller
                .current_key()
                .zip(controller.current_item().map(|item| item.id.clone()))
        };
        let Some((key, id)) = current else {
            self.shared.artwork_requested.set(None);
            return;
        };
        if self.shared.artwork_requested.get() == Some(key) {
            return;
        }
        self.shared.artwork_requested.set(Some(key));

        let shared = Rc::clone(&self.shared);
        let probe = Rc::clone(&self.thumbnails);
        spawn_local(async move {
            match resolve_thumbnail(probe.as_ref(), &id).await {
                Ok(url) => {
                    let applied = shared.controller.borrow_mut().apply_artwork(key, url);
                    if applied {
                        shared.flush();
                    }
                }
                Err(e) => debug!(%id, error = %e, "No artwork"),
            }
        });
    }
}

fn decode_candidates(candidates: JsValue) -> Result<Vec<QueueItem>, JsValue> {
    let candidates: Vec<CandidateTrack> = serde_wasm_bindgen::from_value(candidates)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {e}")))?;
    Ok(candidates.into_iter().map(QueueItem::from).collect())
}
