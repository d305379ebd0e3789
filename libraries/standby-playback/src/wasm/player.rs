//! `YT.Player` as a player capability

use standby_core::{PlayerCapability, PlayerState, VideoId};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Iframe player instance created by the host page
    pub type YtPlayer;

    #[wasm_bindgen(method, js_name = loadVideoById)]
    fn load_video_by_id(this: &YtPlayer, video_id: &str, start_seconds: f64);

    #[wasm_bindgen(method, js_name = cueVideoById)]
    fn cue_video_by_id(this: &YtPlayer, video_id: &str, start_seconds: f64);

    #[wasm_bindgen(method, js_name = playVideo)]
    fn play_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = pauseVideo)]
    fn pause_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = stopVideo)]
    fn stop_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = seekTo)]
    fn seek_to(this: &YtPlayer, seconds: f64, allow_seek_ahead: bool);

    #[wasm_bindgen(method, js_name = setVolume)]
    fn set_volume(this: &YtPlayer, volume: f64);

    #[wasm_bindgen(method, js_name = getCurrentTime)]
    fn get_current_time(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = getDuration)]
    fn get_duration(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = getPlayerState)]
    fn get_player_state(this: &YtPlayer) -> i32;
}

/// Map an iframe API state code onto the four states the controller uses
///
/// Buffering (3), cued (5) and unstarted (-1) all read as `Unstarted`.
pub fn player_state_from_code(code: i32) -> PlayerState {
    match code {
        0 => PlayerState::Ended,
        1 => PlayerState::Playing,
        2 => PlayerState::Paused,
        _ => PlayerState::Unstarted,
    }
}

/// Player capability backed by a `YT.Player`
pub struct JsPlayer {
    player: YtPlayer,
}

impl JsPlayer {
    pub fn new(player: YtPlayer) -> Self {
        Self { player }
    }
}

impl PlayerCapability for JsPlayer {
    fn load_and_play(&mut self, id: &VideoId, start_offset: u32) {
        self.player
            .load_video_by_id(id.as_str(), f64::from(start_offset));
    }

    fn cue_only(&mut self, id: &VideoId, start_offset: u32) {
        self.player
            .cue_video_by_id(id.as_str(), f64::from(start_offset));
    }

    fn play(&mut self) {
        self.player.play_video();
    }

    fn pause(&mut self) {
        self.player.pause_video();
    }

    fn stop(&mut self) {
        self.player.stop_video();
    }

    fn seek_to(&mut self, seconds: f64) {
        self.player.seek_to(seconds, true);
    }

    fn set_volume(&mut self, level: u8) {
        self.player.set_volume(f64::from(level));
    }

    fn current_time(&self) -> f64 {
        self.player.get_current_time()
    }

    fn duration(&self) -> f64 {
        self.player.get_duration()
    }

    fn state(&self) -> PlayerState {
        player_state_from_code(self.player.get_player_state())
    }
}
