//! WASM bindings for standby-playback
//!
//! Binds the controller to an iframe `YT.Player`, `localStorage` and the
//! discovery clients so the widget runs entirely in the browser.

pub mod player;
pub mod widget;

pub use player::{JsPlayer, YtPlayer};
pub use widget::StandbyWidget;
