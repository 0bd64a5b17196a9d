//! Browser bindings
//!
//! The JS host owns the canvas, the animation frame loop and audio
//! playback. It forwards key events, calls `frame` once per animation
//! frame and draws the returned JSON.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::controller::{Cue, Game, Notifier};
use crate::sim::InputEvent;
use crate::snapshot::Snapshot;
use crate::storage::{LocalStorage, MemoryStorage, Storage};

use super::input_for_key;

/// Queues cues for the host and drives `navigator.vibrate`
#[derive(Default)]
struct WebNotifier {
    cues: Vec<(Cue, f32)>,
}

impl Notifier for WebNotifier {
    fn play(&mut self, cue: Cue, volume: f32) {
        self.cues.push((cue, volume));
    }

    fn vibrate(&mut self, duration_ms: u32) {
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().vibrate_with_duration(duration_ms);
        }
    }
}

#[derive(Serialize)]
struct WebFrame<'a> {
    #[serde(flatten)]
    snapshot: Snapshot,
    cues: &'a [(Cue, f32)],
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<Box<dyn Storage>, WebNotifier>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        console_error_panic_hook::set_once();
        // A second instance finds the logger already installed
        let _ = console_log::init_with_level(log::Level::Info);

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Ok(local) => Box::new(local),
            Err(err) => {
                log::warn!("{}; scores will not persist", err);
                Box::new(MemoryStorage::new())
            }
        };
        log::info!("Space Invaders starting (seed {})", seed);

        WebGame {
            game: Game::new(seed, storage, WebNotifier::default()),
        }
    }

    /// Returns true if the key is bound, so the host can prevent scrolling
    pub fn key_down(&mut self, key: &str) -> bool {
        self.forward(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.forward(key, false)
    }

    /// Ignored unless the game is idle or over
    pub fn restart(&mut self) {
        self.game.handle_input(InputEvent::Restart);
    }

    /// Advance by `dt_ms` and return the frame as JSON
    pub fn frame(&mut self, dt_ms: f32) -> Result<String, JsValue> {
        self.game.notifier_mut().cues.clear();
        self.game.frame(dt_ms);
        let frame = WebFrame {
            snapshot: Snapshot::capture(&self.game),
            cues: &self.game.notifier().cues,
        };
        serde_json::to_string(&frame).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Current view without advancing, for redraws after resize
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        Snapshot::capture(&self.game)
            .to_json()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Stop ticking when the page is hidden or unloaded
    pub fn teardown(&mut self) {
        self.game.teardown();
    }
}

impl WebGame {
    fn forward(&mut self, key: &str, pressed: bool) -> bool {
        match input_for_key(key, pressed) {
            Some(event) => {
                self.game.handle_input(event);
                true
            }
            None => false,
        }
    }
}
