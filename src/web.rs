//! Browser entry point
//!
//! JS owns the canvas and the animation frame loop. It forwards keyboard
//! codes and calls `frame` once per animation frame, drawing the returned
//! snapshot JSON.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, SoundEffect};
use crate::input::{KeyBindings, KeyState};
use crate::platform::{Game, Host};
use crate::settings::Settings;
use crate::sim::{Snapshot, TickInput};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pico Pong starting...");
}

struct WebHost {
    bindings: KeyBindings,
    keys: KeyState,
    dt: f32,
    audio: AudioManager,
    snapshot_json: String,
}

impl Host for WebHost {
    fn poll_input(&mut self) -> TickInput {
        self.keys.take_input()
    }

    fn frame_time(&mut self) -> f32 {
        self.dt
    }

    fn play(&mut self, effect: SoundEffect) {
        self.audio.play(effect);
    }

    fn present(&mut self, snapshot: &Snapshot) {
        match snapshot.to_json() {
            Ok(json) => self.snapshot_json = json,
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
    }

    fn should_close(&self) -> bool {
        false
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    host: WebHost,
}

#[wasm_bindgen]
impl WebGame {
    /// Optional JSON overrides; bad JSON logs a warning and uses defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>, tuning_json: Option<String>) -> WebGame {
        let settings = settings_json
            .map(|json| {
                Settings::from_json(&json).unwrap_or_else(|e| {
                    log::warn!("Ignoring settings: {e}");
                    Settings::default()
                })
            })
            .unwrap_or_default();

        let tuning = tuning_json
            .map(|json| {
                Tuning::from_json(&json).unwrap_or_else(|e| {
                    log::warn!("Ignoring tuning: {e}");
                    Tuning::default()
                })
            })
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        let host = WebHost {
            bindings: settings.bindings.clone(),
            keys: KeyState::new(),
            dt: crate::consts::FRAME_DT,
            audio: AudioManager::new(settings.effective_volume()),
            snapshot_json: String::new(),
        };

        WebGame {
            game: Game::new(settings, tuning, seed),
            host,
        }
    }

    /// `KeyboardEvent.code` of a key going down
    pub fn key_down(&mut self, code: &str) {
        self.host.keys.key_down(&self.host.bindings, code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.host.keys.key_up(&self.host.bindings, code);
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.host.keys.release_all();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.game.settings.master_volume = volume.clamp(0.0, 1.0);
        self.host.audio.set_volume(self.game.settings.effective_volume());
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn frame(&mut self, dt_ms: f64) -> String {
        self.host.dt = (dt_ms / 1000.0) as f32;
        self.game.frame(&mut self.host);
        self.host.snapshot_json.clone()
    }
}
