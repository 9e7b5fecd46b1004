//! Browser bindings
//!
//! JS owns the canvas and the renderer. It forwards key events here, calls
//! `frame` from `requestAnimationFrame` and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::boar;
use crate::platform::{KeySet, LocalStorage, MemoryStorage, Storage};
use crate::runner::GameLoop;
use crate::shadow;
use crate::sim::InputProvider;

/// Install the panic hook and the console logger. Safe to call more than once.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Wildlight starting...");
    }
}

fn open_storage() -> Box<dyn Storage> {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("{e}; progress will not be saved");
            Box::new(MemoryStorage::new())
        }
    }
}

enum Session {
    Boar(GameLoop<boar::GameState>),
    Shadow(GameLoop<shadow::GameState>),
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    keys: KeySet,
}

#[wasm_bindgen]
impl WebGame {
    /// `game` is `"boar"` or `"shadow"`
    #[wasm_bindgen(constructor)]
    pub fn new(game: &str, seed: f64) -> Result<WebGame, JsValue> {
        let seed = seed as u64;
        let session = match game {
            "boar" => Session::Boar(GameLoop::new(boar::GameState::new(seed), open_storage())),
            "shadow" => Session::Shadow(GameLoop::new(shadow::GameState::new(seed), open_storage())),
            other => return Err(JsValue::from_str(&format!("unknown game: {other}"))),
        };
        log::info!("{game} initialized with seed: {seed}");
        Ok(WebGame {
            session,
            keys: KeySet::new(),
        })
    }

    pub fn start(&mut self) {
        match &mut self.session {
            Session::Boar(g) => g.start(),
            Session::Shadow(g) => g.start(),
        }
    }

    /// Returns true if the page should `preventDefault` the event
    pub fn key_down(&mut self, code: &str) -> bool {
        self.keys.key_down(code);
        KeySet::captures(code)
    }

    pub fn key_up(&mut self, code: &str) {
        self.keys.key_up(code);
    }

    /// Window lost focus: key-ups will be missed, so drop them all and pause
    pub fn blur(&mut self) {
        self.keys.clear();
        self.pause();
    }

    pub fn pause(&mut self) {
        match &mut self.session {
            Session::Boar(g) => g.pause(),
            Session::Shadow(g) => g.pause(),
        }
    }

    pub fn resume(&mut self) {
        match &mut self.session {
            Session::Boar(g) => g.resume(),
            Session::Shadow(g) => g.resume(),
        }
    }

    /// Advance to `now_ms` (a `requestAnimationFrame` timestamp)
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        match &mut self.session {
            Session::Boar(g) => g.frame(now_ms, self.keys.snapshot()),
            Session::Shadow(g) => g.frame(now_ms, self.keys.snapshot()),
        }
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        let json = match &self.session {
            Session::Boar(g) => g.snapshot_json(),
            Session::Shadow(g) => g.snapshot_json(),
        };
        json.map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load the next level after a completed one
    pub fn next_level(&mut self) -> bool {
        match &mut self.session {
            Session::Boar(_) => false,
            Session::Shadow(g) => g.next_stage(),
        }
    }

    pub fn restart(&mut self, seed: f64) {
        let seed = seed as u64;
        match &mut self.session {
            Session::Boar(g) => g.restart(boar::GameState::new(seed)),
            Session::Shadow(g) => g.restart(shadow::GameState::new(seed)),
        }
        log::info!("Started new game with seed: {seed}");
    }

    pub fn best(&self) -> f64 {
        match &self.session {
            Session::Boar(g) => g.best() as f64,
            Session::Shadow(g) => g.best() as f64,
        }
    }
}
