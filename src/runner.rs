//! Frame loop driver
//!
//! `GameLoop` owns exactly one game state and is driven from outside (a
//! `requestAnimationFrame` callback on the web, a plain loop natively). Each
//! frame it turns wall-clock time into a clamped `dt`, pairs the key snapshot
//! with the previous one for edge detection and runs one tick.

use serde::Serialize;

use crate::consts::MAX_FRAME_DT;
use crate::error::Result;
use crate::highscores::{self, HighScore};
use crate::platform::Storage;
use crate::settings::Settings;
use crate::sim::{InputFrame, Phase};
use crate::{boar, shadow};

/// Wall-clock to simulation time
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, clamped to `[0, MAX_FRAME_DT]`.
    /// The first call after `new` or `reset` yields 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// A game the loop can drive
pub trait Simulation: Clone + Serialize {
    type Input: Copy + Default + PartialEq;
    type Hud: Serialize;

    /// Where this game's best score lives
    const SCORE_KEY: &'static str;

    fn start(&mut self);
    fn step(&mut self, input: &InputFrame<Self::Input>, dt: f32);
    fn phase(&self) -> Phase;
    /// Final score offered to the high score table
    fn score(&self) -> u64;
    fn hud(&self) -> Self::Hud;
    fn apply_settings(&mut self, settings: &Settings);

    /// The follow-up stage after a completed one, if any
    fn next_stage(&self) -> Option<Self> {
        None
    }
}

impl Simulation for boar::GameState {
    type Input = boar::BoarInput;
    type Hud = boar::BoarHud;

    const SCORE_KEY: &'static str = highscores::BOAR_KEY;

    fn start(&mut self) {
        boar::GameState::start(self);
    }

    fn step(&mut self, input: &InputFrame<Self::Input>, dt: f32) {
        boar::tick(self, &input.now, dt);
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.stats.score.max(0.0).floor() as u64
    }

    fn hud(&self) -> Self::Hud {
        boar::BoarHud::from_state(self)
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.effects.cap = settings.max_particles();
    }
}

impl Simulation for shadow::GameState {
    type Input = shadow::ShadowInput;
    type Hud = shadow::ShadowHud;

    const SCORE_KEY: &'static str = highscores::SHADOW_KEY;

    fn start(&mut self) {
        shadow::GameState::start(self);
    }

    fn step(&mut self, input: &InputFrame<Self::Input>, dt: f32) {
        shadow::tick(self, input, dt);
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn score(&self) -> u64 {
        u64::from(self.levels_cleared())
    }

    fn hud(&self) -> Self::Hud {
        shadow::ShadowHud::from_state(self)
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.effects.cap = settings.max_particles();
        self.ambient_particles = settings.ambient_particles();
    }

    fn next_stage(&self) -> Option<Self> {
        self.next_level()
    }
}

/// What the renderer reads each frame
#[derive(Serialize)]
pub struct Snapshot<'a, S: Simulation> {
    pub state: &'a S,
    pub hud: S::Hud,
    pub best: u64,
    pub paused: bool,
    /// Whether the renderer should draw control hints
    pub show_hints: bool,
}

pub struct GameLoop<S: Simulation> {
    state: S,
    clock: FrameClock,
    prev_input: S::Input,
    paused: bool,
    settings: Settings,
    best: HighScore,
    /// The current run's score has been offered to `best`
    recorded: bool,
    storage: Box<dyn Storage>,
}

impl<S: Simulation> GameLoop<S> {
    /// Take ownership of `state`, reading preferences and the best score from `storage`
    pub fn new(mut state: S, storage: Box<dyn Storage>) -> Self {
        let settings = Settings::load(storage.as_ref());
        let best = HighScore::load(storage.as_ref(), S::SCORE_KEY);
        state.apply_settings(&settings);
        Self {
            state,
            clock: FrameClock::new(),
            prev_input: S::Input::default(),
            paused: false,
            settings,
            best,
            recorded: false,
            storage,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn best(&self) -> u64 {
        self.best.best
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Leave the title screen
    pub fn start(&mut self) {
        self.state.start();
        self.clock.reset();
    }

    /// Run one frame at wall-clock `now_ms`. Returns the `dt` that was simulated.
    pub fn frame(&mut self, now_ms: f64, input: S::Input) -> f32 {
        if self.paused {
            return 0.0;
        }
        let dt = self.clock.tick(now_ms);
        self.step(input, dt);
        dt
    }

    /// Run one tick with an explicit `dt` (headless drivers and tests)
    pub fn step(&mut self, input: S::Input, dt: f32) {
        let frame = InputFrame::new(input, self.prev_input);
        self.prev_input = input;
        self.state.step(&frame, dt.clamp(0.0, MAX_FRAME_DT));
        self.record_if_over();
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Paused");
        }
    }

    /// The first frame after resuming simulates no time
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.clock.reset();
            log::info!("Resumed");
        }
    }

    /// Replace the running state (new run or next stage)
    pub fn restart(&mut self, mut state: S) {
        state.apply_settings(&self.settings);
        self.state = state;
        self.prev_input = S::Input::default();
        self.recorded = false;
        self.clock.reset();
    }

    /// Move on from a completed stage; false if there is nothing after it
    pub fn next_stage(&mut self) -> bool {
        match self.state.next_stage() {
            Some(next) => {
                self.restart(next);
                true
            }
            None => false,
        }
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.apply_settings(&settings);
        self.settings = settings;
        if let Err(e) = self.settings.save(self.storage.as_mut()) {
            log::warn!("Could not save settings: {e}");
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_, S> {
        Snapshot {
            state: &self.state,
            hud: self.state.hud(),
            best: self.best.best,
            paused: self.paused,
            show_hints: self.settings.show_hints,
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    fn record_if_over(&mut self) {
        if self.recorded || !self.state.phase().is_terminal() {
            return;
        }
        self.recorded = true;
        let score = self.state.score();
        log::info!("Game over ({:?}) with score {}", self.state.phase(), score);
        if self.best.record(score) {
            if let Err(e) = self.best.save(self.storage.as_mut()) {
                log::warn!("Could not save best score: {e}");
            }
        }
    }
}
