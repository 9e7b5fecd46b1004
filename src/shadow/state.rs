//! Shadow platformer state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::consts::{PLAYER_H, PLAYER_W};
use super::level::Level;
use super::projector::ShadowPlatform;
use super::tone::ToneState;
use crate::sim::{Body, Effects, Facing, Phase, SimRng};

/// One frame of platformer keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    /// Z
    pub low: bool,
    /// X
    pub high: bool,
    /// C
    pub whisper: bool,
    /// Space
    pub silence: bool,
    /// E, edge triggered
    pub grab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Cosmetic glow phase (radians)
    pub glow_pulse: f32,
    /// Id of the carried light
    pub holding: Option<u32>,
}

impl Player {
    pub fn spawn(at: Vec2) -> Self {
        Self {
            body: Body::new(at, Vec2::new(PLAYER_W, PLAYER_H)),
            facing: Facing::Right,
            glow_pulse: 0.0,
            holding: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub rng: SimRng,
    pub phase: Phase,
    /// Layout plus the (movable) lights
    pub level: Level,
    pub player: Player,
    pub tones: ToneState,
    /// Derived every tick; empty unless a tone or silence rings
    pub shadows: Vec<ShadowPlatform>,
    pub camera: Vec2,
    pub effects: Effects,
    /// 0 - 5: move, jump, grab, tone, climb on a shadow
    pub tutorial_step: u8,
    /// Emit ambient sparkles while a tone rings
    pub ambient_particles: bool,
}

impl GameState {
    /// Fresh run on level 1
    pub fn new(seed: u64) -> Self {
        Self::with_level(seed, Level::meadow())
    }

    pub fn with_level(seed: u64, level: Level) -> Self {
        Self {
            seed,
            rng: SimRng::new(seed),
            phase: Phase::Title,
            player: Player::spawn(level.spawn),
            tones: ToneState::default(),
            shadows: Vec::new(),
            camera: level.camera,
            effects: Effects::default(),
            tutorial_step: level.tutorial_step,
            ambient_particles: true,
            level,
        }
    }

    pub fn start(&mut self) {
        if self.phase.start() {
            log::info!("Shadow run started on level {} (seed {})", self.level.number, self.seed);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Levels cleared so far in this run
    pub fn levels_cleared(&self) -> u32 {
        self.level.number.saturating_sub(1) + u32::from(self.is_complete())
    }

    /// Build the next level from a completed one; `None` if not complete or none left
    pub fn next_level(&self) -> Option<GameState> {
        if !self.is_complete() {
            return None;
        }
        let level = Level::load(self.level.number + 1)?;
        let mut next = Self::with_level(self.seed, level);
        next.effects.cap = self.effects.cap;
        next.ambient_particles = self.ambient_particles;
        next.phase = Phase::Playing;
        log::info!("Loaded level {}", next.level.number);
        Some(next)
    }
}
