//! Game state for Wild Boar Life
//!
//! One `GameState` is the whole simulation; it is handed to `tick` by
//! exclusive reference and read by the renderer afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::consts::*;
use super::hunter::HunterPool;
use super::piglet::Piglet;
use super::world::{Food, TileMap, generate_foods};
use crate::sim::{Effects, EventMessage, Facing, Particle, Phase, Rgb, SimRng, Stat};
use crate::tuning::Tuning;

/// Control snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoarInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

impl BoarInput {
    pub fn is_moving(&self) -> bool {
        self.up != self.down || self.left != self.right
    }
}

/// The player's boar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boar {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub sprinting: bool,
    /// Coated in mud (cosmetic, lingers after leaving mud)
    pub muddy: bool,
    pub muddy_timer: f32,
}

impl Boar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            sprinting: false,
            muddy: false,
            muddy_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoarStats {
    pub health: Stat,
    pub hunger: Stat,
    pub thirst: Stat,
    pub stamina: Stat,
    /// Age in days
    pub age: u32,
    /// Never negative; unbounded above
    pub score: f32,
}

impl Default for BoarStats {
    fn default() -> Self {
        Self {
            health: Stat::full(),
            hunger: Stat::full(),
            thirst: Stat::full(),
            stamina: Stat::full(),
            age: 0,
            score: 0.0,
        }
    }
}

impl BoarStats {
    pub fn add_score(&mut self, amount: f32) {
        self.score = (self.score + amount).max(0.0);
    }
}

/// Day/night progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayClock {
    /// 0.0 - 1.0 through the current day
    pub progress: f32,
    pub day: u32,
    pub is_night: bool,
}

impl Default for DayClock {
    fn default() -> Self {
        Self {
            progress: START_DAY_PROGRESS,
            day: 1,
            is_night: false,
        }
    }
}

impl DayClock {
    /// Advance by `dt` seconds. Returns true when a new day begins.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.progress += dt / DAY_DURATION;
        let rolled = self.progress >= 1.0;
        if rolled {
            self.progress = 0.0;
            self.day += 1;
        }
        self.is_night = self.progress > DUSK || self.progress < DAWN;
        rolled
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: SimRng,
    pub phase: Phase,
    pub boar: Boar,
    pub stats: BoarStats,
    pub tiles: TileMap,
    pub foods: Vec<Food>,
    pub hunters: HunterPool,
    pub piglets: Vec<Piglet>,
    /// The litter arrives once per run
    pub piglets_spawned: bool,
    pub clock: DayClock,
    /// Top-left of the viewport in world space
    pub camera: Vec2,
    pub effects: Effects,
    pub last_event: Option<EventMessage>,
    /// Seconds until the next hunter spawn attempt
    pub hunter_spawn_timer: f32,
    /// Seconds until another "OUCH" label may appear
    pub hurt_text_cooldown: f32,
    /// Seconds survived in this run
    pub time_alive: f32,
    pub tuning: Tuning,
}

impl GameState {
    /// A new run in the standard river valley
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tiles = TileMap::generate(TILE_SEED);
        let foods = generate_foods(&tiles, FOOD_SEED);
        Self::from_parts(seed, tiles, foods, tuning)
    }

    /// Assemble a run from an explicit world (used by tests and custom maps)
    pub fn from_parts(seed: u64, tiles: TileMap, foods: Vec<Food>, tuning: Tuning) -> Self {
        let mut rng = SimRng::new(seed);
        let hunter_spawn_timer = next_spawn_interval(&mut rng, &tuning);
        let start = tiles.clamp(Vec2::new(8.0 * TILE_SIZE, 10.0 * TILE_SIZE));
        let hunters = HunterPool::with_capacity(tuning.spawn.max_hunters);

        let mut state = Self {
            seed,
            rng,
            phase: Phase::Title,
            boar: Boar::new(start),
            stats: BoarStats::default(),
            tiles,
            foods,
            hunters,
            piglets: Vec::new(),
            piglets_spawned: false,
            clock: DayClock::default(),
            camera: Vec2::ZERO,
            effects: Effects::default(),
            last_event: None,
            hunter_spawn_timer,
            hurt_text_cooldown: 0.0,
            time_alive: 0.0,
            tuning,
        };
        state.camera = state.camera_target();
        state
    }

    /// Leave the title screen
    pub fn start(&mut self) {
        if self.phase.start() {
            log::info!("Wild boar run started (seed {})", self.seed);
        }
    }

    /// Clamped camera position that centres the boar
    pub fn camera_target(&self) -> Vec2 {
        let view = Vec2::new(VIEW_W, VIEW_H);
        let max = (self.tiles.world_size() - view).max(Vec2::ZERO);
        crate::clamp_vec(self.boar.pos - view / 2.0, Vec2::ZERO, max)
    }

    /// Show a HUD message
    pub fn announce(&mut self, text: impl Into<String>, seconds: f32) {
        let msg = EventMessage::new(text, seconds);
        log::debug!("event: {}", msg.text);
        self.last_event = Some(msg);
    }

    /// Spawn a rising floating-text label
    pub fn float_text(&mut self, pos: Vec2, text: impl Into<String>, color: Rgb) {
        let vel = Vec2::new(self.rng.spread(20.0), -60.0 - self.rng.unit() * 40.0);
        self.effects.spawn(Particle {
            pos,
            vel,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            color,
            size: 14.0,
            gravity: PARTICLE_GRAVITY,
            text: Some(text.into()),
        });
    }

    /// Passive score multiplier from the litter
    pub fn score_multiplier(&self) -> f32 {
        1.0 + self.piglets.len() as f32 * self.tuning.piglets.score_bonus
    }
}

/// Seconds until the next hunter spawn
pub(crate) fn next_spawn_interval(rng: &mut SimRng, tuning: &Tuning) -> f32 {
    tuning.spawn.interval_min + rng.unit() * tuning.spawn.interval_jitter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_starts_on_title_with_full_stats() {
        let state = GameState::new(1);
        assert_eq!(state.phase, Phase::Title);
        assert_eq!(state.stats.health.value(), MAX_STAT);
        assert_eq!(state.clock.day, 1);
        assert!(!state.foods.is_empty());
        assert_eq!(state.hunters.capacity(), state.tuning.spawn.max_hunters);
        assert_eq!(state.camera, state.camera_target());
    }

    #[test]
    fn test_day_clock_wraps() {
        let mut clock = DayClock::default();
        assert!(!clock.advance(DAY_DURATION * 0.5));
        assert!(clock.is_night == (clock.progress > DUSK));
        assert!(clock.advance(DAY_DURATION * 0.3));
        assert_eq!(clock.day, 2);
        assert_eq!(clock.progress, 0.0);
        assert!(clock.is_night);
    }

    #[test]
    fn test_zero_dt_does_not_advance_clock() {
        let mut clock = DayClock::default();
        let before = clock.clone();
        assert!(!clock.advance(0.0));
        assert_eq!(clock, before);
    }
}
