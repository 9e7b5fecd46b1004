//! Wild Boar Life - open-world survival simulation
//!
//! A boar forages a river valley, keeps hunger and thirst up, avoids
//! hunters and eventually raises a litter of piglets.

pub mod hud;
pub mod hunter;
pub mod piglet;
pub mod state;
pub mod tick;
pub mod world;

pub use hud::BoarHud;
pub use hunter::{Hunter, HunterPool, HunterState};
pub use piglet::Piglet;
pub use state::{Boar, BoarInput, BoarStats, DayClock, GameState};
pub use tick::tick;
pub use world::{Food, FoodKind, Tile, TileKind, TileMap};

/// Balance and world constants
pub mod consts {
    pub use crate::consts::MAX_STAT;

    /// Tile edge length (px)
    pub const TILE_SIZE: f32 = 48.0;
    pub const WORLD_TILES_W: usize = 40;
    pub const WORLD_TILES_H: usize = 30;
    /// Entities stay this far inside the world edge
    pub const WORLD_MARGIN: f32 = 16.0;

    /// Fixed seeds so the valley layout is the same every run
    pub const TILE_SEED: u64 = 42;
    pub const FOOD_SEED: u64 = 123;
    pub const FOOD_PLACEMENT_ATTEMPTS: usize = 80;

    /// Walking speed (px/s)
    pub const BOAR_SPEED: f32 = 160.0;
    pub const SPRINT_MULTIPLIER: f32 = 1.8;
    /// Sprinting needs more than this much stamina
    pub const SPRINT_MIN_STAMINA: f32 = 5.0;
    /// Diagonal input scale (~1/sqrt 2)
    pub const DIAGONAL: f32 = 0.707;
    pub const MUD_SLOW: f32 = 0.5;
    /// Seconds the boar stays muddy after leaving mud
    pub const MUDDY_DURATION: f32 = 8.0;

    /// Per-second rates
    pub const HUNGER_RATE: f32 = 1.8;
    pub const THIRST_RATE: f32 = 2.2;
    pub const STAMINA_REGEN: f32 = 8.0;
    pub const SPRINT_DRAIN: f32 = 20.0;
    pub const WATER_RESTORE_RATE: f32 = 30.0;
    /// Thirst snaps to full once above this while drinking
    pub const DRINK_SNAP: f32 = 98.0;
    pub const STARVE_DAMAGE: f32 = 3.0;
    pub const HEALTH_REGEN: f32 = 1.5;
    /// Hunger and thirst must both exceed this for health to regenerate
    pub const WELL_FED: f32 = 50.0;

    /// Seconds per full day/night cycle
    pub const DAY_DURATION: f32 = 90.0;
    /// Runs begin in the morning of day 1
    pub const START_DAY_PROGRESS: f32 = 0.25;
    pub const DUSK: f32 = 0.6;
    pub const DAWN: f32 = 0.05;

    pub const EAT_RANGE: f32 = 40.0;
    pub const FOOD_RESPAWN_MIN: f32 = 15.0;
    pub const FOOD_RESPAWN_JITTER: f32 = 20.0;

    /// Passive score per second alive (before piglet bonus)
    pub const TIME_SCORE_RATE: f32 = 2.0;

    /// Seconds an alerted hunter stays alert after losing sight
    pub const HUNTER_ALERT_TIME: f32 = 3.0;
    /// Minimum gap between "OUCH" labels while being hit
    pub const HURT_TEXT_INTERVAL: f32 = 0.5;

    /// Viewport size (px)
    pub const VIEW_W: f32 = 960.0;
    pub const VIEW_H: f32 = 600.0;
    /// Camera catch-up per 60 Hz frame
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    pub const PARTICLE_LIFE: f32 = 1.8;
    pub const PARTICLE_GRAVITY: f32 = 20.0;
    pub const EVENT_MESSAGE_TIME: f32 = 4.0;
    pub const PIGLET_MESSAGE_TIME: f32 = 5.0;
}
