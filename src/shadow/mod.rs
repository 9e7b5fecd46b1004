//! Shadow platformer - lights cast shadows, shadows are the floor
//!
//! Holding a tone key turns the shadows of authored platforms into solid
//! ground for as long as the tone rings. Silence freezes (crystallizes) them.

pub mod hud;
pub mod level;
pub mod projector;
pub mod state;
pub mod tick;
pub mod tone;

pub use hud::ShadowHud;
pub use level::{Level, Light, LightKind, Platform, Projection};
pub use projector::{ShadowPlatform, project, project_floor, project_ribs, project_span};
pub use state::{GameState, Player, ShadowInput};
pub use tick::tick;
pub use tone::{Tone, ToneState, Voice};

/// Physics and feel constants, tuned at 60 Hz and expressed per second
pub mod consts {
    /// Downward acceleration (px/s²), 0.45 px/frame²
    pub const GRAVITY: f32 = 1620.0;
    /// Horizontal run speed (px/s), 3.5 px/frame
    pub const RUN_SPEED: f32 = 210.0;
    /// Jump impulse (px/s), -10.5 px/frame
    pub const JUMP_VELOCITY: f32 = -630.0;
    pub const PLAYER_W: f32 = 18.0;
    pub const PLAYER_H: f32 = 28.0;

    /// Physics is integrated in steps no longer than this
    pub const PHYSICS_STEP: f32 = 1.0 / 120.0;
    pub const MAX_SUBSTEPS: u32 = 12;

    /// Falling this far below the ground respawns the player on it
    pub const FALL_OUT_DEPTH: f32 = 200.0;

    /// Grab radius, measured from mid-body
    pub const GRAB_RANGE: f32 = 55.0;
    pub const GRAB_HEIGHT: f32 = 14.0;
    /// Held light offset (x is multiplied by facing)
    pub const HOLD_OFFSET_X: f32 = 22.0;
    pub const HOLD_OFFSET_Y: f32 = 22.0;

    /// Sway oscillator speed (rad/s), 0.04 rad/frame
    pub const SWAY_RATE: f32 = 2.4;
    pub const SWAY_AMPLITUDE: f32 = 6.0;

    /// Projection guards
    pub const MIN_LIGHT_DY: f32 = 1.0;
    pub const MIN_SHADOW_WIDTH: f32 = 5.0;
    pub const MIN_RIB_WIDTH: f32 = 30.0;
    /// Chamber wall thickness on the window level
    pub const WALL_THICKNESS: f32 = 30.0;

    /// Echo delay and duration, 90 and 35 frames
    pub const ECHO_DELAY: f32 = 1.5;
    pub const ECHO_DURATION: f32 = 35.0 / 60.0;
    pub const NOTE_RIPPLE_LIFE: f32 = 32.0 / 60.0;
    pub const ECHO_RIPPLE_LIFE: f32 = 20.0 / 60.0;

    /// Ambient tone sparkles: chance per 60 Hz frame
    pub const TONE_PARTICLE_CHANCE: f32 = 0.3;
    pub const TONE_PARTICLE_LIFE: f32 = 40.0 / 60.0;
    /// Glow pulse phase speed (rad/s), 0.05 rad/frame
    pub const GLOW_RATE: f32 = 3.0;

    pub const VIEW_W: f32 = 900.0;
    pub const VIEW_H: f32 = 580.0;
    pub const CAMERA_SMOOTHING_X: f32 = 0.1;
    pub const CAMERA_SMOOTHING_Y: f32 = 0.08;
    /// Player sits this far down the viewport
    pub const CAMERA_ANCHOR_Y: f32 = 0.62;

    /// Standing within this height of the goal platform wins
    pub const GOAL_TOLERANCE: f32 = 30.0;
}
