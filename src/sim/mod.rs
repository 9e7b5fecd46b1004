//! Shared simulation building blocks
//!
//! Everything in here is used by both games. This module must stay pure and deterministic:
//! - Time only advances through the `dt` handed to a tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod input;
pub mod phase;
pub mod rng;
pub mod stat;

pub use collision::{Body, Contact, Rect, resolve, resting_on};
pub use effects::{Effects, Particle, Rgb, Ripple};
pub use input::{Facing, InputFrame, InputProvider};
pub use phase::Phase;
pub use rng::SimRng;
pub use stat::Stat;

use serde::{Deserialize, Serialize};

/// Short HUD message with a countdown ("A hunter approaches!")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    pub text: String,
    /// Seconds left on screen
    pub timer: f32,
}

impl EventMessage {
    pub fn new(text: impl Into<String>, timer: f32) -> Self {
        Self {
            text: text.into(),
            timer,
        }
    }

    /// Count the message down; returns false once it has expired
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        self.timer > 0.0
    }
}
