//! Bounded scalar resources (health, hunger, thirst, stamina)

use serde::{Deserialize, Serialize};

use crate::consts::MAX_STAT;

/// A value that is always inside `[0, MAX_STAT]`.
///
/// The inner value is private so every write goes through a clamping method.
/// Deserialization also clamps, so a hand-edited snapshot cannot smuggle in
/// an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Stat(f32);

#[inline]
fn clamp_stat(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, MAX_STAT) }
}

impl Stat {
    pub fn new(value: f32) -> Self {
        Self(clamp_stat(value))
    }

    pub fn full() -> Self {
        Self(MAX_STAT)
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        self.0 = clamp_stat(value);
    }

    /// Add a signed amount
    pub fn add(&mut self, delta: f32) {
        self.set(self.0 + delta);
    }

    /// Lose `rate` per second for `dt` seconds
    pub fn drain(&mut self, rate: f32, dt: f32) {
        self.add(-rate * dt);
    }

    /// Gain `rate` per second for `dt` seconds
    pub fn restore(&mut self, rate: f32, dt: f32) {
        self.add(rate * dt);
    }

    pub fn is_empty(self) -> bool {
        self.0 <= 0.0
    }

    /// 0.0 - 1.0 for HUD bars
    pub fn fraction(self) -> f32 {
        self.0 / MAX_STAT
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::full()
    }
}

impl From<f32> for Stat {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Stat> for f32 {
    fn from(stat: Stat) -> Self {
        stat.0
    }
}
