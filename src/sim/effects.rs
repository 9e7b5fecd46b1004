//! Cosmetic feedback: particles, floating text, ripples
//!
//! Not gameplay-affecting, but owned by the simulation because gameplay
//! events create them. The renderer only reads these.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::smoothing_factor;

/// Packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);
    pub const GOLD: Rgb = Rgb(0xf5d67a);
    pub const DANGER: Rgb = Rgb(0xff4444);
}

/// A particle or floating text label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub max_life: f32,
    pub color: Rgb,
    pub size: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Floating text instead of a dot
    pub text: Option<String>,
}

impl Particle {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += self.gravity * dt;
        self.life -= dt;
    }
}

/// Expanding ring (note/echo feedback)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub life: f32,
    pub max_life: f32,
    pub color: Rgb,
}

impl Ripple {
    /// Per-frame easing of the radius toward `max_radius` at 60 Hz
    const GROWTH: f32 = 0.1;

    pub fn new(pos: Vec2, radius: f32, max_radius: f32, life: f32, color: Rgb) -> Self {
        Self {
            pos,
            radius,
            max_radius,
            life,
            max_life: life,
            color,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.radius += (self.max_radius - self.radius) * smoothing_factor(Self::GROWTH, dt);
        self.life -= dt;
    }
}

/// Live feedback owned by a game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub ripples: Vec<Ripple>,
    /// Maximum live particles; the oldest are dropped first
    pub cap: usize,
}

impl Default for Effects {
    fn default() -> Self {
        Self::with_cap(256)
    }
}

impl Effects {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            particles: Vec::new(),
            ripples: Vec::new(),
            cap,
        }
    }

    pub fn spawn(&mut self, particle: Particle) {
        if self.cap == 0 {
            return;
        }
        if self.particles.len() >= self.cap {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    pub fn spawn_ripple(&mut self, ripple: Ripple) {
        self.ripples.push(ripple);
    }

    /// Age everything by `dt` and drop what has expired
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for p in &mut self.particles {
            p.advance(dt);
        }
        self.particles.retain(|p| p.life > 0.0);

        for r in &mut self.ripples {
            r.advance(dt);
        }
        self.ripples.retain(|r| r.life > 0.0);
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.ripples.is_empty()
    }
}
