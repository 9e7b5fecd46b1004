//! Wildlight - real-time simulation cores for two browser arcade games
//!
//! Core modules:
//! - `sim`: Shared deterministic building blocks (stats, phases, collision, particles)
//! - `boar`: Wild Boar Life survival simulation
//! - `shadow`: Shadow-casting platformer (lights, tones, derived platforms)
//! - `runner`: Frame loop driver that owns a game state
//! - `platform`: Browser/native adapters (key codes, key-value storage)
//! - `tuning`: Data-driven game balance

pub mod boar;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod shadow;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Error, Result};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest step a single frame may take (seconds). Longer stalls are truncated.
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Display rate the per-frame feel constants were tuned at
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Upper bound for every bounded stat
    pub const MAX_STAT: f32 = 100.0;
    /// Distances below this are treated as zero (no normalization)
    pub const DIST_EPSILON: f32 = 1e-4;
}

/// Frame-rate independent version of `value += (target - value) * per_frame`
///
/// Returns the blend factor for a step of `dt` seconds. `dt = 0` yields 0.
#[inline]
pub fn smoothing_factor(per_frame: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - per_frame).powf(dt * consts::REFERENCE_FPS)
}

/// Move `from` toward `to` by at most `max_step`, skipping degenerate distances
#[inline]
pub fn seek(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist < consts::DIST_EPSILON {
        return from;
    }
    from + delta / dist * max_step.min(dist)
}

/// Clamp a point into an axis-aligned box
#[inline]
pub fn clamp_vec(v: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(v.x.clamp(min.x, max.x), v.y.clamp(min.y, max.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_factor_matches_per_frame_at_reference_rate() {
        let f = smoothing_factor(0.1, 1.0 / 60.0);
        assert!((f - 0.1).abs() < 1e-5);
        assert_eq!(smoothing_factor(0.1, 0.0), 0.0);
    }

    #[test]
    fn test_seek_does_not_overshoot() {
        let p = seek(Vec2::ZERO, Vec2::new(3.0, 4.0), 100.0);
        assert!((p - Vec2::new(3.0, 4.0)).length() < 1e-5);
        let p = seek(Vec2::ZERO, Vec2::new(3.0, 4.0), 1.0);
        assert!((p.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_seek_skips_zero_distance() {
        let p = seek(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 10.0);
        assert_eq!(p, Vec2::new(5.0, 5.0));
        assert!(p.x.is_finite());
    }
}
