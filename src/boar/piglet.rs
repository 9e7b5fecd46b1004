//! Piglets: companions that trail the boar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DIST_EPSILON;
use crate::sim::SimRng;
use crate::tuning::PigletTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piglet {
    pub id: u32,
    pub pos: Vec2,
    /// Personal angle so the litter fans out instead of stacking
    pub offset_angle: f32,
}

impl Piglet {
    /// The trailing point this piglet is heading for
    pub fn slot(&self, boar: Vec2, follow_distance: f32) -> Vec2 {
        boar - Vec2::new(self.offset_angle.cos(), self.offset_angle.sin()) * follow_distance
    }

    /// Seek the trailing slot. Speed grows with distance, capped at the follow speed.
    pub fn follow(&mut self, boar: Vec2, tuning: &PigletTuning, dt: f32) {
        let delta = self.slot(boar, tuning.follow_distance) - self.pos;
        let dist = delta.length();
        if dist <= tuning.settle_distance || dist < DIST_EPSILON {
            return;
        }
        let speed = tuning.follow_speed.min(dist * 3.0);
        self.pos += delta / dist * speed * dt;
    }
}

/// A fresh litter, evenly spread around the boar
pub fn litter(boar: Vec2, tuning: &PigletTuning, rng: &mut SimRng) -> Vec<Piglet> {
    (0..tuning.count)
        .map(|i| Piglet {
            id: i as u32,
            pos: boar + Vec2::new(rng.spread(40.0), rng.spread(40.0)),
            offset_angle: i as f32 / tuning.count as f32 * std::f32::consts::TAU,
        })
        .collect()
}
