//! HUD projection: UI-friendly view of the boar state
//!
//! Recomputed every frame for display; nothing here feeds back into the sim.

use serde::Serialize;

use super::state::GameState;
use crate::sim::Phase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoarHud {
    /// 0 - 100, rounded for the bars
    pub health: u8,
    pub hunger: u8,
    pub thirst: u8,
    pub stamina: u8,
    pub day: u32,
    pub time_of_day: &'static str,
    pub is_night: bool,
    pub score: u64,
    pub piglets: usize,
    pub hunters_nearby: usize,
    /// Current event banner, if any
    pub message: Option<String>,
    pub phase: Phase,
}

/// Coarse label for the day clock
pub fn time_of_day(progress: f32) -> &'static str {
    match progress {
        p if p < 0.05 => "Night",
        p if p < 0.15 => "Dawn",
        p if p < 0.45 => "Morning",
        p if p < 0.55 => "Afternoon",
        p if p <= 0.6 => "Dusk",
        _ => "Night",
    }
}

impl BoarHud {
    pub fn from_state(state: &GameState) -> Self {
        let pct = |v: f32| v.round().clamp(0.0, 100.0) as u8;
        let stats = &state.stats;
        Self {
            health: pct(stats.health.value()),
            hunger: pct(stats.hunger.value()),
            thirst: pct(stats.thirst.value()),
            stamina: pct(stats.stamina.value()),
            day: state.clock.day,
            time_of_day: time_of_day(state.clock.progress),
            is_night: state.clock.is_night,
            score: stats.score.floor() as u64,
            piglets: state.piglets.len(),
            hunters_nearby: state.hunters.active_count(),
            message: state.last_event.as_ref().map(|m| m.text.clone()),
            phase: state.phase,
        }
    }
}
