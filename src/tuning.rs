//! Data-driven game balance
//!
//! Hunter presets, spawn cadence and companion parameters. `Tuning::default()`
//! is the shipped balance; a JSON override can be loaded with
//! [`Tuning::from_json`], which validates before returning.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Hunter archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HunterKind {
    /// Slow, short-sighted, hits hard
    Poacher,
    /// Faster with a longer sight line; shows up later in a run
    Tracker,
}

impl HunterKind {
    pub const ALL: [HunterKind; 2] = [HunterKind::Poacher, HunterKind::Tracker];

    pub fn as_str(&self) -> &'static str {
        match self {
            HunterKind::Poacher => "Poacher",
            HunterKind::Tracker => "Tracker",
        }
    }
}

/// Stat preset for one hunter archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HunterTemplate {
    /// Movement speed is drawn from [speed_min, speed_max) at spawn (px/s)
    pub speed_min: f32,
    pub speed_max: f32,
    /// Starts chasing inside this distance
    pub aggro_radius: f32,
    /// Deals damage inside this distance
    pub melee_radius: f32,
    /// Continuous damage while in melee range
    pub damage_per_sec: f32,
    /// Leaves the map beyond this distance
    pub despawn_distance: f32,
    /// First day this archetype may spawn
    pub min_day: u32,
}

impl HunterTemplate {
    fn validate(&self, kind: HunterKind) -> Result<()> {
        let fail = |reason: &str| {
            Err(Error::InvalidTuning {
                kind: kind.as_str().to_string(),
                reason: reason.to_string(),
            })
        };
        if !(self.speed_min > 0.0) || self.speed_max < self.speed_min {
            return fail("speed range must be positive and ordered");
        }
        if !(self.melee_radius > 0.0) {
            return fail("melee radius must be positive");
        }
        if self.aggro_radius < self.melee_radius {
            return fail("aggro radius must cover melee radius");
        }
        if self.despawn_distance <= self.aggro_radius {
            return fail("despawn distance must exceed aggro radius");
        }
        if self.damage_per_sec < 0.0 {
            return fail("damage must not be negative");
        }
        Ok(())
    }
}

/// When and where hunters appear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Seconds between spawns: interval_min + U[0, interval_jitter)
    pub interval_min: f32,
    pub interval_jitter: f32,
    /// Spawn ring around the boar
    pub ring_min: f32,
    pub ring_max: f32,
    /// Pool capacity (simultaneous hunters)
    pub max_hunters: usize,
    /// Chance a spawn is a tracker once trackers are unlocked
    pub tracker_chance: f32,
}

/// Piglet litter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PigletTuning {
    pub spawn_day: u32,
    /// Health must be above this on the spawn day
    pub min_health: f32,
    pub count: usize,
    pub follow_speed: f32,
    /// Desired gap behind the boar
    pub follow_distance: f32,
    /// Piglets stop shuffling inside this distance of their slot
    pub settle_distance: f32,
    /// Extra time-score multiplier per piglet
    pub score_bonus: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub poacher: HunterTemplate,
    pub tracker: HunterTemplate,
    pub spawn: SpawnTuning,
    pub piglets: PigletTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            poacher: HunterTemplate {
                speed_min: 70.0,
                speed_max: 110.0,
                aggro_radius: 300.0,
                melee_radius: 36.0,
                damage_per_sec: 25.0,
                despawn_distance: 600.0,
                min_day: 1,
            },
            tracker: HunterTemplate {
                speed_min: 95.0,
                speed_max: 125.0,
                aggro_radius: 380.0,
                melee_radius: 36.0,
                damage_per_sec: 18.0,
                despawn_distance: 700.0,
                min_day: 4,
            },
            spawn: SpawnTuning {
                interval_min: 40.0,
                interval_jitter: 20.0,
                ring_min: 450.0,
                ring_max: 550.0,
                max_hunters: 6,
                tracker_chance: 0.35,
            },
            piglets: PigletTuning {
                spawn_day: 3,
                min_health: 30.0,
                count: 3,
                follow_speed: 130.0,
                follow_distance: 60.0,
                settle_distance: 8.0,
                score_bonus: 0.5,
            },
        }
    }
}

impl Tuning {
    /// Preset lookup
    pub fn template(&self, kind: HunterKind) -> &HunterTemplate {
        match kind {
            HunterKind::Poacher => &self.poacher,
            HunterKind::Tracker => &self.tracker,
        }
    }

    /// Check every preset and the spawn/piglet parameters
    pub fn validate(&self) -> Result<()> {
        for kind in HunterKind::ALL {
            self.template(kind).validate(kind)?;
        }
        let invalid = |kind: &str, reason: &str| Error::InvalidTuning {
            kind: kind.to_string(),
            reason: reason.to_string(),
        };
        if !(self.spawn.interval_min > 0.0) || self.spawn.interval_jitter < 0.0 {
            return Err(invalid("spawn", "interval must be positive"));
        }
        if self.spawn.ring_max < self.spawn.ring_min || self.spawn.ring_min <= 0.0 {
            return Err(invalid("spawn", "spawn ring must be positive and ordered"));
        }
        if !(0.0..=1.0).contains(&self.spawn.tracker_chance) {
            return Err(invalid("spawn", "tracker chance must be a probability"));
        }
        if self.piglets.follow_speed <= 0.0 || self.piglets.settle_distance < 0.0 {
            return Err(invalid("piglets", "follow parameters must be positive"));
        }
        Ok(())
    }

    /// Parse and validate a JSON balance file
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning override");
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let mut tuning = Tuning::default();
        tuning.tracker.speed_max = 10.0;
        let err = tuning.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidTuning { ref kind, .. } if kind == "Tracker"));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut tuning = Tuning::default();
        tuning.poacher.melee_radius = 0.0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        let parsed = Tuning::from_json(&json).unwrap();
        assert_eq!(parsed, Tuning::default());

        let broken = json.replace("\"ring_min\":450.0", "\"ring_min\":-1.0");
        assert!(Tuning::from_json(&broken).is_err());
        assert!(matches!(Tuning::from_json("{"), Err(Error::Json(_))));
    }
}
