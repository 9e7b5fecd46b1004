//! Hunters: pooled pursuit agents
//!
//! Straight-line seek only, no pathfinding. Damage is continuous
//! (`damage_per_sec * dt`) for as long as a hunter stays in melee range.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::sim::{SimRng, Stat};
use crate::tuning::{HunterKind, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HunterState {
    /// Standing watch, boar out of sight
    #[default]
    Idle,
    /// Closing in on the boar
    Chasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hunter {
    pub id: u32,
    pub kind: HunterKind,
    pub pos: Vec2,
    /// px/s, fixed at spawn
    pub speed: f32,
    pub state: HunterState,
    /// Seconds of lingering alertness (drives the "!" marker)
    pub alert_timer: f32,
}

/// Outcome of one hunter pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HunterReport {
    pub despawned: u32,
    pub in_melee: bool,
}

/// Fixed-capacity hunter slots. `None` is an inactive slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HunterPool {
    slots: Vec<Option<Hunter>>,
    next_id: u32,
}

impl HunterPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            next_id: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hunter> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hunter> {
        self.slots.iter_mut().flatten()
    }

    /// Place a hunter in the first free slot. Returns its id, or None when full.
    pub fn insert(&mut self, kind: HunterKind, pos: Vec2, speed: f32) -> Option<u32> {
        let slot = self.slots.iter_mut().find(|s| s.is_none())?;
        let id = self.next_id;
        self.next_id += 1;
        *slot = Some(Hunter {
            id,
            kind,
            pos,
            speed,
            state: HunterState::Idle,
            alert_timer: 0.0,
        });
        Some(id)
    }

    /// Advance every active hunter relative to the boar at `target`
    ///
    /// Despawn, chase and melee checks all use the distance measured before
    /// the hunter moves this tick.
    pub fn update(&mut self, target: Vec2, health: &mut Stat, tuning: &Tuning, dt: f32) -> HunterReport {
        let mut report = HunterReport::default();

        for slot in &mut self.slots {
            let Some(hunter) = slot else { continue };
            let template = tuning.template(hunter.kind);
            let dist = hunter.pos.distance(target);

            if dist > template.despawn_distance {
                log::debug!("hunter {} lost the trail ({:.0}px)", hunter.id, dist);
                *slot = None;
                report.despawned += 1;
                continue;
            }

            if dist < template.aggro_radius {
                hunter.state = HunterState::Chasing;
                hunter.pos = crate::seek(hunter.pos, target, hunter.speed * dt);
                hunter.alert_timer = HUNTER_ALERT_TIME;
            } else {
                hunter.state = HunterState::Idle;
                hunter.alert_timer = (hunter.alert_timer - dt).max(0.0);
            }

            if dist < template.melee_radius {
                health.drain(template.damage_per_sec, dt);
                report.in_melee = true;
            }
        }

        report
    }
}

/// Try to spawn a hunter somewhere on the spawn ring around `boar`
///
/// Candidates are clamped to the world; a candidate that ends up closer
/// than the inner ring radius after clamping (boar near a map edge) is
/// rejected and another angle is tried.
pub fn spawn_hunter(
    pool: &mut HunterPool,
    rng: &mut SimRng,
    tuning: &Tuning,
    boar: Vec2,
    day: u32,
    world_min: Vec2,
    world_max: Vec2,
) -> Option<u32> {
    const ATTEMPTS: usize = 8;

    if pool.active_count() >= pool.capacity() {
        return None;
    }

    // Only archetypes whose first day has come may appear
    let poacher = day >= tuning.poacher.min_day;
    let tracker = day >= tuning.tracker.min_day;
    let kind = match (poacher, tracker) {
        (false, false) => return None,
        (false, true) => HunterKind::Tracker,
        (true, false) => HunterKind::Poacher,
        (true, true) if rng.chance(tuning.spawn.tracker_chance) => HunterKind::Tracker,
        (true, true) => HunterKind::Poacher,
    };
    let template = tuning.template(kind);

    for _ in 0..ATTEMPTS {
        let angle = rng.unit() * std::f32::consts::TAU;
        let radius = rng.range(tuning.spawn.ring_min, tuning.spawn.ring_max);
        let pos = crate::clamp_vec(
            boar + Vec2::new(angle.cos(), angle.sin()) * radius,
            world_min,
            world_max,
        );
        if pos.distance(boar) < tuning.spawn.ring_min {
            continue;
        }
        let speed = rng.range(template.speed_min, template.speed_max);
        return pool.insert(kind, pos, speed);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with(pos: Vec2) -> HunterPool {
        let mut pool = HunterPool::with_capacity(4);
        pool.insert(HunterKind::Poacher, pos, 100.0);
        pool
    }

    #[test]
    fn test_out_of_aggro_does_not_move() {
        let tuning = Tuning::default();
        let start = Vec2::new(350.0, 0.0);
        let mut pool = pool_with(start);
        let mut health = Stat::full();

        pool.update(Vec2::ZERO, &mut health, &tuning, 0.5);
        let h = pool.iter().next().unwrap();
        assert_eq!(h.pos, start);
        assert_eq!(h.state, HunterState::Idle);
    }

    #[test]
    fn test_in_aggro_moves_strictly_closer() {
        let tuning = Tuning::default();
        let mut pool = pool_with(Vec2::new(200.0, 150.0));
        let mut health = Stat::full();
        let before = Vec2::new(200.0, 150.0).length();

        pool.update(Vec2::ZERO, &mut health, &tuning, 1.0 / 60.0);
        let h = pool.iter().next().unwrap();
        assert!(h.pos.length() < before);
        assert_eq!(h.state, HunterState::Chasing);
        assert_eq!(h.alert_timer, HUNTER_ALERT_TIME);
    }

    #[test]
    fn test_melee_damage_is_continuous() {
        let tuning = Tuning::default();
        let mut health = Stat::full();
        // Speed 0 keeps the hunter at exactly 20px
        let mut pool = HunterPool::with_capacity(1);
        pool.insert(HunterKind::Poacher, Vec2::new(20.0, 0.0), 0.0);

        for _ in 0..60 {
            pool.update(Vec2::ZERO, &mut health, &tuning, 1.0 / 60.0);
        }
        let expected = MAX_STAT - tuning.poacher.damage_per_sec;
        assert!((health.value() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_no_damage_outside_melee() {
        let tuning = Tuning::default();
        let mut health = Stat::full();
        let mut pool = HunterPool::with_capacity(1);
        pool.insert(HunterKind::Poacher, Vec2::new(50.0, 0.0), 0.0);

        let report = pool.update(Vec2::ZERO, &mut health, &tuning, 1.0);
        assert!(!report.in_melee);
        assert_eq!(health.value(), MAX_STAT);
    }

    #[test]
    fn test_despawn_frees_slot_for_reuse() {
        let tuning = Tuning::default();
        let mut pool = HunterPool::with_capacity(1);
        pool.insert(HunterKind::Poacher, Vec2::new(900.0, 0.0), 80.0);
        assert!(pool.insert(HunterKind::Poacher, Vec2::ZERO, 80.0).is_none());

        let mut health = Stat::full();
        let report = pool.update(Vec2::ZERO, &mut health, &tuning, 0.1);
        assert_eq!(report.despawned, 1);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.insert(HunterKind::Poacher, Vec2::ZERO, 80.0).is_some());
    }

    #[test]
    fn test_spawn_respects_ring_and_capacity() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(9);
        let mut pool = HunterPool::with_capacity(2);
        let boar = Vec2::new(960.0, 720.0);
        let (min, max) = (Vec2::splat(16.0), Vec2::new(1904.0, 1424.0));

        for _ in 0..5 {
            spawn_hunter(&mut pool, &mut rng, &tuning, boar, 1, min, max);
        }
        assert_eq!(pool.active_count(), 2);
        for h in pool.iter() {
            assert!(h.pos.distance(boar) >= tuning.spawn.ring_min);
            assert_eq!(h.kind, HunterKind::Poacher);
            assert!(h.speed >= tuning.poacher.speed_min && h.speed < tuning.poacher.speed_max);
        }
    }

    #[test]
    fn test_spawn_waits_for_min_day() {
        let mut tuning = Tuning::default();
        tuning.poacher.min_day = 5;
        tuning.tracker.min_day = 5;
        assert!(tuning.validate().is_ok());
        let mut rng = SimRng::new(9);
        let mut pool = HunterPool::with_capacity(4);
        let boar = Vec2::new(960.0, 720.0);
        let (min, max) = (Vec2::splat(16.0), Vec2::new(1904.0, 1424.0));

        assert_eq!(spawn_hunter(&mut pool, &mut rng, &tuning, boar, 1, min, max), None);
        assert_eq!(pool.active_count(), 0);
        assert!(spawn_hunter(&mut pool, &mut rng, &tuning, boar, 5, min, max).is_some());
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_spawn_skips_kinds_not_yet_due() {
        let mut tuning = Tuning::default();
        tuning.poacher.min_day = 5;
        tuning.tracker.min_day = 1;
        let mut rng = SimRng::new(3);
        let mut pool = HunterPool::with_capacity(4);
        let boar = Vec2::new(960.0, 720.0);
        let (min, max) = (Vec2::splat(16.0), Vec2::new(1904.0, 1424.0));

        for _ in 0..4 {
            spawn_hunter(&mut pool, &mut rng, &tuning, boar, 1, min, max);
        }
        assert_eq!(pool.active_count(), 4);
        assert!(pool.iter().all(|h| h.kind == HunterKind::Tracker));
    }
}
