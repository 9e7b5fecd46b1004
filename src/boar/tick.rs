//! Per-frame update for Wild Boar Life
//!
//! `tick` mutates the owned state in place; it is observably the same as
//! the pure `(state, input, dt) -> state'` form. It does nothing unless the
//! phase is `Playing`, and the death check is the very last step.

use glam::Vec2;

use super::consts::*;
use super::hunter::spawn_hunter;
use super::piglet::litter;
use super::state::{BoarInput, GameState, next_spawn_interval};
use super::world::TileKind;
use crate::sim::{Facing, Rgb};
use crate::smoothing_factor;

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut GameState, input: &BoarInput, dt: f32) {
    if !state.phase.is_playing() {
        return;
    }
    let dt = dt.max(0.0);
    state.time_alive += dt;

    advance_clock(state, dt);
    let tile = move_boar(state, input, dt);
    update_stamina(state, input, dt);
    update_needs(state, tile, dt);
    update_foods(state, dt);
    update_hunters(state, dt);
    spawn_piglets(state);
    update_piglets(state, dt);
    update_effects(state, dt);
    update_camera(state, dt);

    if state.stats.health.is_empty() && state.phase.kill() {
        log::info!(
            "The boar has fallen on day {} with score {:.0}",
            state.clock.day,
            state.stats.score
        );
    }
}

fn advance_clock(state: &mut GameState, dt: f32) {
    if state.clock.advance(dt) {
        state.stats.age = state.clock.day;
        let label = format!("Day {}!", state.clock.day);
        let pos = state.boar.pos - Vec2::new(0.0, 40.0);
        state.float_text(pos, label, Rgb::GOLD);
        log::info!("Day {} begins", state.clock.day);
    }
}

/// Steer and integrate the boar. Returns the tile kind that was sampled.
fn move_boar(state: &mut GameState, input: &BoarInput, dt: f32) -> TileKind {
    let boar = &mut state.boar;

    let mut dir = Vec2::ZERO;
    if input.left {
        dir.x -= 1.0;
        boar.facing = Facing::Left;
    }
    if input.right {
        dir.x += 1.0;
        boar.facing = Facing::Right;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if dir.x != 0.0 && dir.y != 0.0 {
        dir *= DIAGONAL;
    }

    boar.sprinting = input.sprint && state.stats.stamina.value() > SPRINT_MIN_STAMINA;
    let speed = if boar.sprinting {
        BOAR_SPEED * SPRINT_MULTIPLIER
    } else {
        BOAR_SPEED
    };
    boar.vel = dir * speed;

    // Sample where the boar is trying to go; positions are clamped before any lookup
    let candidate = state.tiles.clamp(boar.pos + boar.vel * dt);
    let tile = state.tiles.at(candidate).kind;

    if tile.is_passable() {
        boar.pos = state
            .tiles
            .clamp(boar.pos + boar.vel * dt * tile.speed_factor());
    }

    if boar.muddy {
        boar.muddy_timer -= dt;
        if boar.muddy_timer <= 0.0 {
            boar.muddy = false;
            boar.muddy_timer = 0.0;
        }
    }
    // Wallowing keeps the coat fresh
    if tile == TileKind::Mud {
        boar.muddy = true;
        boar.muddy_timer = MUDDY_DURATION;
    }

    tile
}

fn update_stamina(state: &mut GameState, input: &BoarInput, dt: f32) {
    let stamina = &mut state.stats.stamina;
    if state.boar.sprinting && input.is_moving() {
        stamina.drain(SPRINT_DRAIN, dt);
    } else {
        stamina.restore(STAMINA_REGEN, dt);
    }
}

fn update_needs(state: &mut GameState, tile: TileKind, dt: f32) {
    let stats = &mut state.stats;

    stats.hunger.drain(HUNGER_RATE, dt);
    if tile.is_water() {
        // Drinking outpaces thirst, so the bar only fills while in water
        stats.thirst.restore(WATER_RESTORE_RATE, dt);
        if stats.thirst.value() > DRINK_SNAP {
            stats.thirst.set(MAX_STAT);
        }
    } else {
        stats.thirst.drain(THIRST_RATE, dt);
    }

    if stats.hunger.is_empty() || stats.thirst.is_empty() {
        stats.health.drain(STARVE_DAMAGE, dt);
    } else if stats.hunger.value() > WELL_FED && stats.thirst.value() > WELL_FED {
        stats.health.restore(HEALTH_REGEN, dt);
    }
}

fn update_foods(state: &mut GameState, dt: f32) {
    let boar = state.boar.pos;
    let mut eaten = Vec::new();

    for food in &mut state.foods {
        if !food.visible {
            food.tick_respawn(dt);
            continue;
        }
        if food.pos.distance(boar) < EAT_RANGE {
            eaten.push((food.pos, food.kind, food.value));
            food.consume(FOOD_RESPAWN_MIN + state.rng.unit() * FOOD_RESPAWN_JITTER);
        }
    }

    for (pos, kind, value) in eaten {
        state.stats.hunger.add(value);
        state.stats.add_score(value);
        state.float_text(pos - Vec2::new(0.0, 20.0), kind.label(), Rgb::GOLD);
        log::debug!("ate {:?} (+{})", kind, value);
    }
}

fn update_hunters(state: &mut GameState, dt: f32) {
    let multiplier = state.score_multiplier();
    state.stats.add_score(dt * TIME_SCORE_RATE * multiplier);

    state.hunter_spawn_timer -= dt;
    if state.hunter_spawn_timer <= 0.0 {
        state.hunter_spawn_timer = next_spawn_interval(&mut state.rng, &state.tuning);
        let world_min = Vec2::splat(WORLD_MARGIN);
        let world_max = state.tiles.world_size() - Vec2::splat(WORLD_MARGIN);
        let spawned = spawn_hunter(
            &mut state.hunters,
            &mut state.rng,
            &state.tuning,
            state.boar.pos,
            state.clock.day,
            world_min,
            world_max,
        );
        if let Some(id) = spawned {
            log::info!("Hunter {} spawned on day {}", id, state.clock.day);
            state.announce("A hunter approaches!", EVENT_MESSAGE_TIME);
        }
    }

    let report = state.hunters.update(
        state.boar.pos,
        &mut state.stats.health,
        &state.tuning,
        dt,
    );

    if report.despawned > 0 {
        log::debug!("{} hunter(s) lost the trail", report.despawned);
    }

    state.hurt_text_cooldown = (state.hurt_text_cooldown - dt).max(0.0);
    if report.in_melee && state.hurt_text_cooldown <= 0.0 && dt > 0.0 {
        state.hurt_text_cooldown = HURT_TEXT_INTERVAL;
        let pos = state.boar.pos - Vec2::new(0.0, 40.0);
        state.float_text(pos, "OUCH!", Rgb::DANGER);
    }
}

fn spawn_piglets(state: &mut GameState) {
    let tuning = &state.tuning.piglets;
    if state.piglets_spawned
        || state.clock.day < tuning.spawn_day
        || state.stats.health.value() <= tuning.min_health
    {
        return;
    }

    state.piglets_spawned = true;
    state.piglets = litter(state.boar.pos, tuning, &mut state.rng);

    let pos = state.boar.pos - Vec2::new(0.0, 60.0);
    state.float_text(pos, "Piglets!", Rgb(0xffccaa));
    let text = format!(
        "Your piglets have arrived! Score x{:.1}",
        state.score_multiplier()
    );
    state.announce(text, PIGLET_MESSAGE_TIME);
    log::info!("{} piglets joined on day {}", state.piglets.len(), state.clock.day);
}

fn update_piglets(state: &mut GameState, dt: f32) {
    let boar = state.boar.pos;
    for piglet in &mut state.piglets {
        piglet.follow(boar, &state.tuning.piglets, dt);
        piglet.pos = state.tiles.clamp(piglet.pos);
    }
}

fn update_effects(state: &mut GameState, dt: f32) {
    state.effects.advance(dt);
    let expired = match &mut state.last_event {
        Some(msg) => dt > 0.0 && !msg.advance(dt),
        None => false,
    };
    if expired {
        state.last_event = None;
    }
}

fn update_camera(state: &mut GameState, dt: f32) {
    let target = state.camera_target();
    state.camera += (target - state.camera) * smoothing_factor(CAMERA_SMOOTHING, dt);
    let view = Vec2::new(VIEW_W, VIEW_H);
    let max = (state.tiles.world_size() - view).max(Vec2::ZERO);
    state.camera = crate::clamp_vec(state.camera, Vec2::ZERO, max);
}
