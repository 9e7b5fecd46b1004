//! Shadow platformer tick
//!
//! Order matters: tones decide the shadows, shadows are solid during the
//! collision pass, and the goal check only ever sees resolved positions.

use glam::Vec2;

use super::consts::*;
use super::projector::project;
use super::state::{GameState, ShadowInput};
use crate::sim::{Facing, InputFrame, Particle, Rect, resolve, resting_on};
use crate::smoothing_factor;

/// Advance the platformer by `dt` seconds. A no-op outside `Phase::Playing`.
pub fn tick(state: &mut GameState, input: &InputFrame<ShadowInput>, dt: f32) {
    if !state.phase.is_playing() {
        return;
    }
    let dt = dt.max(0.0);
    let keys = input.now;

    let feet = state.player.pos();
    state.tones.update(&keys, feet, dt, &mut state.effects);
    state.shadows = project(&state.level, &state.tones);

    move_player(state, &keys, dt);
    respawn_if_fallen(state);
    handle_grab(state, input);
    carry_light(state);

    emit_tone_particles(state, dt);
    state.effects.advance(dt);
    state.player.glow_pulse = (state.player.glow_pulse + GLOW_RATE * dt).rem_euclid(std::f32::consts::TAU);

    update_camera(state, dt);
    advance_tutorial(state, input);
    check_goal(state);
}

fn move_player(state: &mut GameState, keys: &ShadowInput, dt: f32) {
    let player = &mut state.player;
    let body = &mut player.body;

    let mut dir = 0.0;
    if keys.left {
        dir = -1.0;
        player.facing = Facing::Left;
    }
    if keys.right {
        dir = 1.0;
        player.facing = Facing::Right;
    }
    body.vel.x = dir * RUN_SPEED;

    if keys.up && body.grounded {
        body.vel.y = JUMP_VELOCITY;
        body.grounded = false;
    }

    // Window sills are not solid
    let solids: Vec<Rect> = state
        .level
        .platforms
        .iter()
        .filter(|p| !p.window)
        .map(|p| p.rect)
        .collect();
    let shadows: Vec<Rect> = state.shadows.iter().map(|s| s.rect).collect();

    let half_w = body.size.x / 2.0;
    let world_w = state.level.world_w;
    let steps = ((dt / PHYSICS_STEP).ceil() as u32).clamp(1, MAX_SUBSTEPS);
    let h = dt / steps as f32;

    for _ in 0..steps {
        body.vel.y += GRAVITY * h;
        body.pos += body.vel * h;
        body.pos.x = body.pos.x.clamp(half_w, world_w - half_w);

        body.grounded = false;
        resolve(body, &solids);
        resolve(body, &shadows);
        if !body.grounded && resting_on(body, solids.iter().chain(&shadows)) {
            body.grounded = true;
        }
    }
}

fn respawn_if_fallen(state: &mut GameState) {
    let ground = state.level.ground_y;
    let body = &mut state.player.body;
    if body.pos.y > ground + FALL_OUT_DEPTH {
        log::debug!("player fell out at x={:.0}, respawning on the ground", body.pos.x);
        body.pos.y = ground - 2.0;
        body.vel.y = 0.0;
    }
}

/// E picks up the nearest candle in reach, or drops the carried one
fn handle_grab(state: &mut GameState, input: &InputFrame<ShadowInput>) {
    if !input.pressed(|k| k.grab) {
        return;
    }
    let player = &mut state.player;
    match player.holding.take() {
        Some(id) => {
            for light in state.level.lights.iter_mut().filter(|l| l.id == id) {
                light.held = false;
            }
            log::debug!("dropped light {id}");
        }
        None => {
            let hand = player.pos() - Vec2::new(0.0, GRAB_HEIGHT);
            if let Some(light) = state
                .level
                .lights
                .iter_mut()
                .find(|l| l.can_carry() && l.pos.distance(hand) < GRAB_RANGE)
            {
                light.held = true;
                player.holding = Some(light.id);
                log::debug!("picked up light {}", light.id);
            }
        }
    }
}

fn carry_light(state: &mut GameState) {
    let Some(id) = state.player.holding else {
        return;
    };
    let at = state.player.pos()
        + Vec2::new(state.player.facing.sign() * HOLD_OFFSET_X, -HOLD_OFFSET_Y);
    for light in state.level.lights.iter_mut().filter(|l| l.held && l.id == id) {
        light.pos = at;
    }
}

fn emit_tone_particles(state: &mut GameState, dt: f32) {
    if dt <= 0.0 || !state.ambient_particles {
        return;
    }
    let Some(voice) = state.tones.active_voice() else {
        return;
    };
    if !state.rng.chance(smoothing_factor(TONE_PARTICLE_CHANCE, dt)) {
        return;
    }
    let p = state.player.pos();
    let rng = &mut state.rng;
    let particle = Particle {
        pos: Vec2::new(p.x + rng.spread(10.0), p.y - 10.0),
        vel: Vec2::new(rng.spread(60.0), -rng.unit() * 120.0),
        life: TONE_PARTICLE_LIFE,
        max_life: TONE_PARTICLE_LIFE,
        color: voice.color(),
        size: rng.range(2.0, 5.0),
        gravity: 0.0,
        text: None,
    };
    state.effects.spawn(particle);
}

fn update_camera(state: &mut GameState, dt: f32) {
    let p = state.player.pos();
    let target = Vec2::new(p.x - VIEW_W / 2.0, p.y - VIEW_H * CAMERA_ANCHOR_Y);
    let cam = &mut state.camera;
    cam.x += (target.x - cam.x) * smoothing_factor(CAMERA_SMOOTHING_X, dt);
    cam.y += (target.y - cam.y) * smoothing_factor(CAMERA_SMOOTHING_Y, dt);

    let max = Vec2::new(state.level.world_w - VIEW_W, state.level.world_h - VIEW_H).max(Vec2::ZERO);
    *cam = crate::clamp_vec(*cam, Vec2::ZERO, max);
}

/// Steps: 0 move, 1 jump, 2 grab, 3 tone, 4 climb onto a shadow, 5 done.
/// Several steps may complete on the same frame.
fn advance_tutorial(state: &mut GameState, input: &InputFrame<ShadowInput>) {
    let keys = input.now;
    let step = &mut state.tutorial_step;
    if *step == 0 && (keys.left || keys.right) {
        *step = 1;
    }
    if *step == 1 && keys.up {
        *step = 2;
    }
    if *step == 2 && input.pressed(|k| k.grab) {
        *step = 3;
    }
    if *step == 3 && state.tones.current.is_some() {
        *step = 4;
    }
    if *step == 4 && !state.shadows.is_empty() && state.player.pos().y < state.level.ground_y - 50.0 {
        *step = 5;
    }
}

fn check_goal(state: &mut GameState) {
    let Some(goal) = state.level.goal() else {
        return;
    };
    let p = state.player.pos();
    let on_goal = p.x > goal.x && p.x < goal.right() && (p.y - goal.y).abs() < GOAL_TOLERANCE;
    if on_goal && state.phase.complete() {
        log::info!("Level {} complete", state.level.number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::level::{Level, Light, LightKind, Platform, Projection};
    use crate::shadow::tone::Tone;
    use crate::sim::{Phase, Rgb};

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> InputFrame<ShadowInput> {
        InputFrame::steady(ShadowInput::default())
    }

    fn holding(keys: ShadowInput) -> InputFrame<ShadowInput> {
        InputFrame::steady(keys)
    }

    fn low() -> ShadowInput {
        ShadowInput {
            low: true,
            ..Default::default()
        }
    }

    fn started(mut state: GameState) -> GameState {
        state.start();
        state
    }

    /// Light at the origin, one platform at x 100..200 y 50, ground at 500.
    /// A low tone casts a shadow on x 1000..2000, top at y 476.
    fn lab() -> GameState {
        let level = Level {
            number: 1,
            ground_y: 500.0,
            world_w: 3000.0,
            world_h: 600.0,
            projection: Projection::Floor,
            spawn: Vec2::new(1500.0, 476.0),
            camera: Vec2::ZERO,
            tutorial_step: 5,
            lights: vec![Light {
                id: 1,
                kind: LightKind::Candle,
                pos: Vec2::ZERO,
                radius: 200.0,
                intensity: 1.0,
                color: Rgb::GOLD,
                held: false,
            }],
            platforms: vec![
                Platform::solid(0.0, 500.0, 3000.0, 80.0),
                Platform::solid(100.0, 50.0, 100.0, 14.0),
            ],
        };
        started(GameState::with_level(1, level))
    }

    #[test]
    fn test_not_playing_is_noop() {
        let mut state = GameState::new(1);
        let before = state.clone();
        tick(&mut state, &holding(low()), DT);
        assert_eq!(state, before);
    }

    #[test]
    fn test_falls_onto_ground_and_jumps() {
        let mut state = started(GameState::new(1));
        for _ in 0..30 {
            tick(&mut state, &idle(), DT);
        }
        assert!(state.player.body.grounded);
        assert_eq!(state.player.pos().y, 530.0);

        let jump = ShadowInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &holding(jump), DT);
        assert!(!state.player.body.grounded);
        assert!(state.player.pos().y < 530.0);
    }

    #[test]
    fn test_zero_dt_idle_tick_is_noop() {
        let mut state = started(GameState::new(1));
        for _ in 0..30 {
            tick(&mut state, &idle(), DT);
        }
        let before = state.clone();
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_shadow_holds_player_only_while_tone_rings() {
        let mut state = lab();
        for _ in 0..20 {
            tick(&mut state, &holding(low()), DT);
        }
        assert!(state.player.body.grounded);
        assert!((state.player.pos().y - 476.0).abs() < 1e-3);
        assert!(!state.shadows.is_empty());

        tick(&mut state, &idle(), DT);
        assert!(state.shadows.is_empty());
        assert!(!state.player.body.grounded);
        assert!(state.player.pos().y > 476.0);

        for _ in 0..30 {
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.player.pos().y, 500.0);
    }

    #[test]
    fn test_fall_out_respawns_on_ground() {
        let mut state = lab();
        state.player.body.pos.y = 750.0;
        state.player.body.vel.y = 400.0;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.player.pos().y, 498.0);
        assert_eq!(state.player.body.vel.y, 0.0);
    }

    #[test]
    fn test_grab_is_edge_triggered() {
        let mut state = started(GameState::new(1));
        state.player.body.pos = Vec2::new(320.0, 528.0);
        let grab = ShadowInput {
            grab: true,
            ..Default::default()
        };

        tick(&mut state, &InputFrame::new(grab, ShadowInput::default()), DT);
        assert_eq!(state.player.holding, Some(1));
        assert!(state.level.lights[0].held);

        // Held down: no toggle
        for _ in 0..10 {
            tick(&mut state, &holding(grab), DT);
        }
        assert_eq!(state.player.holding, Some(1));

        // Carried light follows the player
        let p = state.player.pos();
        assert_eq!(state.level.lights[0].pos, p + Vec2::new(22.0, -22.0));

        tick(&mut state, &idle(), DT);
        tick(&mut state, &InputFrame::new(grab, ShadowInput::default()), DT);
        assert_eq!(state.player.holding, None);
        assert!(!state.level.lights[0].held);
    }

    #[test]
    fn test_moon_cannot_be_grabbed() {
        let mut state = started(GameState::new(1));
        let moon = state.level.lights.iter().find(|l| l.kind == LightKind::Moon).unwrap().pos;
        state.player.body.pos = moon + Vec2::new(0.0, 14.0);
        let grab = ShadowInput {
            grab: true,
            ..Default::default()
        };
        tick(&mut state, &InputFrame::new(grab, ShadowInput::default()), DT);
        assert_eq!(state.player.holding, None);
    }

    #[test]
    fn test_goal_completes_level_and_freezes() {
        let mut state = started(GameState::new(1));
        state.player.body.pos = Vec2::new(2520.0, 80.0);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.phase, Phase::Complete);

        let before = state.clone();
        tick(&mut state, &holding(low()), DT);
        assert_eq!(state, before);
    }

    #[test]
    fn test_tutorial_progression() {
        let mut state = started(GameState::new(1));
        let right = ShadowInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &holding(right), DT);
        assert_eq!(state.tutorial_step, 1);

        let up = ShadowInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &holding(up), DT);
        assert_eq!(state.tutorial_step, 2);

        let grab = ShadowInput {
            grab: true,
            ..Default::default()
        };
        tick(&mut state, &InputFrame::new(grab, ShadowInput::default()), DT);
        assert_eq!(state.tutorial_step, 3);

        tick(&mut state, &holding(low()), DT);
        assert_eq!(state.tutorial_step, 4);
    }

    #[test]
    fn test_echo_ribs_on_window_level() {
        let mut state = started(GameState::with_level(3, Level::chamber()));
        let high = ShadowInput {
            high: true,
            ..Default::default()
        };

        tick(&mut state, &InputFrame::new(low(), ShadowInput::default()), 0.1);
        assert_eq!(state.shadows.len(), 11);

        let mut fired = false;
        for _ in 0..30 {
            tick(&mut state, &holding(high), 0.1);
            if state.tones.echo == Some(Tone::Low) {
                fired = true;
                break;
            }
        }
        assert!(fired);
        assert_eq!(state.shadows.len(), 22);
        assert_eq!(state.shadows.iter().filter(|s| s.echo).count(), 11);
    }

    #[test]
    fn test_particles_respect_toggle() {
        let mut state = lab();
        state.ambient_particles = false;
        for _ in 0..120 {
            tick(&mut state, &holding(low()), DT);
        }
        assert!(state.effects.particles.is_empty());

        state.ambient_particles = true;
        for _ in 0..120 {
            tick(&mut state, &holding(low()), DT);
        }
        assert!(!state.effects.particles.is_empty());
    }

    #[test]
    fn test_camera_stays_in_world() {
        let mut state = started(GameState::new(1));
        let right = ShadowInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut state, &holding(right), DT);
        }
        assert!(state.camera.x <= 2600.0 - VIEW_W + 1e-3);
        assert!(state.camera.y >= 0.0 && state.camera.y <= 20.0 + 1e-3);
    }
}
