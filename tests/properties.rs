//! Property tests for both simulations

use glam::Vec2;
use proptest::prelude::*;

use wildlight::boar::consts::{WORLD_TILES_H, WORLD_TILES_W};
use wildlight::boar::{self, BoarInput, HunterPool, TileKind, TileMap};
use wildlight::consts::MAX_STAT;
use wildlight::shadow::{self, Light, LightKind, Platform, ShadowInput, Tone, ToneState};
use wildlight::sim::{InputFrame, Phase, Rgb, Stat};
use wildlight::tuning::{HunterKind, Tuning};

const DT: f32 = 1.0 / 60.0;

fn boar_input() -> impl Strategy<Value = BoarInput> {
    any::<(bool, bool, bool, bool, bool)>().prop_map(|(up, down, left, right, sprint)| BoarInput {
        up,
        down,
        left,
        right,
        sprint,
    })
}

fn shadow_input() -> impl Strategy<Value = ShadowInput> {
    any::<(bool, bool, bool, bool, bool, bool, bool, bool)>().prop_map(
        |(left, right, up, low, high, whisper, silence, grab)| ShadowInput {
            left,
            right,
            up,
            low,
            high,
            whisper,
            silence,
            grab,
        },
    )
}

fn frame_dt() -> impl Strategy<Value = f32> {
    0.0f32..0.1
}

fn tone() -> impl Strategy<Value = Option<Tone>> {
    prop_oneof![
        Just(None),
        Just(Some(Tone::Low)),
        Just(Some(Tone::High)),
        Just(Some(Tone::Whisper)),
    ]
}

/// Grass everywhere, no food, no hunter due for hours
fn quiet_meadow(seed: u64) -> boar::GameState {
    let mut tuning = Tuning::default();
    tuning.spawn.interval_min = 10_000.0;
    let tiles = TileMap::filled(WORLD_TILES_W, WORLD_TILES_H, TileKind::Grass);
    let mut state = boar::GameState::from_parts(seed, tiles, Vec::new(), tuning);
    state.start();
    state
}

fn started_boar(seed: u64) -> boar::GameState {
    let mut state = boar::GameState::new(seed);
    state.start();
    state
}

fn started_shadow(seed: u64) -> shadow::GameState {
    let mut state = shadow::GameState::new(seed);
    state.start();
    state
}

/// Feed a key script through the shadow tick with proper edge history
fn run_shadow(state: &mut shadow::GameState, steps: &[(ShadowInput, f32)]) -> ShadowInput {
    let mut prev = ShadowInput::default();
    for &(keys, dt) in steps {
        shadow::tick(state, &InputFrame::new(keys, prev), dt);
        prev = keys;
    }
    prev
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_boar_stats_stay_in_range(
        seed in any::<u64>(),
        steps in prop::collection::vec((boar_input(), frame_dt()), 1..240),
    ) {
        let mut state = started_boar(seed);
        for (input, dt) in steps {
            boar::tick(&mut state, &input, dt);
            for stat in [state.stats.health, state.stats.hunger, state.stats.thirst, state.stats.stamina] {
                prop_assert!((0.0..=MAX_STAT).contains(&stat.value()));
            }
            prop_assert!(state.stats.score >= 0.0);
        }
    }

    #[test]
    fn prop_boar_hunters_never_exceed_pool(
        seed in any::<u64>(),
        steps in prop::collection::vec((boar_input(), frame_dt()), 1..120),
    ) {
        let mut state = started_boar(seed);
        state.hunter_spawn_timer = 0.0;
        state.tuning.spawn.interval_min = 0.05;
        state.tuning.spawn.interval_jitter = 0.0;
        let capacity = state.hunters.capacity();
        for (input, dt) in steps {
            boar::tick(&mut state, &input, dt);
            prop_assert!(state.hunters.active_count() <= capacity);
        }
    }

    #[test]
    fn prop_boar_death_is_final(
        seed in any::<u64>(),
        steps in prop::collection::vec((boar_input(), frame_dt()), 1..60),
    ) {
        let mut state = quiet_meadow(seed);
        state.stats.health.set(0.0);
        boar::tick(&mut state, &BoarInput::default(), DT);
        prop_assert_eq!(state.phase, Phase::Dead);

        let frozen = state.clone();
        for (input, dt) in steps {
            boar::tick(&mut state, &input, dt);
        }
        prop_assert_eq!(state, frozen);
    }

    #[test]
    fn prop_boar_idle_zero_dt_changes_nothing(
        seed in any::<u64>(),
        steps in prop::collection::vec((boar_input(), frame_dt()), 0..120),
    ) {
        let mut state = quiet_meadow(seed);
        for (input, dt) in steps {
            boar::tick(&mut state, &input, dt);
        }
        // Velocity and sprint flags follow the keys, so let go of them first
        boar::tick(&mut state, &BoarInput::default(), DT);

        let before = state.clone();
        boar::tick(&mut state, &BoarInput::default(), 0.0);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn prop_boar_same_seed_same_run(
        seed in any::<u64>(),
        steps in prop::collection::vec((boar_input(), frame_dt()), 1..120),
    ) {
        let mut a = started_boar(seed);
        let mut b = a.clone();
        for &(input, dt) in &steps {
            boar::tick(&mut a, &input, dt);
        }
        for &(input, dt) in &steps {
            boar::tick(&mut b, &input, dt);
        }
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_hunter_ignores_boar_beyond_aggro(
        angle in 0.0f32..std::f32::consts::TAU,
        dist in 310.0f32..580.0,
        dt in 0.001f32..0.1,
    ) {
        let tuning = Tuning::default();
        let mut pool = HunterPool::with_capacity(4);
        let boar = Vec2::new(900.0, 700.0);
        let at = boar + Vec2::from_angle(angle) * dist;
        pool.insert(HunterKind::Poacher, at, tuning.poacher.speed_min);

        let mut health = Stat::full();
        pool.update(boar, &mut health, &tuning, dt);
        let hunter = pool.iter().next();
        prop_assert!(hunter.is_some());
        prop_assert_eq!(hunter.map(|h| h.pos), Some(at));
        prop_assert_eq!(health.value(), MAX_STAT);
    }

    #[test]
    fn prop_hunter_closes_in_within_aggro(
        angle in 0.0f32..std::f32::consts::TAU,
        dist in 60.0f32..290.0,
        dt in 0.001f32..0.1,
    ) {
        let tuning = Tuning::default();
        let mut pool = HunterPool::with_capacity(4);
        let boar = Vec2::new(900.0, 700.0);
        pool.insert(HunterKind::Poacher, boar + Vec2::from_angle(angle) * dist, tuning.poacher.speed_min);

        let mut health = Stat::full();
        pool.update(boar, &mut health, &tuning, dt);
        let after = pool.iter().next().map(|h| h.pos.distance(boar));
        prop_assert!(after.is_some_and(|d| d < dist));
    }

    #[test]
    fn prop_shadow_same_seed_same_run(
        seed in any::<u64>(),
        steps in prop::collection::vec((shadow_input(), frame_dt()), 1..180),
    ) {
        let mut a = started_shadow(seed);
        let mut b = a.clone();
        run_shadow(&mut a, &steps);
        run_shadow(&mut b, &steps);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_shadow_idle_zero_dt_changes_nothing(
        seed in any::<u64>(),
        steps in prop::collection::vec((shadow_input(), frame_dt()), 0..120),
    ) {
        let mut state = started_shadow(seed);
        let prev = run_shadow(&mut state, &steps);
        // Release every key so held tones and velocities settle
        shadow::tick(&mut state, &InputFrame::new(ShadowInput::default(), prev), DT);

        let before = state.clone();
        shadow::tick(&mut state, &InputFrame::steady(ShadowInput::default()), 0.0);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn prop_shadow_complete_is_final(
        seed in any::<u64>(),
        steps in prop::collection::vec((shadow_input(), frame_dt()), 1..60),
    ) {
        let mut state = started_shadow(seed);
        let goal = state.level.goal().copied();
        prop_assert!(goal.is_some());
        if let Some(goal) = goal {
            state.player.body.pos = Vec2::new(goal.x + goal.w / 2.0, goal.y);
        }
        shadow::tick(&mut state, &InputFrame::steady(ShadowInput::default()), DT);
        prop_assert_eq!(state.phase, Phase::Complete);

        let frozen = state.clone();
        run_shadow(&mut state, &steps);
        prop_assert_eq!(state, frozen);
    }

    #[test]
    fn prop_no_voice_no_shadows(
        echo in tone(),
        echo_timer in 0.0f32..1.0,
        crystallized in any::<bool>(),
        light_x in 0.0f32..2600.0,
        light_y in 0.0f32..500.0,
    ) {
        let tones = ToneState {
            echo,
            echo_timer,
            crystallized,
            ..Default::default()
        };
        let mut meadow = shadow::Level::meadow();
        for light in &mut meadow.lights {
            light.pos = Vec2::new(light_x, light_y);
        }
        prop_assert!(shadow::project(&meadow, &tones).is_empty());
        prop_assert!(shadow::project(&shadow::Level::chamber(), &tones).is_empty());
    }

    #[test]
    fn prop_projection_is_pure(
        current in tone(),
        silence in any::<bool>(),
        crystallized in any::<bool>(),
        sway_phase in 0.0f32..20.0,
        light in (0.0f32..3000.0, -200.0f32..600.0),
        plat in (0.0f32..3000.0, 0.0f32..520.0, 1.0f32..300.0),
    ) {
        let tones = ToneState {
            current,
            silence,
            crystallized,
            sway_phase,
            ..Default::default()
        };
        let lights = [Light {
            id: 1,
            kind: LightKind::Candle,
            pos: Vec2::new(light.0, light.1),
            radius: 200.0,
            intensity: 1.0,
            color: Rgb::GOLD,
            held: false,
        }];
        let platforms = [Platform::solid(plat.0, plat.1, plat.2, 14.0)];

        let first = shadow::project_floor(&lights, &platforms, &tones, 530.0);
        let second = shadow::project_floor(&lights, &platforms, &tones, 530.0);
        prop_assert_eq!(&first, &second);
        for s in &first {
            prop_assert!(s.rect.w.is_finite() && s.rect.w >= 5.0);
            prop_assert_eq!(s.crystallized, tones.crystallized);
        }
    }
}
