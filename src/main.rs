//! Wildlight entry point
//!
//! On the web this wires DOM events and `requestAnimationFrame` to a
//! `WebGame`. Natively it runs both simulations headless with scripted input
//! and prints their HUDs, which is handy for eyeballing balance changes.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use wildlight::web::{WebGame, init};

    /// Hand the frame to the page's renderer, if it registered one
    fn publish(game: &WebGame) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str("wildlightRender")) else {
            return;
        };
        let Ok(hook) = hook.dyn_into::<js_sys::Function>() else {
            return;
        };
        match game.snapshot() {
            Ok(json) => {
                let _ = hook.call1(&JsValue::NULL, &JsValue::from_str(&json));
            }
            Err(e) => log::warn!("snapshot failed: {e:?}"),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        init();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // <canvas id="canvas" data-game="shadow">
        let which = document
            .get_element_by_id("canvas")
            .and_then(|c| c.get_attribute("data-game"))
            .unwrap_or_else(|| "boar".to_string());

        let seed = js_sys::Date::now();
        let game = Rc::new(RefCell::new(WebGame::new(&which, seed)?));
        game.borrow_mut().start();

        setup_input_handlers(&window, game.clone());
        request_animation_frame(game);

        log::info!("Wildlight running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<WebGame>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().key_up(&event.code());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside, tab switch)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().blur();
                log::info!("Auto-paused (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resume();
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame(time);
            publish(&g);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> wildlight::Result<()> {
    env_logger::init();
    log::info!("Wildlight (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    // Optional balance file, e.g. `wildlight 7 tuning.json`
    let tuning = match std::env::args().nth(2) {
        Some(path) => {
            log::info!("Loading tuning from {path}");
            wildlight::tuning::Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => wildlight::tuning::Tuning::default(),
    };

    headless::boar(seed, tuning)?;
    headless::shadow(seed)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use wildlight::boar::{self, BoarInput};
    use wildlight::platform::MemoryStorage;
    use wildlight::runner::{GameLoop, Simulation};
    use wildlight::shadow::{self, ShadowInput};
    use wildlight::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    /// Wander in a slow square for up to ten in-game days
    pub fn boar(seed: u64, tuning: Tuning) -> wildlight::Result<()> {
        let state = boar::GameState::with_tuning(seed, tuning);
        let mut game = GameLoop::new(state, Box::new(MemoryStorage::new()));
        game.start();

        let legs = [
            BoarInput { right: true, ..Default::default() },
            BoarInput { down: true, ..Default::default() },
            BoarInput { left: true, ..Default::default() },
            BoarInput { up: true, ..Default::default() },
        ];
        let mut frame = 0u32;
        while game.state().phase.is_playing() && game.state().clock.day <= 10 {
            let input = legs[(frame / 240) as usize % legs.len()];
            game.step(input, DT);
            frame += 1;
            if frame % (60 * 30) == 0 {
                println!("{}", serde_json::to_string(&game.state().hud())?);
            }
        }

        let hud = game.state().hud();
        println!("boar finished: {}", serde_json::to_string(&hud)?);
        Ok(())
    }

    /// Walk right humming a low tone, jumping whenever grounded
    pub fn shadow(seed: u64) -> wildlight::Result<()> {
        let mut game = GameLoop::new(shadow::GameState::new(seed), Box::new(MemoryStorage::new()));
        game.start();

        let input = ShadowInput {
            right: true,
            up: true,
            low: true,
            ..Default::default()
        };
        for _ in 0..60 * 60 {
            game.step(input, DT);
            if !game.state().phase.is_playing() {
                break;
            }
        }

        let state = game.state();
        log::info!(
            "shadow stopped at x={:.0} with {} shadows",
            state.player.pos().x,
            state.shadows.len()
        );
        println!("shadow finished: {}", serde_json::to_string(&state.hud())?);
        Ok(())
    }
}
