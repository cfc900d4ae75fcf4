//! Asteroid Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use asteroid_dodger::audio::WebAudio;
    use asteroid_dodger::platform::storage::LocalStore;
    use asteroid_dodger::platform::{Action, Platform, TouchButton, action_for_key};
    use asteroid_dodger::{Game, SessionPhase, Tuning};

    struct App {
        game: Game<WebAudio>,
        store: Option<LocalStore>,
        last_phase: SessionPhase,
    }

    impl App {
        fn save(&mut self) {
            let Some(store) = self.store.as_mut() else { return };
            if let Err(e) = self.game.save(store) {
                log::warn!("Failed to save progress: {}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let stats = self.game.stats();

            let set = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            set("#hud-score .hud-value", &stats.score.to_string());
            set("#hud-lives .hud-value", &stats.lives.to_string());
            set("#hud-destroyed .hud-value", &stats.destroyed.to_string());
            set("#hud-level .hud-value", &stats.level.to_string());

            if let Some(el) = document.get_element_by_id("hud-combo") {
                let class = if stats.combo > 1 { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
                set("#hud-combo .hud-value", &format!("x{}", stats.combo));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.game.settings().show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
                set("#hud-fps .hud-value", &self.game.fps().to_string());
            }

            if let Some(el) = document.get_element_by_id("game-container") {
                let class = if self.game.shake_ticks() > 0 { "shake" } else { "" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if self.game.phase() == SessionPhase::GameOver { "overlay" } else { "overlay hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Asteroid Dodger starting...");

        let store = LocalStore::open();
        let seed = js_sys::Date::now() as u64;
        let game = match &store {
            Some(store) => Game::load(store, Tuning::default(), seed, WebAudio::new(0.3)),
            None => Game::new(
                Tuning::default(),
                Default::default(),
                seed,
                WebAudio::new(0.3),
            ),
        };
        let app = Rc::new(RefCell::new(App {
            game,
            store,
            last_phase: SessionPhase::Ready,
        }));

        setup_keyboard(app.clone());
        setup_auto_pause(app.clone());
        setup_buttons(app.clone());
        request_animation_frame(app);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(action) = action_for_key(&event.key()) else { return };
                event.prevent_default();
                let mut a = app.borrow_mut();
                if pressed {
                    a.game.key_down(action);
                } else {
                    a.game.key_up(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    a.game.focus_lost();
                } else {
                    a.game.focus_gained();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.focus_lost();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.focus_gained();
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start/restart/pause buttons and the touch d-pad
    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let on_click = |id: &str, handler: Box<dyn Fn(&mut App)>| {
            let Some(btn) = document.get_element_by_id(id) else { return };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                handler(&mut app.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        };

        on_click("start-pc", Box::new(|a| {
            a.game.start(Platform::Pc);
        }));
        on_click("start-mobile", Box::new(|a| {
            a.game.start(Platform::Mobile);
        }));
        on_click("pause-btn", Box::new(|a| a.game.toggle_pause()));
        on_click("restart-btn", Box::new(|a| a.game.restart()));
        on_click("submit-score", Box::new(|a| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let name = document
                .get_element_by_id("player-name")
                .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            let date = String::from(js_sys::Date::new_0().to_locale_date_string("en-US", &JsValue::UNDEFINED));
            if a.game.submit_score(&name, &date).is_some() {
                a.save();
            }
        }));

        // Touch d-pad: hold to move, release to stop
        for button in TouchButton::ALL {
            let Some(btn) = document.get_element_by_id(button.element_id()) else { continue };
            let action = Action::from(button);
            for (event_name, pressed) in [("touchstart", true), ("touchend", false), ("touchcancel", false)] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    if !a.game.platform().has_touch_controls() {
                        return;
                    }
                    if pressed {
                        a.game.key_down(action);
                    } else {
                        a.game.key_up(action);
                    }
                });
                let _ = btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.game.frame(time);

            // Persist unlocks and save on game over
            let unlocked = a.game.drain_achievements();
            let phase = a.game.phase();
            if !unlocked.is_empty() || (phase == SessionPhase::GameOver && a.last_phase != phase) {
                a.save();
            }
            a.last_phase = phase;

            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Dodger (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);
    run_headless(seed);
}

/// Play one session with a simple autopilot and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64) {
    use asteroid_dodger::audio::SilentAudio;
    use asteroid_dodger::consts::TICKS_PER_SECOND;
    use asteroid_dodger::platform::{Action, MemoryStore, Platform};
    use asteroid_dodger::{Game, SessionPhase, Settings, Tuning};

    const MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;
    let frame_ms = 1000.0 / TICKS_PER_SECOND as f64;

    let mut store = MemoryStore::new();
    let settings = Settings {
        auto_fire: true,
        ..Settings::default()
    };
    let mut game = Game::new(Tuning::default(), settings, seed, SilentAudio);
    game.start(Platform::Pc);

    // Sweep left and right under the falling rocks
    let mut heading = Action::Left;
    for frame in 0..MAX_TICKS {
        let x = game.state().player.pos.x;
        let width = game.state().tuning.canvas_width;
        if x <= width * 0.2 {
            heading = Action::Right;
        } else if x >= width * 0.8 {
            heading = Action::Left;
        }
        game.key_up(Action::Left);
        game.key_up(Action::Right);
        game.key_down(heading);

        game.frame(frame as f64 * frame_ms);
        for achievement in game.drain_achievements() {
            println!("Achievement: {}", achievement.name());
        }
        if game.phase() == SessionPhase::GameOver {
            break;
        }
    }

    let stats = game.stats().clone();
    println!(
        "Score {} | level {} | destroyed {} | best combo {} | lives {} | {} ticks",
        stats.score,
        stats.level,
        stats.destroyed,
        stats.max_combo,
        stats.lives,
        game.state().time_ticks
    );

    if game.phase() == SessionPhase::GameOver && game.is_high_score() {
        if let Some(rank) = game.submit_score("Autopilot", "headless") {
            println!("Leaderboard rank #{}", rank);
        }
    }
    if let Err(e) = game.save(&mut store) {
        log::warn!("Failed to save progress: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
