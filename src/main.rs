//! Lumen Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

    use glam::Vec2;
    use lumen_rush::consts::*;
    use lumen_rush::sim::{Bounds, FixtureModel, FrameInput, GameEvent, GamePhase, GameState, tick};
    use lumen_rush::{HighScore, Settings, renderer, taunt};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: FrameInput,
        bounds: Bounds,
        settings: Settings,
        high_score: HighScore,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// Liveness flag for the in-flight taunt lookup; cleared whenever the
        /// game-over modal goes away so late results are dropped
        taunt_alive: Rc<Cell<bool>>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            let bounds = Bounds::new(canvas.width() as f32, canvas.height() as f32);
            Self {
                state: GameState::new(seed),
                input: FrameInput::default(),
                bounds,
                settings: Settings::load(),
                high_score: HighScore::load(),
                canvas,
                ctx,
                taunt_alive: Rc::new(Cell::new(false)),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One animation frame: simulate, render, refresh the HUD
        fn frame(&mut self, time: f64) {
            let events = tick(&mut self.state, &self.input, &self.bounds);
            for event in events {
                self.handle_event(event);
            }
            renderer::draw_frame(&self.ctx, &self.state, &self.bounds, &self.settings);
            self.update_hud();
            self.track_fps(time);
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::LevelUp => {
                    log::info!(
                        "Upgraded to {}",
                        self.state.player.model.display_name()
                    );
                }
                GameEvent::GameOver { final_score } => self.on_game_over(final_score),
            }
        }

        fn on_game_over(&mut self, final_score: u32) {
            log::info!("Run over at {} lumen", final_score);
            if self.high_score.record(final_score) {
                log::info!("New high score: {}", final_score);
            }

            let document = document();
            set_text(&document, "final-score", &final_score.to_string());
            set_text(&document, "taunt", taunt::TAUNT_PLACEHOLDER);
            if let Some(el) = document.get_element_by_id("taunt") {
                let _ = el.set_attribute("class", "pending");
            }
            set_hidden(&document, "game-over", false);
            set_hidden(&document, "hud", true);

            // Fresh flag per modal; the old one may still be owned by a
            // lookup that must now miss
            let alive = Rc::new(Cell::new(true));
            self.taunt_alive = alive.clone();
            taunt::request_taunt(final_score, alive, move |line| {
                let document = document();
                if let Some(el) = document.get_element_by_id("taunt") {
                    el.set_text_content(Some(line));
                    let _ = el.set_attribute("class", "");
                }
            });
        }

        /// Start or restart a run (Menu -> Playing, GameOver -> Playing)
        fn start_run(&mut self) {
            self.taunt_alive.set(false);
            self.input = FrameInput::default();
            self.state.begin_run(&self.bounds);

            let document = document();
            set_hidden(&document, "menu", true);
            set_hidden(&document, "game-over", true);
            set_hidden(&document, "hud", false);
            log::info!("Run started");
        }

        /// GameOver -> Menu; the sim reset waits for the next start
        fn go_to_menu(&mut self) {
            self.taunt_alive.set(false);
            self.state.to_menu();

            let document = document();
            set_hidden(&document, "menu", false);
            set_hidden(&document, "game-over", true);
            set_hidden(&document, "hud", true);
        }

        /// Match the backing surface and sim bounds to the viewport
        fn resize(&mut self) {
            let window = web_sys::window().expect("no window");
            let w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(DEFAULT_WIDTH as f64);
            let h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(DEFAULT_HEIGHT as f64);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.bounds = Bounds::new(w as f32, h as f32);
        }

        fn update_hud(&self) {
            if self.state.phase != GamePhase::Playing {
                return;
            }
            let document = document();
            let score = self.state.display_score();
            set_text(&document, "hud-score", &score.to_string());
            set_text(&document, "hud-model", self.state.player.model.display_name());

            let upgrade_line = match self.state.player.model {
                FixtureModel::Compact => {
                    let remaining = (LEVEL_UP_SCORE - self.state.score).max(0.0) as u32;
                    format!(
                        "Next upgrade ({}): {} lumen",
                        FixtureModel::Linear.display_name(),
                        remaining
                    )
                }
                FixtureModel::Linear => {
                    format!("MAX LEVEL: {}", FixtureModel::Linear.display_name())
                }
            };
            set_text(&document, "hud-upgrade", &upgrade_line);

            let best = self.high_score.best();
            if best > 0 {
                set_text(&document, "hud-best", &format!("BEST: {}", best));
            }
            if self.settings.show_fps {
                set_text(&document, "hud-fps", &format!("{} fps", self.fps));
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }
    }

    fn document() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lumen Rush starting...");

        let document = document();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("canvas context unavailable")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas, ctx)));
        game.borrow_mut().resize();
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_resize(game.clone());

        // Menu is the initial state
        set_hidden(&document, "menu", false);
        set_hidden(&document, "hud", true);
        set_hidden(&document, "game-over", true);

        // The loop stops rescheduling once this clears (page teardown)
        let running = Rc::new(Cell::new(true));
        setup_teardown(running.clone());
        request_animation_frame(game, running);

        log::info!("Lumen Rush running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard: held-key flags; any key press takes control back from
        // the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = None;
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => g.input.up = true,
                    "ArrowDown" | "s" | "S" => g.input.down = true,
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => g.input.up = false,
                    "ArrowDown" | "s" | "S" => g.input.down = false,
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse: absolute target, overrides keys while active
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer =
                    Some(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: same as the pointer, and keep the page from scrolling
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.input.pointer =
                        Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = document();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start_run();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start_run();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().go_to_menu();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(running: Rc<Cell<bool>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            running.set(false);
            log::info!("Page going away, stopping the frame loop");
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, running, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>, time: f64) {
        if !running.get() {
            return;
        }
        game.borrow_mut().frame(time);
        request_animation_frame(game, running);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lumen_rush::sim::{Bounds, FrameInput, GameEvent, GamePhase, GameState, tick};
    use lumen_rush::taunt;

    env_logger::init();
    log::info!("Lumen Rush (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Smoke run: park the fixture in the center and let the spawner end it
    let bounds = Bounds::default();
    let mut state = GameState::new(0xB01D_FACE);
    state.begin_run(&bounds);

    let input = FrameInput::default();
    let mut final_score = 0;
    while state.phase == GamePhase::Playing && state.time_frames < 36_000 {
        for event in tick(&mut state, &input, &bounds) {
            if let GameEvent::GameOver { final_score: score } = event {
                final_score = score;
            }
        }
    }

    println!(
        "Run over after {} frames at {} lumen ({} enemies on screen)",
        state.time_frames,
        final_score,
        state.enemies.len()
    );
    println!("Gloom HQ says: \"{}\"", taunt::pick_taunt(final_score, 0.5));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
