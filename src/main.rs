//! Window Jumper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use window_jumper::audio::{AudioManager, SoundEffect};
    use window_jumper::consts::*;
    use window_jumper::renderer::{RenderState, scene_vertices};
    use window_jumper::sim::{TickInput, tick};
    use window_jumper::{Scene, SceneLayout, Settings};

    /// Game instance holding all state
    struct Game {
        scene: Scene,
        layout: SceneLayout,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        accumulator: f64,
        /// Simulation clock handed to `tick`
        sim_time: f64,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(layout: SceneLayout, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                scene: Scene::Start,
                layout,
                settings,
                render_state: None,
                audio,
                accumulator: 0.0,
                sim_time: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn pointer_down(&mut self) {
            self.audio.resume();
            if self.scene.game().is_some() {
                self.input.pointer_down = true;
            }
        }

        fn pointer_up(&mut self) {
            let seed = js_sys::Date::now() as u64;
            match self.scene.pointer_up(&self.layout, seed) {
                Ok(true) => {
                    self.accumulator = 0.0;
                    self.input.pointer_down = false;
                    self.input.pointer_up = false;
                }
                Ok(false) => self.input.pointer_up = true,
                Err(e) => log::error!("Failed to start game: {}", e),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f64, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.accumulator -= SIM_DT;
                self.sim_time += SIM_DT;
                substeps += 1;

                let Some(state) = self.scene.game_mut() else {
                    break;
                };
                tick(state, &self.input, self.sim_time);
                let events = state.drain_events();

                // Clear one-shot inputs after processing
                self.input.pointer_down = false;
                self.input.pointer_up = false;

                for effect in events.iter().filter_map(SoundEffect::from_event) {
                    self.audio.play(effect);
                }
                if let Some(screen) = self.scene.handle_events(&events) {
                    self.audio
                        .play_sequence(&SoundEffect::game_over_screen(screen.cue));
                }
            }
            if self.scene.game().is_none() {
                self.accumulator = 0.0;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let vertices = scene_vertices(
                &self.scene,
                self.layout.size(),
                &self.settings,
                time / 1000.0,
            );
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("release-name") {
                match &self.scene {
                    Scene::GameOver(screen) => {
                        let _ = el.set_attribute("class", "");
                        el.set_text_content(Some(&screen.title()));
                    }
                    _ => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("demo-badge") {
                let class = if self.input.autopilot { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Window Jumper starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let layout = SceneLayout::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(Game::new(layout, Settings::default())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let scene_size = game.borrow().layout.size();
        let render_state = RenderState::new(surface, &adapter, width, height, scene_size)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_auto_mute(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("Window Jumper running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer_up();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" if !event.repeat() => g.pointer_down(),
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "Enter") {
                    game.borrow_mut().pointer_up();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_mute(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        // Tab switch, minimize
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                    g.audio.set_muted(hidden);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Click outside
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                    log::info!("Muted (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Longest headless demo, in simulated seconds
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TIME_LIMIT: f64 = 600.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use window_jumper::consts::SIM_DT;
    use window_jumper::sim::{GameEvent, TickInput, tick};
    use window_jumper::{Scene, SceneLayout, Settings};

    env_logger::init();
    log::info!("Window Jumper (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(&path).unwrap_or_else(|e| {
            log::error!("Could not load settings from {}: {}", path, e);
            Settings::default()
        }),
        None => Settings::default(),
    };
    log::debug!("Settings: {:?}", settings);

    let layout = match SceneLayout::builtin() {
        Ok(layout) => layout,
        Err(e) => {
            log::error!("Invalid scene layout: {}", e);
            std::process::exit(1);
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut scene = match Scene::new_game(&layout, seed) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Could not build game: {}", e);
            std::process::exit(1);
        }
    };

    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    let mut time = 0.0;
    let mut collected = 0u32;
    while time < DEMO_TIME_LIMIT {
        let Some(state) = scene.game_mut() else {
            break;
        };
        time += SIM_DT;
        tick(state, &input, time);
        let events = state.drain_events();
        collected += events
            .iter()
            .filter(|e| matches!(e, GameEvent::ItemCollected { .. }))
            .count() as u32;
        scene.handle_events(&events);
    }

    match &scene {
        Scene::GameOver(screen) => {
            log::info!(
                "Game over after {:.1}s: score {}, {} items, {}",
                time,
                screen.score,
                collected,
                screen.title()
            );
        }
        Scene::Game(state) => {
            log::info!(
                "Demo stopped after {:.0}s with score {} and {} lives left",
                time,
                state.score,
                state.lives
            );
        }
        Scene::Start => {}
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
