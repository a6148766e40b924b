//! Joyride entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use joyride::consts::INTERACT_RADIUS;
    use joyride::renderer::RenderState;
    use joyride::sim::{TickInput, WorldState, tick};
    use joyride::tuning::WorldConfig;

    /// Game instance holding all state
    struct Game {
        state: WorldState,
        render_state: Option<RenderState>,
        /// Input snapshot for the next tick; the interact edge is cleared
        /// after every tick
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(config: &WorldConfig) -> Self {
            Self {
                state: WorldState::new(config),
                render_state: None,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One animation frame: advance the simulation, then render
        fn update(&mut self, time: f64) {
            let input = self.input;
            tick(&mut self.state, &input);
            // Clear one-shot inputs after processing
            self.input.interact = false;

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
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
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
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            let driving = self.state.player.in_vehicle();

            if let Some(el) = document.get_element_by_id("hud-mode") {
                el.set_text_content(Some(if driving { "Driving" } else { "On foot" }));
            }

            if let Some(el) = document.get_element_by_id("hud-speed") {
                let speed = match self.state.player.possession {
                    joyride::sim::Possession::Driving(id) => {
                        self.state.vehicle(id).map_or(0.0, |v| v.speed)
                    }
                    joyride::sim::Possession::Walking => 0.0,
                };
                el.set_text_content(Some(&format!("{:.1}", speed.abs())));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            // Interact prompt: entering in range, or exiting while driving
            if let Some(el) = document.get_element_by_id("interact-prompt") {
                let prompt = if driving {
                    Some("Press F to exit")
                } else {
                    let near = self
                        .state
                        .nearest_vehicle(self.state.player.pos)
                        .is_some_and(|(_, dist)| dist < INTERACT_RADIUS);
                    near.then_some("Press F to drive")
                };
                match prompt {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    /// World layout override from an optional inline JSON block
    fn load_world_config(document: &web_sys::Document) -> WorldConfig {
        let Some(json) = document
            .get_element_by_id("world-config")
            .and_then(|el| el.text_content())
        else {
            return WorldConfig::default();
        };
        match WorldConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded world layout from page config");
                config
            }
            Err(e) => {
                log::warn!("Bad world-config JSON, using defaults: {e}");
                WorldConfig::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Joyride starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let config = load_world_config(&document);
        let game = Rc::new(RefCell::new(Game::new(&config)));
        game.borrow_mut()
            .state
            .camera
            .set_viewport(client_w as f32, client_h as f32);

        log::info!(
            "World ready: {} vehicles, {} buildings",
            config.vehicles.len(),
            config.buildings.len()
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Joyride running!");
    }

    /// Keydown/keyup listeners maintain the pressed set. WASD and arrows
    /// both map to movement; "f" fires the interact edge on a non-repeat
    /// press. Anything else is a no-op.
    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" | "ArrowUp" => g.input.up = true,
                    "s" | "S" | "ArrowDown" => g.input.down = true,
                    "a" | "A" | "ArrowLeft" => g.input.left = true,
                    "d" | "D" | "ArrowRight" => g.input.right = true,
                    "f" | "F" => {
                        if !event.repeat() {
                            g.input.interact = true;
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" | "ArrowUp" => g.input.up = false,
                    "s" | "S" | "ArrowDown" => g.input.down = false,
                    "a" | "A" | "ArrowLeft" => g.input.left = false,
                    "d" | "D" | "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Track the canvas client size: surface gets physical pixels, the
    /// camera viewport logical ones
    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        let canvas = canvas.clone();
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = win.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
            g.state
                .camera
                .set_viewport(client_w as f32, client_h as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Joyride (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning headless smoke drive...");
    smoke_drive();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted end-to-end pass through the simulation: walk to the nearest
/// car, drive a lap, get out.
#[cfg(not(target_arch = "wasm32"))]
fn smoke_drive() {
    use joyride::consts::INTERACT_RADIUS;
    use joyride::sim::{Possession, TickInput, WorldState, tick};
    use joyride::tuning::WorldConfig;

    let mut world = WorldState::new(&WorldConfig::default());
    world.camera.set_viewport(800.0, 600.0);

    // Walk toward the nearest car
    let mut walked = 0;
    loop {
        let (id, dist) = world
            .nearest_vehicle(world.player.pos)
            .expect("roster is never empty");
        if dist < INTERACT_RADIUS {
            break;
        }
        assert!(walked < 600, "never reached a vehicle");
        let target = world.vehicle(id).expect("handle is valid").pos;
        let delta = target - world.player.pos;
        let input = TickInput {
            up: delta.y < -1.0,
            down: delta.y > 1.0,
            left: delta.x < -1.0,
            right: delta.x > 1.0,
            ..Default::default()
        };
        tick(&mut world, &input);
        walked += 1;
    }

    // Hop in
    let interact = TickInput {
        interact: true,
        ..Default::default()
    };
    tick(&mut world, &interact);
    let Possession::Driving(id) = world.player.possession else {
        panic!("interact within range should enter the vehicle");
    };
    assert_eq!(world.vehicle(id).expect("handle is valid").speed, 0.0);

    // Drive a gentle arc
    for i in 0..300 {
        let input = TickInput {
            up: true,
            right: i > 60,
            ..Default::default()
        };
        tick(&mut world, &input);
    }
    let parked_at = world.player.pos;

    // And get out
    tick(&mut world, &interact);
    assert_eq!(world.player.possession, Possession::Walking);
    assert!(world.vehicles.iter().all(|v| !v.occupied));

    log::info!(
        "smoke drive ok: {} ticks, parked at ({:.0}, {:.0})",
        world.time_ticks,
        parked_at.x,
        parked_at.y
    );
    println!("✓ Smoke drive passed!");
}
