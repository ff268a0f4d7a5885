//! Orbit Gallery entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, DeviceOrientationEvent, Element,
        EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent,
    };

    use orbit_gallery::Tuning;
    use orbit_gallery::platform::{self, MotionError, Status, StatusLine};
    use orbit_gallery::renderer::render;
    use orbit_gallery::sim::{FrameClock, GalleryEvent, GalleryState, TickInput, tick};

    // DeviceOrientationEvent.requestPermission is iOS-only and not in web-sys
    #[wasm_bindgen(inline_js = "
        export function has_device_orientation() {
            return typeof DeviceOrientationEvent !== 'undefined';
        }

        export function needs_orientation_permission() {
            return typeof DeviceOrientationEvent !== 'undefined'
                && typeof DeviceOrientationEvent.requestPermission === 'function';
        }

        export function request_orientation_permission() {
            return DeviceOrientationEvent.requestPermission();
        }
    ")]
    extern "C" {
        fn has_device_orientation() -> bool;
        fn needs_orientation_permission() -> bool;
        fn request_orientation_permission() -> js_sys::Promise;
    }

    /// Game instance holding all state
    struct Game {
        state: GalleryState,
        clock: FrameClock,
        input: TickInput,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        status_el: Option<Element>,
        shots_el: Option<Element>,
        status_line: StatusLine,
        orientation_attached: bool,
    }

    impl Game {
        /// Match the canvas backing store to the window
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32;
            self.state
                .resize(width, height, window.device_pixel_ratio() as f32);

            let (w, h) = self.state.viewport.backing_size();
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            let ratio = self.state.viewport.pixel_ratio as f64;
            if let Err(e) = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0) {
                log::warn!("set_transform failed: {:?}", e);
            }
        }

        fn set_status(&self, status: Status) {
            if let Some(el) = &self.status_el {
                el.set_text_content(Some(status.message()));
            }
        }

        fn set_shots(&self, shots: u64) {
            if let Some(el) = &self.shots_el {
                el.set_text_content(Some(&shots.to_string()));
            }
        }

        /// Push tick events to the status line and shot counter
        fn apply_events(&mut self, events: &[GalleryEvent]) {
            for event in events {
                match event {
                    GalleryEvent::Shot { shots, .. } => self.set_shots(*shots),
                    GalleryEvent::MotionActivated => log::info!("Motion control active"),
                    GalleryEvent::Spawned { population } => {
                        log::debug!("Spawned enemy, population {}", population)
                    }
                }
            }
            if let Some(status) = self.status_line.settle(events) {
                self.set_status(status);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Orbit Gallery starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let mut game = Game {
            state: GalleryState::with_tuning(seed, tuning),
            clock: FrameClock::new(),
            input: TickInput::default(),
            canvas,
            ctx,
            status_el: document.get_element_by_id("status"),
            shots_el: document.get_element_by_id("shots"),
            status_line: StatusLine::new(),
            orientation_attached: false,
        };
        game.resize();
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(game));

        setup_input_handlers(&window, game.clone());
        setup_motion_button(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Orbit Gallery running!");
        Ok(())
    }

    /// Register a listener with the options `listener_options` picks for it
    fn listen(target: &EventTarget, event: &str, callback: &js_sys::Function) {
        let options = platform::listener_options(event);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(options.passive);
        opts.set_capture(options.capture);
        if let Err(e) = target
            .add_event_listener_with_callback_and_add_event_listener_options(event, callback, &opts)
        {
            log::warn!("Failed to listen for {}: {:?}", event, e);
        }
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer down - fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                platform::on_pointer_down(&mut game.borrow_mut().input);
            });
            listen(window, "pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard - arrow keys turn
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game { state, input, .. } = &mut *g;
                platform::on_key(input, &event.key(), &state.tuning);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_motion_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("enable-motion") else {
            log::warn!("No #enable-motion button; motion control disabled");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            enable_motion(game.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start orientation control, asking for permission where required
    fn enable_motion(game: Rc<RefCell<Game>>) {
        if !has_device_orientation() {
            motion_failed(&game, MotionError::Unavailable);
            hide_motion_button();
            return;
        }

        if !needs_orientation_permission() {
            attach_orientation(game);
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            let result = match JsFuture::from(request_orientation_permission()).await {
                Ok(value) => {
                    MotionError::check_permission(&value.as_string().unwrap_or_default())
                }
                Err(e) => Err(MotionError::Failed(format!("{:?}", e))),
            };
            match result {
                Ok(()) => attach_orientation(game),
                Err(e) => motion_failed(&game, e),
            }
        });
    }

    fn motion_failed(game: &Rc<RefCell<Game>>, error: MotionError) {
        log::warn!("Motion unavailable: {}", error);
        // Shown after the next frame's events so a pending shot can't replace it
        game.borrow_mut().status_line.queue(error.status());
    }

    fn attach_orientation(game: Rc<RefCell<Game>>) {
        hide_motion_button();
        if game.borrow().orientation_attached {
            return;
        }
        game.borrow_mut().orientation_attached = true;

        let Some(window) = web_sys::window() else {
            return;
        };
        let listener = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
            platform::on_orientation(&mut listener.borrow_mut().input, event.alpha());
        });
        listen(&window, "deviceorientation", closure.as_ref().unchecked_ref());
        closure.forget();
        log::info!("Orientation listener attached");
    }

    fn hide_motion_button() {
        let btn = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("enable-motion"));
        if let Some(btn) = btn {
            let _ = btn.class_list().add_1("hidden");
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
            let max_dt = g.state.tuning.max_frame_dt;
            let dt = g.clock.delta(time, max_dt);

            let input = g.input.take();
            let events = tick(&mut g.state, &input, dt, time);

            let Game { state, ctx, .. } = &mut *g;
            render(state, ctx);

            g.apply_events(&events);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Orbit Gallery failed to start: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orbit Gallery (native) starting...");
    log::info!("Native mode runs a headless simulation - run with `trunk serve` for the web version");

    headless_run(42, 600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a scripted session against the recording surface
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, frames: u32) {
    use orbit_gallery::platform::{self, Status, StatusLine};
    use orbit_gallery::renderer::{RecordingSurface, render};
    use orbit_gallery::sim::{FrameClock, GalleryEvent, GalleryState, TickInput, tick};
    use orbit_gallery::Tuning;

    let tuning = Tuning::load();
    let mut state = GalleryState::with_tuning(seed, tuning);
    state.resize(1280.0, 720.0, 1.0);

    let mut clock = FrameClock::new();
    let mut input = TickInput::default();
    let mut surface = RecordingSurface::new();
    let mut hits = 0u32;
    let mut status_line = StatusLine::new();

    for frame in 0..frames {
        let time = frame as f64 * 1000.0 / 60.0;
        if frame % 20 == 0 {
            platform::on_key(&mut input, "ArrowRight", &state.tuning);
        }
        if frame % 15 == 0 {
            platform::on_pointer_down(&mut input);
        }

        let dt = clock.delta(time, state.tuning.max_frame_dt);
        let events = tick(&mut state, &input.take(), dt, time);

        surface.reset();
        render(&state, &mut surface);

        for event in &events {
            if let GalleryEvent::Shot { outcome, shots } = event {
                if outcome.is_hit() {
                    hits += 1;
                }
                log::debug!("Shot {}: {}", shots, Status::from_outcome(*outcome));
            }
        }
        if let Some(status) = status_line.settle(&events) {
            log::trace!("Status: {}", status);
        }
    }

    log::info!(
        "Headless run finished: {} frames, {} shots, {} hits, {} enemies, {} draw commands last frame",
        frames,
        state.shots,
        hits,
        state.enemies.len(),
        surface.commands.len()
    );
    println!(
        "shots={} hits={} enemies={} yaw={:.3}",
        state.shots,
        hits,
        state.enemies.len(),
        state.yaw
    );
}
