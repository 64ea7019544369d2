//! Draw Sheep entry point
//!
//! In the browser: owns the canvas, the animation loop and the DOM event
//! plumbing to the host page. Natively: a headless run over the samples.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CustomEvent, CustomEventInit, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use draw_sheep::renderer::RenderState;
    use draw_sheep::samples::sample_drawings;
    use draw_sheep::scene::canvas_point;
    use draw_sheep::sim::Viewport;
    use draw_sheep::{ClickOutcome, Drawing, QualityPreset, Scene, Settings, Tuning};

    /// Host -> viewer: `detail` is the JSON drawing list
    const ROSTER_EVENT: &str = "sheep-roster";
    /// Viewer -> host: `detail` is the id of the drawing to remove
    const REMOVE_EVENT: &str = "sheep-remove";

    /// Viewer instance holding all state
    struct App {
        scene: Scene,
        render_state: Option<RenderState>,
        /// Set once the host delivers a roster; samples run until then
        roster_received: bool,
        /// Cleared on teardown to stop the animation loop
        running: bool,
        /// A requestAnimationFrame callback is queued
        frame_pending: bool,
    }

    impl App {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            Self {
                scene: Scene::new(seed, tuning, settings),
                render_state: None,
                roster_received: false,
                running: true,
                frame_pending: false,
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.scene.resize(Viewport::new(width as f32, height as f32));
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }

        fn apply_roster(&mut self, drawings: &[Drawing]) {
            self.roster_received = true;
            self.scene.sync_roster(drawings);
        }

        /// Simulate and render one frame
        fn render(&mut self, time: f64) {
            let Some(batch) = self.scene.frame(time) else {
                return;
            };
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&batch) {
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
    }

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (
            dim(window.inner_width()) as u32,
            dim(window.inner_height()) as u32,
        )
    }

    /// Tuning overrides from an inline `<script id="sheep-tuning" type="application/json">`
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("sheep-tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning: {}", e);
                Tuning::default()
            }
        }
    }

    /// `?quality=low|medium|high` overrides the stored preset for this visit
    fn quality_from_url(window: &web_sys::Window) -> Option<QualityPreset> {
        let search = window.location().search().ok()?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        let value = params.get("quality")?;
        let preset = QualityPreset::parse(&value);
        if preset.is_none() {
            log::warn!("Unknown quality {:?} in URL", value);
        }
        preset
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Draw Sheep starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let (width, height) = window_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        let mut settings = Settings::load();
        if let Some(quality) = quality_from_url(&window) {
            settings.quality = quality;
        }

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, load_tuning(&document), settings)));
        app.borrow_mut().resize(width, height);

        // Listen before the async GPU setup so an early roster is not missed
        setup_host_events(&window, app.clone());
        setup_input_handlers(&window, &canvas, app.clone());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = (canvas.width(), canvas.height());
        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        {
            let mut a = app.borrow_mut();
            if !a.roster_received {
                a.scene.sync_roster(&sample_drawings());
            }
        }

        request_animation_frame(app);

        log::info!("Draw Sheep running!");
    }

    /// Roster updates in, teardown and back/forward-cache restore
    fn setup_host_events(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: CustomEvent| {
                let detail = event.detail();
                let json = detail
                    .as_string()
                    .or_else(|| js_sys::JSON::stringify(&detail).ok().map(String::from));
                let Some(json) = json else {
                    log::warn!("{} event without a detail payload", ROSTER_EVENT);
                    return;
                };
                match Drawing::roster_from_json(&json) {
                    Ok(drawings) => app.borrow_mut().apply_roster(&drawings),
                    Err(e) => log::warn!("Ignoring malformed roster: {}", e),
                }
            });
            let _ = window
                .add_event_listener_with_callback(ROSTER_EVENT, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().running = false;
                log::info!("Page hidden, animation stopped");
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restored from the back/forward cache: restart the loop
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let pending = {
                    let mut a = app.borrow_mut();
                    if a.running {
                        return;
                    }
                    a.running = true;
                    a.scene.reset_clock();
                    a.frame_pending
                };
                log::info!("Page shown again, animation resumed");
                // A frame queued before the page was hidden keeps the old loop going
                if !pending {
                    request_animation_frame(app.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        // Window resize
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (width, height) = window_size(&window);
                canvas_clone.set_width(width);
                canvas_clone.set_height(height);
                app.borrow_mut().resize(width, height);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click => jump, double click => removal request
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let point = canvas_point(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                    Vec2::new(rect.width() as f32, rect.height() as f32),
                    Vec2::new(canvas_clone.width() as f32, canvas_clone.height() as f32),
                );
                // Release the borrow before the host reacts to the event
                let outcome = app.borrow_mut().scene.click(point, js_sys::Date::now());
                if let ClickOutcome::RemoveRequested(id) = outcome {
                    dispatch_remove(&id);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: viewer preferences
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let settings = &mut a.scene.settings;
                match event.key().as_str() {
                    "q" | "Q" => {
                        settings.quality = settings.quality.next();
                        log::info!("Quality: {}", settings.quality.as_str());
                    }
                    "t" | "T" => settings.twinkle = !settings.twinkle,
                    "s" | "S" => settings.shadows = !settings.shadows,
                    "m" | "M" => settings.reduced_motion = !settings.reduced_motion,
                    _ => return,
                }
                settings.save();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn dispatch_remove(id: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(id));
        match CustomEvent::new_with_event_init_dict(REMOVE_EVENT, &init) {
            Ok(event) => {
                let _ = window.dispatch_event(&event);
            }
            Err(e) => log::warn!("Could not create {} event: {:?}", REMOVE_EVENT, e),
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        app.borrow_mut().frame_pending = true;
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.frame_pending = false;
            if !a.running {
                return;
            }
            a.render(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use draw_sheep::sim::{Viewport, planet_geometry, visual_center};
    use draw_sheep::{Scene, Settings, Tuning, samples};

    env_logger::init();
    log::info!("Draw Sheep (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(std::path::Path::new(&path)) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut scene = Scene::new(42, tuning, Settings::load());
    scene.resize(Viewport::new(1920.0, 1080.0));
    scene.sync_roster(&samples::sample_drawings());

    const FRAMES: u32 = 600;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    let mut triangles = 0;

    for frame in 0..FRAMES {
        let time = frame as f64 * FRAME_MS;
        if frame == FRAMES / 2 {
            let geo = planet_geometry(scene.viewport());
            let jumper = scene
                .creatures()
                .first()
                .map(|c| visual_center(c, &geo, &scene.tuning));
            if let Some(point) = jumper {
                let outcome = scene.click(point, time);
                log::info!("Click at ({:.0}, {:.0}): {:?}", point.x, point.y, outcome);
            }
        }
        if let Some(batch) = scene.frame(time) {
            triangles = batch.triangle_count();
        }
        if frame % 60 == 0 {
            for c in scene.creatures() {
                log::info!(
                    "t={:>4.1}s {:<14} angle={:.3} height={:.1}",
                    time / 1000.0,
                    c.id(),
                    c.angle,
                    c.jump_height
                );
            }
        }
    }

    println!(
        "Simulated {} frames, {} sheep, {} triangles in the last frame",
        FRAMES,
        scene.creatures().len(),
        triangles
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
