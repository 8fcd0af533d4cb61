//! Sprite Stress entry point
//!
//! On the web: drives the simulation from `requestAnimationFrame` and hands
//! positions to whichever renderer is active. Natively: runs every renderer
//! against a synthetic frame-cost model and reports where each settles.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, KeyboardEvent, Window};

    use sprite_stress::platform::{FrameClock, now_ms};
    use sprite_stress::renderer::handoff::SPRITES_ATTRIBUTE;
    use sprite_stress::renderer::{ChannelHandoff, InstanceBuffer, JsonHandoff, Presenter, Projection};
    use sprite_stress::{PeakBoard, RendererKind, Scene, Settings};

    /// Writes each frame's JSON into the sprite host element
    struct AttributePresenter {
        handoff: JsonHandoff,
        host: Element,
    }

    impl Presenter for AttributePresenter {
        fn kind(&self) -> RendererKind {
            self.handoff.kind()
        }

        fn present(&mut self, positions: &[DVec2]) {
            self.handoff.present(positions);
            let _ = self.host.set_attribute(SPRITES_ATTRIBUTE, self.handoff.payload());
        }
    }

    /// Posts the packed instance buffer to the page's WebGL code
    struct WebGlPresenter {
        buffer: InstanceBuffer,
        window: Window,
    }

    impl Presenter for WebGlPresenter {
        fn kind(&self) -> RendererKind {
            RendererKind::RawWebGl
        }

        fn present(&mut self, positions: &[DVec2]) {
            self.buffer.present(positions);
            let bytes = js_sys::Uint8Array::from(self.buffer.as_bytes());
            let _ = self.window.post_message(&bytes, "*");
        }
    }

    fn build_presenter(settings: &Settings, viewport: DVec2, window: &Window, host: &Element) -> Box<dyn Presenter> {
        let projection = settings.projection(viewport);
        match settings.renderer {
            RendererKind::RawWebGl => {
                let clip = Projection {
                    viewport: DVec2::splat(2.0),
                    flip_y: false,
                    anchor_offset: 0.0,
                    ..projection
                };
                Box::new(WebGlPresenter {
                    buffer: InstanceBuffer::new(clip),
                    window: window.clone(),
                })
            }
            RendererKind::CanvasPort => {
                let window = window.clone();
                Box::new(ChannelHandoff::new(projection, move |json: &str| {
                    let _ = window.post_message(&JsValue::from_str(json), "*");
                }))
            }
            kind => Box::new(AttributePresenter {
                handoff: JsonHandoff::new(kind, projection),
                host: host.clone(),
            }),
        }
    }

    /// App instance holding all state
    struct App {
        settings: Settings,
        scene: Option<Scene>,
        presenter: Box<dyn Presenter>,
        clock: FrameClock,
        peaks: PeakBoard,
        run_peak: usize,
        viewport: DVec2,
        window: Window,
        host: Element,
    }

    impl App {
        fn new(settings: Settings, viewport: DVec2, window: Window, host: Element) -> Self {
            let seed = now_ms();
            log::info!("Run seeded with {}", seed);
            let scene = settings.scene(seed, viewport);
            let presenter = build_presenter(&settings, viewport, &window, &host);
            Self {
                run_peak: scene.len(),
                scene: Some(scene),
                presenter,
                clock: FrameClock::new(),
                peaks: PeakBoard::load(),
                settings,
                viewport,
                window,
                host,
            }
        }

        /// Advance one frame and hand the sprites to the renderer
        fn update(&mut self, time: f64) {
            let delta_ms = self.clock.frame(time);
            if let Some(scene) = self.scene.take() {
                let scene = scene.tick(delta_ms);
                self.run_peak = self.run_peak.max(scene.len());
                self.presenter.present(&scene.positions());
                self.scene = Some(scene);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = self.window.document() else {
                return;
            };
            let count = self.scene.as_ref().map(|s| s.len()).unwrap_or(0);

            if let Some(el) = document.query_selector("#hud-count .hud-value").ok().flatten() {
                el.set_text_content(Some(&count.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-renderer .hud-value").ok().flatten() {
                el.set_text_content(Some(self.settings.renderer.as_str()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.clock.fps().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }
        }

        /// Record the outgoing renderer's peak and start over on the next one
        fn switch_renderer(&mut self) {
            let outgoing = self.settings.renderer;
            if let Some(rank) = self.peaks.record(outgoing, self.run_peak, now_ms()) {
                log::info!("{} peaked at {} sprites (rank {})", outgoing.as_str(), self.run_peak, rank);
                self.peaks.save();
            }

            self.settings.renderer = outgoing.next();
            self.settings.save();
            self.restart();
            log::info!("Switched renderer: {} -> {}", outgoing.as_str(), self.settings.renderer.as_str());
        }

        fn restart(&mut self) {
            let scene = self.settings.scene(now_ms(), self.viewport);
            self.run_peak = scene.len();
            self.scene = Some(scene);
            self.presenter = build_presenter(&self.settings, self.viewport, &self.window, &self.host);
            self.clock.reset();
            let _ = self.host.set_attribute("data-renderer", self.settings.renderer.as_str());
        }
    }

    fn viewport_of(window: &Window) -> DVec2 {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        DVec2::new(w, h)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Sprite Stress starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(host) = document.get_element_by_id("sprites") else {
            log::error!("Missing #sprites host element");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let viewport = viewport_of(&window);
        log::info!(
            "Viewport {}x{}, renderer {}, {} sprites, {} policy, {} domain",
            viewport.x,
            viewport.y,
            settings.renderer.as_str(),
            settings.model.as_str(),
            settings.policy.as_str(),
            if settings.pixel_space { "pixel" } else { "unit" }
        );

        let _ = host.set_attribute("data-renderer", settings.renderer.as_str());
        let app = Rc::new(RefCell::new(App::new(settings, viewport, window.clone(), host)));

        setup_renderer_switch(&window, app.clone());
        request_animation_frame(app);

        log::info!("Sprite Stress running!");
    }

    fn setup_renderer_switch(window: &Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if matches!(event.key().as_str(), "r" | "R") {
                app.borrow_mut().switch_renderer();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::DVec2;
    use sprite_stress::consts::MIN_TICK_MS;
    use sprite_stress::platform::now_ms;
    use sprite_stress::{PeakBoard, RendererKind, Settings};

    /// Ticks simulated per renderer
    const TICKS: u64 = 2000;
    /// Frame overhead independent of population (ms)
    const BASE_FRAME_MS: f64 = 4.0;
    const VIEWPORT: DVec2 = DVec2::new(1280.0, 720.0);

    /// Rough per-sprite frame cost (µs) for each strategy
    fn sprite_cost_us(kind: RendererKind) -> f64 {
        match kind {
            RendererKind::HtmlTopLeft => 20.0,
            RendererKind::CssTranslate => 10.0,
            RendererKind::GameLibrary => 1.0,
            RendererKind::RawWebGl => 0.5,
            RendererKind::CanvasAttribute => 4.0,
            RendererKind::CanvasPort => 3.0,
        }
    }

    /// Population where a strategy's frame time meets the threshold
    fn sustainable(kind: RendererKind) -> f64 {
        (MIN_TICK_MS - BASE_FRAME_MS) * 1000.0 / sprite_cost_us(kind)
    }

    pub fn run() {
        let base = Settings::load();
        let mut peaks = PeakBoard::new();

        for kind in RendererKind::ALL {
            let settings = Settings {
                renderer: kind,
                ..base.clone()
            };
            let mut scene = settings.scene(now_ms(), VIEWPORT);
            let mut run_peak = scene.len();
            // The first frame is timed at the threshold, like a fresh clock
            let mut delta_ms = MIN_TICK_MS;

            for tick in 1..=TICKS {
                scene = scene.tick(delta_ms);
                run_peak = run_peak.max(scene.len());
                delta_ms = BASE_FRAME_MS + scene.len() as f64 * sprite_cost_us(kind) / 1000.0;
                if tick % 250 == 0 {
                    log::debug!("{} tick {}: {} sprites, {:.2} ms", kind.as_str(), tick, scene.len(), delta_ms);
                }
            }

            log::info!(
                "{}: settled at {} sprites (peak {}, model limit {:.0})",
                kind.as_str(),
                scene.len(),
                run_peak,
                sustainable(kind)
            );
            peaks.record(kind, run_peak, now_ms());
        }

        println!(
            "\nPeak sprites by renderer ({} sprites, {} policy):",
            base.model.as_str(),
            base.policy.as_str()
        );
        for (rank, entry) in peaks.entries.iter().enumerate() {
            println!("  {}. {:<20} {:>8}", rank + 1, entry.renderer.as_str(), entry.population);
        }
        if let Some(leader) = peaks.leader() {
            log::info!("{} sustained the most sprites ({})", leader.renderer.as_str(), leader.population);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sprite Stress (native) starting...");
    log::info!("Native mode runs headless - serve the web build for the renderer comparison");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
