//! Archant entry point
//!
//! On the web: wires the page, the canvas and the frame loop to a `Session`.
//! Natively: plays one headless round on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

    use archant::assets::{Panel, WebImages, asset_url};
    use archant::audio::AudioManager;
    use archant::renderer::{CanvasRenderer, compose};
    use archant::{Error, Overlay, Result, Session, Settings};

    /// Page elements the game toggles
    struct Page {
        menu: HtmlElement,
        canvas: HtmlCanvasElement,
        cutscene: HtmlElement,
        win: HtmlElement,
        message: HtmlElement,
        message_text: HtmlElement,
        goal: HtmlElement,
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        audio: AudioManager,
        images: WebImages,
        renderer: CanvasRenderer,
        page: Page,
        asset_root: String,
        /// Overlay last applied to the page, to skip redundant DOM writes
        shown: Option<Overlay>,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            self.session.frame(time, &mut self.audio);
            let commands = compose(self.session.state(), &self.images);
            self.renderer.draw(&commands, &self.images);
            self.update_page();
        }

        /// Show exactly the panels the current phase calls for
        fn update_page(&mut self) {
            let overlay = self.session.overlay();
            if self.shown == Some(overlay) {
                return;
            }
            self.shown = Some(overlay);

            let page = &self.page;
            set_visible(&page.menu, overlay == Overlay::Menu);
            set_visible(&page.canvas, overlay != Overlay::Menu);
            set_visible(&page.goal, overlay == Overlay::Playing);

            match overlay {
                Overlay::Cutscene(panel) => {
                    self.set_background(&self.page.cutscene, panel);
                    set_visible(&self.page.cutscene, true);
                }
                _ => set_visible(&self.page.cutscene, false),
            }

            match overlay {
                Overlay::Won(panel) => {
                    self.set_background(&self.page.win, panel);
                    set_visible(&self.page.win, true);
                }
                _ => set_visible(&self.page.win, false),
            }

            match overlay {
                Overlay::GameOver(text) => {
                    self.page.message_text.set_text_content(Some(text));
                    set_visible(&self.page.message, true);
                }
                _ => set_visible(&self.page.message, false),
            }
        }

        fn set_background(&self, el: &HtmlElement, panel: Panel) {
            let url = asset_url(&self.asset_root, panel.file());
            let _ = el
                .style()
                .set_property("background-image", &format!("url({})", url));
        }
    }

    fn set_visible(el: &web_sys::Element, visible: bool) {
        let _ = el.set_attribute("class", if visible { "visible" } else { "hidden" });
    }

    fn element<T: JsCast>(document: &Document, id: &'static str, expected: &'static str) -> Result<T> {
        document
            .get_element_by_id(id)
            .ok_or(Error::MissingElement(id))?
            .dyn_into::<T>()
            .map_err(|_| Error::WrongElement { id, expected })
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() -> Result<()> {
        log::info!("Archant starting...");

        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;

        let canvas: HtmlCanvasElement = element(&document, "game", "canvas")?;
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(Error::NoContext)?
            .dyn_into()
            .map_err(|_| Error::NoContext)?;

        let page = Page {
            menu: element(&document, "menu", "element")?,
            canvas: canvas.clone(),
            cutscene: element(&document, "cutscene", "element")?,
            win: element(&document, "win", "element")?,
            message: element(&document, "msg", "element")?,
            message_text: element(&document, "msg-text", "element")?,
            goal: element(&document, "goal", "element")?,
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(Vec2::new(width as f32, height as f32), seed),
            images: WebImages::load(&settings.asset_root),
            asset_root: settings.asset_root.clone(),
            audio: AudioManager::new(settings),
            renderer: CanvasRenderer::new(ctx),
            page,
            shown: None,
        }));
        log::info!("Session created with seed: {}", seed);

        game.borrow_mut().update_page();
        setup_input_handlers(&document, &canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Archant running!");
        Ok(())
    }

    fn on_click<F>(target: &web_sys::EventTarget, handler: F)
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<()> {
        // Canvas click - fire while playing
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            on_click(canvas, move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let point = Vec2::new(
                    (event.client_x() as f64 - rect.left()) as f32,
                    (event.client_y() as f64 - rect.top()) as f32,
                );
                let mut g = game.borrow_mut();
                let Game { session, audio, .. } = &mut *g;
                session.click(point, now(), audio);
                g.update_page();
            });
        }

        // Cutscene and win panels cover the canvas; a click anywhere advances
        for id in ["cutscene", "win"] {
            let game = game.clone();
            let panel: HtmlElement = element(document, id, "element")?;
            on_click(&panel, move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let Game { session, audio, .. } = &mut *g;
                session.click(Vec2::ZERO, now(), audio);
                g.update_page();
            });
        }

        {
            let game = game.clone();
            let button: HtmlElement = element(document, "play-btn", "button")?;
            on_click(&button, move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let Game { session, audio, .. } = &mut *g;
                session.play(audio);
                g.update_page();
            });
        }

        {
            let button: HtmlElement = element(document, "retry-btn", "button")?;
            on_click(&button, move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.retry(now());
                g.update_page();
            });
        }

        Ok(())
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

    /// Runs every display refresh; the session itself skips work when idle
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Archant failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Archant (native) starting...");
    log::info!("Native mode plays a headless autopilot round - run with `trunk serve` for the web version");

    let settings = archant::Settings::load();
    log::debug!("Settings: {:?}", settings);

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    autopilot::run(seed);
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;

    use archant::assets::Sprite;
    use archant::audio::{CueLog, SoundCue};
    use archant::consts::PROJECTILE_DIVISOR;
    use archant::renderer::compose;
    use archant::sim::GameState;
    use archant::{GamePhase, Session, distance};

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes of play
    const MAX_FRAMES: u32 = 60 * 120;
    const FIRE_EVERY: u32 = 12;

    /// Where to click so the arrow meets the closest enemy.
    ///
    /// An arrow reaches its click point after exactly `PROJECTILE_DIVISOR`
    /// ticks, so lead the enemy by that many ticks of travel.
    fn lead_target(state: &GameState) -> Option<Vec2> {
        let player = state.player.pos;
        state
            .enemies
            .iter()
            .min_by(|a, b| {
                distance(a.pos, player)
                    .partial_cmp(&distance(b.pos, player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos + e.vel * PROJECTILE_DIVISOR)
    }

    pub fn run(seed: u64) {
        let mut session = Session::new(VIEWPORT, seed);
        let mut audio = CueLog::new();
        let images = |_: Sprite| true;

        session.play(&mut audio);
        while session.phase() == GamePhase::Cutscene {
            log::info!("Cutscene: {:?}", session.overlay());
            session.click(Vec2::ZERO, 0.0, &mut audio);
        }

        let mut draws = 0usize;
        let mut frames = 0u32;
        for frame in 0..MAX_FRAMES {
            let now = frame as f64 * FRAME_MS;
            if frame % FIRE_EVERY == 0 {
                if let Some(target) = lead_target(session.state()) {
                    session.click(target, now, &mut audio);
                }
            }
            session.frame(now, &mut audio);
            draws += compose(session.state(), &images).len();
            frames = frame + 1;
            if session.phase() != GamePhase::Playing {
                break;
            }
        }

        let state = session.state();
        log::info!(
            "Finished in {:?} after {} frames: {} kills, {} arrows, platform at {:.0}",
            session.phase(),
            frames,
            state.kills,
            state.projectiles.len(),
            state.platform_y
        );
        log::info!(
            "{} draw commands, {} arrows fired, {} hits",
            draws,
            audio.count(SoundCue::Fire),
            audio.count(SoundCue::Hit)
        );
        match serde_json::to_string(state) {
            Ok(json) => log::debug!("Final state: {}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        }
    }
}
