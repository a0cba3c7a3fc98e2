use std::cell::RefCell;
use std::rc::Rc;

use starguard_common::color::Color;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement,
    KeyboardEvent, Window,
};

use crate::config::GameConfig;
use crate::game::{Game, GameStatus};
use crate::playfield::{Playfield, Viewport};
use crate::render::{render, DrawSurface, ImageAsset};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn js_error(err: anyhow::Error) -> JsValue {
    js_sys::Error::new(&format!("{err:#}")).into()
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second game on the same page finds the logger already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn read_viewport(window: &Window) -> Viewport {
    let extent = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(
        extent(window.inner_width()),
        extent(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

/// Backing store in device pixels, CSS box in logical pixels.
fn size_canvas(canvas: &HtmlCanvasElement, playfield: &Playfield) -> Result<(), JsValue> {
    canvas.set_width(playfield.surface_width());
    canvas.set_height(playfield.surface_height());
    let style = canvas.style();
    style.set_property("width", &format!("{}px", playfield.width))?;
    style.set_property("height", &format!("{}px", playfield.height))?;
    Ok(())
}

fn acquire_context(canvas: &HtmlCanvasElement, font: &str) -> Option<CanvasRenderingContext2d> {
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    style_context(&ctx, font);
    Some(ctx)
}

/// Resizing a canvas resets its context state, so this runs after every
/// resize too.
fn style_context(ctx: &CanvasRenderingContext2d, font: &str) {
    ctx.set_fill_style_str(&Color::WHITE.to_css_hex());
    ctx.set_font(font);
}

struct WebAssets {
    player: HtmlImageElement,
    invader: HtmlImageElement,
    /// Loaded eagerly; no game event plays it yet.
    _shoot: HtmlAudioElement,
}

impl WebAssets {
    fn load(player_src: &str, invader_src: &str, shoot_src: &str) -> Result<Self, JsValue> {
        let player = HtmlImageElement::new()?;
        player.set_src(player_src);
        let invader = HtmlImageElement::new()?;
        invader.set_src(invader_src);
        let shoot = HtmlAudioElement::new_with_src(shoot_src)?;
        Ok(Self {
            player,
            invader,
            _shoot: shoot,
        })
    }

    fn image(&self, image: ImageAsset) -> &HtmlImageElement {
        match image {
            ImageAsset::Player => &self.player,
            ImageAsset::Invader => &self.invader,
        }
    }
}

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    assets: &'a WebAssets,
}

impl DrawSurface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn draw_image(&mut self, image: ImageAsset, x: f64, y: f64, width: f64, height: f64) {
        let element = self.assets.image(image);
        if !element.complete() {
            return;
        }
        if let Err(err) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(element, x, y, width, height)
        {
            log::debug!("drawing {image:?} failed: {err:?}");
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: f64) {
        if let Err(err) = self.ctx.fill_text_with_max_width(text, x, y, max_width) {
            log::debug!("drawing text failed: {err:?}");
        }
    }
}

struct Session {
    game: Game,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    assets: WebAssets,
    frame_handle: Option<i32>,
}

impl Session {
    /// Returns whether another frame should be scheduled.
    fn on_frame(&mut self, timestamp: f64) -> bool {
        if let Some(playfield) = self.game.apply_pending_resize() {
            if let Err(err) = size_canvas(&self.canvas, &playfield) {
                log::warn!("resizing canvas failed: {err:?}");
            }
            if let Some(ctx) = &self.ctx {
                style_context(ctx, &self.game.config().score_font);
            }
        }

        let status = self.game.frame(timestamp);

        if self.ctx.is_none() {
            self.ctx = acquire_context(&self.canvas, &self.game.config().score_font);
        }
        match &self.ctx {
            Some(ctx) => render(
                &self.game,
                &mut CanvasSurface {
                    ctx,
                    assets: &self.assets,
                },
            ),
            None => log::debug!("no 2d context yet, skipping render"),
        }

        status == GameStatus::Running
    }
}

/// Key and resize listeners, bound once on start and removed on teardown.
struct Listeners {
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    resize: Closure<dyn FnMut(Event)>,
}

impl Listeners {
    fn bind(window: &Window, session: &Rc<RefCell<Session>>) -> Result<Self, JsValue> {
        let key_listener = |pressed: bool| {
            let session = session.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                session
                    .borrow_mut()
                    .game
                    .input_mut()
                    .apply_key_code(event.key_code(), pressed);
            })
        };
        let keydown = key_listener(true);
        let keyup = key_listener(false);

        let resize = {
            let session = session.clone();
            let window = window.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                session.borrow_mut().game.queue_resize(read_viewport(&window));
            })
        };

        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        Ok(Self {
            keydown,
            keyup,
            resize,
        })
    }

    fn unbind(&self, window: &Window) {
        let pairs = [
            ("keydown", self.keydown.as_ref()),
            ("keyup", self.keyup.as_ref()),
            ("resize", self.resize.as_ref()),
        ];
        for (event, callback) in pairs {
            if let Err(err) =
                window.remove_event_listener_with_callback(event, callback.unchecked_ref())
            {
                log::warn!("removing {event} listener failed: {err:?}");
            }
        }
    }
}

/// Browser host for one game, bound to a `<canvas>` element.
///
/// ```js
/// const game = new WebGame("canvas", playerUrl, invaderUrl, shootUrl);
/// game.start();
/// // on unmount
/// game.destroy();
/// ```
#[wasm_bindgen]
pub struct WebGame {
    window: Window,
    session: Rc<RefCell<Session>>,
    frame_callback: FrameCallback,
    listeners: Option<Listeners>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        player_src: &str,
        invader_src: &str,
        shoot_src: &str,
    ) -> Result<WebGame, JsValue> {
        init_logging();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{canvas_id}' is not a canvas")))?;

        let game = Game::new(GameConfig::default(), read_viewport(&window)).map_err(js_error)?;
        size_canvas(&canvas, game.playfield())?;
        let ctx = acquire_context(&canvas, &game.config().score_font);
        if ctx.is_none() {
            log::warn!("canvas has no 2d context, rendering is skipped until one appears");
        }
        let assets = WebAssets::load(player_src, invader_src, shoot_src)?;

        Ok(WebGame {
            window,
            session: Rc::new(RefCell::new(Session {
                game,
                canvas,
                ctx,
                assets,
                frame_handle: None,
            })),
            frame_callback: Rc::new(RefCell::new(None)),
            listeners: None,
        })
    }

    /// Lay out the invaders, bind input and start the frame loop.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.listeners.is_some() {
            return Ok(());
        }
        self.session.borrow_mut().game.start();
        self.listeners = Some(Listeners::bind(&self.window, &self.session)?);

        let session = self.session.clone();
        let callback = self.frame_callback.clone();
        let window = self.window.clone();
        *self.frame_callback.borrow_mut() =
            Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
                if !session.borrow_mut().on_frame(timestamp) {
                    session.borrow_mut().frame_handle = None;
                    log::info!("game over, frame loop stopped");
                    return;
                }
                if let Some(next) = callback.borrow().as_ref() {
                    match window.request_animation_frame(next.as_ref().unchecked_ref()) {
                        Ok(handle) => session.borrow_mut().frame_handle = Some(handle),
                        Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
                    }
                }
            }));

        let handle = match self.frame_callback.borrow().as_ref() {
            Some(first) => self
                .window
                .request_animation_frame(first.as_ref().unchecked_ref())?,
            None => return Ok(()),
        };
        self.session.borrow_mut().frame_handle = Some(handle);
        Ok(())
    }

    /// Cancel the pending frame and unbind every listener.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.session.borrow_mut().frame_handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {err:?}");
            }
        }
        // Dropping the callback breaks its reference cycle with itself.
        self.frame_callback.borrow_mut().take();
        if let Some(listeners) = self.listeners.take() {
            listeners.unbind(&self.window);
            log::info!("game torn down");
        }
    }

    pub fn score(&self) -> u32 {
        self.session.borrow().game.score()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session.borrow().game.is_running()
    }
}

impl Drop for WebGame {
    fn drop(&mut self) {
        self.destroy();
    }
}
