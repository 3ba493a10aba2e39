//! Browser binding: canvas drawing, `requestAnimationFrame` / `setInterval`
//! scheduling and DOM wiring for the page controls.
//!
//! Expected page elements: `#gameCanvas` (required), `#seconds`,
//! `#final-seconds`, `#game-over-screen`, `#pause-button`, `#restart-button`,
//! `#player-color`. Optional ones that are missing are logged and skipped.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, HtmlInputElement,
    Window, window,
};

use crate::chase::{Field, Host, LoopController, Phase, Surface};
use crate::config::ChaseConfig;

const CANVAS_ID: &str = "gameCanvas";
const GAME_OVER_PROMPT: &str = "Game Over! Would you like to return to the website you came from?";

struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, size, size);
    }

    fn draw_sprite(&mut self, x: f64, y: f64, size: f64) -> bool {
        // `complete` is also true for a failed load; natural_width tells them apart.
        if !self.sprite.complete() || self.sprite.natural_width() == 0 {
            return false;
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(&self.sprite, x, y, size, size)
            .is_ok()
    }
}

struct WebHost {
    window: Window,
    document: Document,
    frame_cb: js_sys::Function,
    clock_cb: js_sys::Function,
    interval: Option<i32>,
    confirm_on_game_over: bool,
}

impl WebHost {
    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn offer_to_leave(&self) {
        if !self.confirm_on_game_over {
            return;
        }
        if let Ok(true) = self.window.confirm_with_message(GAME_OVER_PROMPT) {
            if let Ok(history) = self.window.history() {
                let _ = history.back();
            }
        }
    }
}

impl Host for WebHost {
    fn request_frame(&mut self) {
        if let Err(e) = self.window.request_animation_frame(&self.frame_cb) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }

    fn arm_clock(&mut self) {
        if self.interval.is_some() {
            return;
        }
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(&self.clock_cb, 1000)
        {
            Ok(handle) => self.interval = Some(handle),
            Err(e) => log::error!("setInterval failed: {e:?}"),
        }
    }

    fn disarm_clock(&mut self) {
        if let Some(handle) = self.interval.take() {
            self.window.clear_interval_with_handle(handle);
        }
    }

    fn seconds_changed(&mut self, secs: u32) {
        self.set_text("seconds", &secs.to_string());
    }

    fn phase_changed(&mut self, phase: Phase, secs: u32) {
        match phase {
            Phase::Running => {
                self.set_hidden("game-over-screen", true);
                self.set_text("pause-button", "Pause");
            }
            Phase::Paused => self.set_text("pause-button", "Resume"),
            Phase::GameOver => {
                self.set_text("final-seconds", &secs.to_string());
                self.set_hidden("game-over-screen", false);
                self.offer_to_leave();
            }
        }
    }
}

struct WebGame {
    controller: LoopController,
    host: WebHost,
    surface: CanvasSurface,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
    static CONFIG: RefCell<ChaseConfig> = RefCell::new(ChaseConfig::default());
}

/// Run `f` against the live game. Skipped (None) before `start_game` or if a
/// callback fires while the game is already borrowed (e.g. during `confirm`).
fn with_game<R>(f: impl FnOnce(&mut WebGame) -> R) -> Option<R> {
    GAME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => None,
    })
}

fn random_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom unavailable ({e}); seeding from clock");
            js_sys::Date::now() as u64
        }
    }
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_listeners(doc: &Document) -> Result<(), JsValue> {
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        listen(doc, event, move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            if with_game(|g| g.controller.key_event(&key, pressed)).unwrap_or(false) {
                // Keep arrow keys from scrolling the page.
                evt.prevent_default();
            }
        })?;
    }

    match doc.get_element_by_id("player-color") {
        Some(el) => {
            let picker: HtmlInputElement = el.dyn_into()?;
            let initial = picker.value();
            if !initial.is_empty() {
                with_game(|g| g.controller.set_player_color(&initial));
            }
            let source = picker.clone();
            listen(&picker, "input", move |_evt: web_sys::Event| {
                let color = source.value();
                with_game(|g| g.controller.set_player_color(&color));
            })?;
        }
        None => log::warn!("#player-color not found; player color fixed"),
    }

    match doc.get_element_by_id("pause-button") {
        Some(el) => listen(&el, "click", |_evt: web_sys::Event| {
            toggle_pause();
        })?,
        None => log::warn!("#pause-button not found"),
    }

    match doc.get_element_by_id("restart-button") {
        Some(el) => listen(&el, "click", |_evt: web_sys::Event| {
            restart_game();
        })?,
        None => log::warn!("#restart-button not found"),
    }
    Ok(())
}

/// Bind to `#gameCanvas` and start the first round. Calling it again restarts.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    if with_game(|g| g.controller.restart(&mut g.host)).is_some() {
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("missing #gameCanvas"))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;

    let config = CONFIG.with(|c| c.borrow().clone());
    let sprite = HtmlImageElement::new()?;
    sprite.set_src(&config.sprite_url);

    // Handed to JS for the lifetime of the page.
    let frame_cb: js_sys::Function = Closure::wrap(Box::new(|_ts: f64| {
        with_game(|g| {
            let WebGame {
                controller,
                host,
                surface,
            } = g;
            controller.frame(host, surface);
        });
    }) as Box<dyn FnMut(f64)>)
    .into_js_value()
    .unchecked_into();
    let clock_cb: js_sys::Function = Closure::wrap(Box::new(|| {
        with_game(|g| g.controller.clock_tick(&mut g.host));
    }) as Box<dyn FnMut()>)
    .into_js_value()
    .unchecked_into();

    let field = Field::new(canvas.width() as f64, canvas.height() as f64);
    let seed = random_seed();
    log::info!("binding #{CANVAS_ID} ({}x{}), seed {seed}", field.width, field.height);

    let game = WebGame {
        host: WebHost {
            window: win,
            document: doc.clone(),
            frame_cb,
            clock_cb,
            interval: None,
            confirm_on_game_over: config.confirm_on_game_over,
        },
        controller: LoopController::new(config, field, seed),
        surface: CanvasSurface { ctx, sprite },
    };
    GAME.with(|cell| *cell.borrow_mut() = Some(game));

    install_listeners(&doc)?;
    with_game(|g| g.controller.start(&mut g.host));
    Ok(())
}

#[wasm_bindgen]
pub fn toggle_pause() {
    with_game(|g| g.controller.toggle_pause(&mut g.host));
}

#[wasm_bindgen]
pub fn restart_game() {
    with_game(|g| g.controller.restart(&mut g.host));
}

#[wasm_bindgen]
pub fn set_player_color(color: &str) {
    with_game(|g| g.controller.set_player_color(color));
}

/// Apply a partial JSON config. Before `start_game` it is used for the first
/// round; afterwards the running game restarts with it (sprite excluded).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure_game(json: &str) -> Result<(), JsValue> {
    let config = ChaseConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    CONFIG.with(|c| *c.borrow_mut() = config.clone());
    with_game(|g| {
        g.host.confirm_on_game_over = config.confirm_on_game_over;
        g.controller.reconfigure(config, &mut g.host);
    });
    Ok(())
}

/// Current entities, timer and phase as JSON, for page-side overlays.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn snapshot_json() -> Result<String, JsValue> {
    let snapshot = with_game(|g| g.controller.snapshot())
        .ok_or_else(|| JsValue::from_str("game not started"))?;
    serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
}
