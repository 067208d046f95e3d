//! Browser bridge: `#[wasm_bindgen]` exports around a single [`WebRunner`].
//!
//! ```text
//! swarm_init_with_config(json, w, h)   // once
//! swarm_attach_canvas("particles")     // optional, paints directly
//! requestAnimationFrame(t => swarm_frame(t))
//! ```
//!
//! Pointer, start and resize calls are queued and take effect on the next
//! `swarm_frame`.

pub mod canvas;
pub mod runner;

pub use canvas::{CanvasPainter, CanvasRasterizer};
pub use runner::WebRunner;

use std::cell::RefCell;

use glyphdust::{InputEvent, SwarmConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = RefCell::new(None);
}

/// Run `f` on the runner. `None` before `swarm_init`.
fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::debug!("swarm not initialized, call swarm_init() first");
                None
            }
        }
    })
}

fn install(config: SwarmConfig, width: f32, height: f32) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut runner = WebRunner::new(config)?;
    runner.init(width, height);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("glyphdust: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn swarm_init(width: f32, height: f32) -> Result<(), JsValue> {
    install(SwarmConfig::default(), width, height)
}

/// Like `swarm_init`, with a JSON config. Missing fields take their defaults.
#[wasm_bindgen]
pub fn swarm_init_with_config(json: &str, width: f32, height: f32) -> Result<(), JsValue> {
    let config = SwarmConfig::from_json(json)
        .map_err(|err| JsValue::from_str(&format!("invalid swarm config: {}", err)))?;
    install(config, width, height)
}

#[wasm_bindgen]
pub fn swarm_attach_canvas(id: &str) -> Result<(), JsValue> {
    with_runner(|r| r.attach_canvas(id))
        .unwrap_or_else(|| Err(JsValue::from_str("swarm not initialized")))
}

/// Frame callback with the `requestAnimationFrame` timestamp. Returns whether a frame was rendered.
#[wasm_bindgen]
pub fn swarm_frame(now: f64) -> bool {
    with_runner(|r| r.frame(now)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn swarm_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn swarm_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn swarm_start() {
    with_runner(|r| r.push_input(InputEvent::Start));
}

#[wasm_bindgen]
pub fn swarm_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_dots_ptr() -> *const f32 {
    with_runner(|r| r.dots_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_dot_count() -> u32 {
    with_runner(|r| r.dot_count()).unwrap_or(0)
}

/// UI signals of the last rendered frame: 1 = hide start, 2 = show start.
#[wasm_bindgen]
pub fn get_signals_ptr() -> *const u8 {
    with_runner(|r| r.signals_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_signals_len() -> u32 {
    with_runner(|r| r.signals_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_header_floats() -> u32 {
    with_runner(|r| r.header_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_caption_opacity() -> f32 {
    with_runner(|r| r.caption_opacity()).unwrap_or(0.0)
}

/// 0 = random, 1 = forming, 2 = formed.
#[wasm_bindgen]
pub fn get_state() -> u32 {
    with_runner(|r| r.state()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_start_visible() -> bool {
    with_runner(|r| r.start_visible()).unwrap_or(false)
}
