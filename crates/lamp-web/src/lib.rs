pub mod runner;

pub use runner::{EffectRunner, WebHost};

use std::cell::RefCell;
use lamp_engine::{LampSettings, Rect, WindowId};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<EffectRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. `None` (with a warning) before `lamp_init`.
fn with_runner<R>(f: impl FnOnce(&mut EffectRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("magic lamp not initialized, call lamp_init() first");
                None
            }
        }
    })
}

fn parse_settings(json: &str) -> LampSettings {
    if json.trim().is_empty() {
        return LampSettings::default();
    }
    match LampSettings::from_json(json) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("invalid magic lamp settings, using defaults: {}", e);
            LampSettings::default()
        }
    }
}

#[wasm_bindgen]
pub fn lamp_init(settings_json: &str, screen_width: f32, screen_height: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let settings = parse_settings(settings_json);
    let runner = EffectRunner::new(&settings, Rect::new(0.0, 0.0, screen_width, screen_height));
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("magic lamp: initialized");
}

#[wasm_bindgen]
pub fn lamp_reconfigure(settings_json: &str) {
    let settings = parse_settings(settings_json);
    with_runner(|r| r.reconfigure(&settings));
}

#[wasm_bindgen]
pub fn lamp_set_screen(width: f32, height: f32) {
    with_runner(|r| r.set_screen(Rect::new(0.0, 0.0, width, height)));
}

// ---- Window events ----

#[wasm_bindgen]
pub fn lamp_window_added(id: u32, x: f32, y: f32, width: f32, height: f32) {
    with_runner(|r| r.window_added(WindowId(id), Rect::new(x, y, width, height)));
}

#[wasm_bindgen]
pub fn lamp_window_deleted(id: u32) {
    with_runner(|r| r.window_deleted(WindowId(id)));
}

#[wasm_bindgen]
pub fn lamp_set_window_geometry(id: u32, x: f32, y: f32, width: f32, height: f32) {
    with_runner(|r| r.set_window_geometry(WindowId(id), Rect::new(x, y, width, height)));
}

/// A zero-sized rect clears the icon geometry.
#[wasm_bindgen]
pub fn lamp_set_icon_geometry(id: u32, x: f32, y: f32, width: f32, height: f32) {
    with_runner(|r| r.set_icon_geometry(WindowId(id), Rect::new(x, y, width, height)));
}

/// Returns whether an animation started.
#[wasm_bindgen]
pub fn lamp_set_minimized(id: u32, minimized: bool, now_ms: f64) -> bool {
    with_runner(|r| r.set_minimized(WindowId(id), minimized, now_ms)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn lamp_set_fullscreen_effect(active: bool) {
    with_runner(|r| r.set_fullscreen_effect(active));
}

/// Advance to `now_ms` and rebuild the mesh. Returns whether another frame
/// is needed.
#[wasm_bindgen]
pub fn lamp_frame(now_ms: f64) -> bool {
    with_runner(|r| r.frame(now_ms)).unwrap_or(false)
}

/// Whether the effect asked for a full repaint since the last call.
#[wasm_bindgen]
pub fn lamp_take_repaint() -> bool {
    with_runner(|r| r.take_repaint()).unwrap_or(false)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_vertices_ptr() -> *const f32 {
    with_runner(|r| r.mesh().vertices_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_vertex_count() -> u32 {
    with_runner(|r| r.mesh().vertex_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_batches_ptr() -> *const u32 {
    with_runner(|r| r.mesh().batches_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_batch_count() -> u32 {
    with_runner(|r| r.mesh().batch_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_clip_rects_ptr() -> *const f32 {
    with_runner(|r| r.mesh().clip_rects_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_clip_rect_count() -> u32 {
    with_runner(|r| r.mesh().clip_rect_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_animating_windows() -> js_sys::Uint32Array {
    let ids = with_runner(|r| r.animating_windows()).unwrap_or_default();
    js_sys::Uint32Array::from(ids.as_slice())
}
