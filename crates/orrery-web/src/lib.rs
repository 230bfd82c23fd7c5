//! Browser bridge for the orrery.
//!
//! One `OrreryRunner` lives in a `thread_local!`; JS drives it through the
//! free functions below and reads the packed frame straight out of wasm memory
//! using the pointer accessors. Calls made before `orrery_init` (or after
//! `orrery_shutdown`) are no-ops that return zero or null.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use orrery_engine::{layouts, OrreryConfig};

pub mod runner;

pub use runner::OrreryRunner;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn install(config: OrreryConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = OrreryRunner::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    Ok(())
}

/// Start with a built-in layout: `"desktop"` or `"compact"`.
#[wasm_bindgen]
pub fn orrery_init(layout: &str) -> Result<(), JsValue> {
    let config = layouts::by_name(layout)
        .ok_or_else(|| JsValue::from_str(&format!("unknown layout {:?}", layout)))?;
    install(config)?;
    log::info!("orrery: initialized with {} layout", layout);
    Ok(())
}

/// Start from a JSON `OrreryConfig`.
#[wasm_bindgen]
pub fn orrery_init_json(json: &str) -> Result<(), JsValue> {
    let config = OrreryConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    install(config)?;
    log::info!("orrery: initialized from JSON");
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn orrery_select(id: u32) {
    with_runner(|r| r.select(id));
}

#[wasm_bindgen]
pub fn orrery_select_name(name: &str) {
    with_runner(|r| r.select_name(name));
}

#[wasm_bindgen]
pub fn orrery_deselect() {
    with_runner(|r| r.deselect());
}

/// Pass -1 to clear hover.
#[wasm_bindgen]
pub fn orrery_hover(id: i32) {
    with_runner(|r| r.hover(id));
}

#[wasm_bindgen]
pub fn orrery_pick(ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) {
    with_runner(|r| r.pick([ox, oy, oz], [dx, dy, dz]));
}

/// `pixels` is RGBA8 `ImageData` of the body's logo.
#[wasm_bindgen]
pub fn orrery_color_sampled(id: u32, pixels: &[u8]) {
    with_runner(|r| r.color_sampled(id, pixels));
}

/// Stop the simulation and drop the runner.
#[wasm_bindgen]
pub fn orrery_shutdown() {
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.shutdown();
        }
    });
}

#[wasm_bindgen]
pub fn orrery_body_name(id: u32) -> Option<String> {
    with_runner(|r| r.body_name(id)).flatten()
}

/// Body id for `name`, or -1.
#[wasm_bindgen]
pub fn orrery_body_id(name: &str) -> i32 {
    with_runner(|r| r.body_id(name))
        .flatten()
        .map_or(-1, |id| id as i32)
}

/// Orbit ring of body `id` as `samples` flat xyz triples, for drawing once at
/// startup. Empty for the central body or an unknown id.
#[wasm_bindgen]
pub fn orrery_orbit_path(id: u32, samples: u32) -> Vec<f32> {
    with_runner(|r| r.orbit_path(id, samples)).unwrap_or_default()
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_len() -> u32 {
    with_runner(|r| r.buffer_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_bodies_ptr() -> *const f32 {
    with_runner(|r| r.bodies_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_comets_ptr() -> *const f32 {
    with_runner(|r| r.comets_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_comet_count() -> u32 {
    with_runner(|r| r.comet_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count()).unwrap_or(0)
}
