//! Browser bridge: exports the experience to JavaScript.
//!
//! Call `experience_init` once, forward pointer events, call
//! `experience_tick` every animation frame and render from
//! `experience_snapshot`.

pub mod entropy;
pub mod haptics;
pub mod runner;
pub mod storage;

use std::cell::RefCell;

use not_today_engine::{Dictionary, ExperienceConfig, InputEvent, Millis};
use wasm_bindgen::prelude::*;

pub use runner::ExperienceRunner;

thread_local! {
    static RUNNER: RefCell<Option<ExperienceRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut ExperienceRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Experience not initialized. Call experience_init() first.");
        f(runner)
    })
}

fn now() -> Millis {
    js_sys::Date::now() as Millis
}

/// Load the word list (a JSON array of strings) and optional config
/// overrides, then start idle.
#[wasm_bindgen]
pub fn experience_init(words_json: &str, config_json: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let dictionary = Dictionary::from_json(words_json)?;
    let config = match config_json {
        Some(json) => ExperienceConfig::from_json(&json)?,
        None => ExperienceConfig::default(),
    };
    let words = dictionary.len();
    let runner = ExperienceRunner::new(config, dictionary);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("not-today: initialized with {} words", words);
    Ok(())
}

#[wasm_bindgen]
pub fn experience_tick() {
    with_runner(|r| r.tick(now()));
}

#[wasm_bindgen]
pub fn experience_pointer_down() {
    with_runner(|r| r.push_input(InputEvent::PointerDown { at: now() }));
}

#[wasm_bindgen]
pub fn experience_pointer_up() {
    with_runner(|r| r.push_input(InputEvent::PointerUp { at: now() }));
}

#[wasm_bindgen]
pub fn experience_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave { at: now() }));
}

#[wasm_bindgen]
pub fn experience_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel { at: now() }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn experience_snapshot() -> Result<String, JsError> {
    Ok(with_runner(|r| r.snapshot_json())?)
}

/// Drains the pending events.
#[wasm_bindgen]
pub fn experience_events() -> Result<String, JsError> {
    Ok(with_runner(|r| r.events_json())?)
}

#[wasm_bindgen]
pub fn experience_ring_paths(seed: u32) -> Result<String, JsError> {
    Ok(runner::ring_paths_json(u64::from(seed))?)
}
