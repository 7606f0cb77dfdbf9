// ==================== Imports ====================
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

pub mod browser;
pub mod config;
pub mod controls;
pub mod engine;
pub mod entities;
pub mod game;
pub mod ui;

use engine::GameLoop;
use game::Shooter;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs panic hook + console logger
/// - loads config and starts the game loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    // raised to the configured level once config.json is read
    browser::init_logging(LevelFilter::Info)
        .map_err(|err| JsValue::from_str(&format!("{:#}", err)))?;

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Shooter::new()).await {
            log::error!("Could not start game : {:#}", err);
        }
    });

    Ok(())
}
