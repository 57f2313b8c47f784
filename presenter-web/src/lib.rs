//! Presenter overlay for a browser-hosted map editor.
//!
//! Mounts a bottom sheet of fact cards with a toggle chip, persists the
//! sheet height in `localStorage`, and can push the nation's map file into
//! the host editor.

pub mod config;

#[cfg(target_arch = "wasm32")]
mod assets;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod loader;
#[cfg(target_arch = "wasm32")]
pub mod mount;
#[cfg(target_arch = "wasm32")]
mod sheet;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use config::{ConfigError, ElementIds, PresenterConfig};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    mount::boot()
}

/// Re-read the host's population figure into the stats field.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = presenterRefreshStats)]
pub fn refresh_stats() -> Result<(), JsValue> {
    let cfg = config::from_global()
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .unwrap_or_else(PresenterConfig::defaults);
    loader::refresh_stats(&cfg.host.stats, &cfg.ids.stat);
    Ok(())
}
