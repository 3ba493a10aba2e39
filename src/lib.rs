//! Grumble Chase core crate.
//!
//! The gameplay (`chase`) is plain Rust and is tested natively; `web` binds it
//! to a `<canvas id="gameCanvas">` page through wasm-bindgen. The page script
//! calls `start_game()` once the DOM is ready.

use wasm_bindgen::prelude::*;

pub mod chase;
pub mod config;
mod web;

pub use chase::{Field, Host, LoopController, Phase, Snapshot, Surface};
pub use config::{ChaseConfig, ConfigError, RampPolicy};
pub use web::{restart_game, set_player_color, start_game, toggle_pause};
#[cfg(feature = "serde_json")]
pub use web::{configure_game, snapshot_json};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Err only if a logger is already installed.
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}
