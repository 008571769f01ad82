//! Dyeflow Engine - stable-fluids ink simulation in WASM
//!
//! Architecture:
//! - core/        - Field storage, kernel dispatch, safety macros
//! - domain/      - Configuration and errors
//! - systems/     - Solver stages (advect, diffuse, force, project, walls)
//! - simulation/  - Tick orchestration, rendering, host facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

/// Debug builds also report ignored pointer input.
#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::utils::console::install_console_logger(DEFAULT_LOG_LEVEL);

    web_sys::console::log_1(&"Dyeflow WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::dispatch::{Dispatcher, KernelId};
pub use crate::core::field::{Field, FieldId, FieldStore, Quantity};
pub use domain::config::{FluidConfig, PingPongPolicy};
pub use domain::error::SimError;
pub use simulation::{FluidCore, MouseState, PerfStats, Surface, World};
