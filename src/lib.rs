#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Arena
//!
//! The world core of a top-down arena game on procedurally generated,
//! destructible voxel terrain.
//!
//! The world is an endless grid of tiles generated from seeded noise and
//! streamed in square chunks around the player. Rock and trees block
//! movement; attacks destroy them and builders place new blocks.
//!
//! ## Key Modules
//!
//! * `application_state` - Input: winit events or a script, reduced to one snapshot per tick
//! * `config` - JSON configuration with defaults for every field
//! * `engine_state` - The simulation: world, player, combat and the renderer interface
//! * `error` - Error types
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_arena::{
//!     application_state::InputSnapshot,
//!     config::GameConfig,
//!     engine_state::{rendering::HeadlessRenderer, GameState},
//! };
//! use web_time::Duration;
//!
//! let mut renderer = HeadlessRenderer::new();
//! let mut state = GameState::new(GameConfig::default(), &mut renderer);
//! state.tick(&InputSnapshot::walking(1.0, 0.0), Duration::from_millis(16), &mut renderer);
//! ```

pub mod application_state;
pub mod config;
pub mod engine_state;
pub mod error;

/// Installs the logger for the current platform.
///
/// Native builds log to stdout through `env_logger`, filtered by `RUST_LOG`.
/// Browser builds log to the console at `Info` and route panics there too.
/// Calling this more than once is harmless.
pub fn init_logger() {
    cfg_if::cfg_if! {
        if #[cfg(target_family = "wasm")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if console_log::init_with_level(log::Level::Info).is_err() {
                log::debug!("logger already initialized");
            }
        } else {
            let mut log_builder = env_logger::Builder::new();
            log_builder
                .target(env_logger::Target::Stdout)
                .parse_env("RUST_LOG");
            if log_builder.try_init().is_err() {
                log::debug!("logger already initialized");
            }
        }
    }
    log::info!("Logger initialized");
}
