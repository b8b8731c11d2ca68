//! Petro - a minimal software-rendered frame engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, collision gate, direction)
//! - `renderer`: Software rasterizer writing into a borrowed pixel buffer
//! - `sprite`: 32-bit bitmap sprite loading
//! - `game`: Frame driver tying input, simulation and drawing together
//! - `platform`: Native window shell (winit + pixels)

pub mod error;
pub mod game;
pub mod math;
#[cfg(not(target_arch = "wasm32"))]
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use error::{Error, Result};
pub use game::Game;
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Simulation time advanced by one tick (placeholder unit step)
    pub const SIM_DT: f32 = 1.0;
    /// Default number of fixed ticks per wall-clock second
    pub const DEFAULT_TICK_RATE_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame the accumulator will absorb (seconds)
    pub const MAX_FRAME_SECS: f32 = 0.1;

    /// Maximum number of live entities
    pub const ENTITY_CAPACITY: usize = 32;

    /// Linear drag: fraction of velocity subtracted from the force each tick
    pub const DAMPING: f32 = 0.05;
    /// Input force magnitude without the boost key
    pub const BASE_SPEED: f32 = 1.0;
    /// Input force magnitude while the boost key is held
    pub const BOOST_SPEED: f32 = 5.0;

    /// Blend weight of the debug overlay drawn over entity bounds
    pub const OVERLAY_ALPHA: f32 = 0.5;
}

/// Round a float to the nearest integer the way the blender quantizes channels
/// (add one half, truncate toward zero).
#[inline]
pub fn round_float_to_int(value: f32) -> i32 {
    (value + 0.5) as i32
}
