//! Sprite Stress - adaptive sprite population for comparing renderers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, bounds, population control)
//! - `renderer`: Renderer strategies and position handoff encoding
//! - `platform`: Frame clock and browser/native differences
//! - `peaks`: Best sustained population per renderer
//! - `settings`: Run configuration and persistence

pub mod peaks;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use peaks::PeakBoard;
pub use renderer::RendererKind;
pub use settings::Settings;
pub use sim::{Scene, SpriteModel};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Frame-time threshold in seconds (~55 fps). Faster frames grow the
    /// population, slower frames shrink it.
    pub const MIN_TICK: f64 = 1.0 / 55.0;
    /// Same threshold in milliseconds
    pub const MIN_TICK_MS: f64 = 1000.0 / 55.0;

    /// Fraction of the population added per fast tick
    pub const GROWTH_FACTOR: f64 = 0.01;
    /// Multiplier on `MIN_TICK` for the min-tick policy's decay
    pub const DECAY_SCALE: f64 = 2.0;

    /// Default downward acceleration in domain units/s²
    pub const DEFAULT_GRAVITY: f64 = 5.0;

    /// Population a fresh run starts with
    pub const DEFAULT_INITIAL_POPULATION: usize = 100;

    /// Rendered sprite size in pixels
    pub const DEFAULT_SPRITE_SIZE: f64 = 26.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
