//! Frame-time driven population control
//!
//! Fast frames add sprites, slow frames remove them. The switch is a strict
//! comparison against `MIN_TICK_MS` with no hysteresis band, so a renderer
//! that sits right at the threshold will oscillate. Frame times are compared
//! in milliseconds, so a frame of exactly `MIN_TICK_MS` sits on the threshold.

use serde::{Deserialize, Serialize};

use crate::consts::{DECAY_SCALE, GROWTH_FACTOR, MIN_TICK, MIN_TICK_MS};

/// How the population reacts to the last frame's duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PopulationPolicy {
    /// Add or drop the same ~1% batch depending on the frame time
    #[default]
    Smidge,
    /// Drop aggressively (2 × `MIN_TICK` of the population) on slow frames,
    /// grow by a rounded 1% on fast ones
    MinTick,
}

/// Change to apply to the sprite collection this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Generate this many sprites and prepend them
    Grow(usize),
    /// Drop this many sprites from the front
    Shrink(usize),
}

impl PopulationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopulationPolicy::Smidge => "Smidge",
            PopulationPolicy::MinTick => "MinTick",
        }
    }

    /// Decide the adjustment for a collection of `len` sprites after a frame
    /// that took `delta_ms` milliseconds. Never shrinks below one sprite.
    pub fn adjust(&self, len: usize, delta_ms: f64) -> Adjustment {
        let floor_cap = len.saturating_sub(1);
        match self {
            PopulationPolicy::Smidge => {
                let smidge = floor_cap.min((GROWTH_FACTOR * len as f64).ceil() as usize);
                if delta_ms < MIN_TICK_MS {
                    Adjustment::Grow(smidge)
                } else {
                    Adjustment::Shrink(smidge)
                }
            }
            PopulationPolicy::MinTick => {
                if delta_ms > MIN_TICK_MS {
                    let decrease = (len as f64 * DECAY_SCALE * MIN_TICK).ceil() as usize;
                    Adjustment::Shrink(floor_cap.min(decrease))
                } else {
                    Adjustment::Grow((len as f64 * GROWTH_FACTOR).round() as usize)
                }
            }
        }
    }
}
