//! Simulation domain rectangles
//!
//! Bounds are passed into the stepper explicitly. Unit-square runs use
//! `Bounds::UNIT`, pixel-space runs use `Bounds::pixels(width, height)`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned domain rectangle (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Bounds {
    /// Normalized [0,1]×[0,1] domain
    pub const UNIT: Bounds = Bounds {
        min: DVec2::ZERO,
        max: DVec2::ONE,
    };

    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Pixel-space domain [0,width]×[0,height]
    pub fn pixels(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }

    /// Grow the x edges by `margin.x` and the y edges by `margin.y`. Wrap
    /// runs use half a sprite so sprites slide fully off-screen before
    /// re-entering.
    pub fn expanded(&self, margin: DVec2) -> Self {
        Self::new(self.min - margin, self.max + margin)
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min.x && x <= self.max.x
    }

    /// Clamp a point into the rectangle
    #[inline]
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Toroidal wrap of one coordinate: leaving past one edge lands exactly
    /// on the opposite edge.
    #[inline]
    pub fn wrap_axis(v: f64, min: f64, max: f64) -> f64 {
        if v < min {
            max
        } else if v > max {
            min
        } else {
            v
        }
    }

    pub fn wrap(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            Self::wrap_axis(p.x, self.min.x, self.max.x),
            Self::wrap_axis(p.y, self.min.y, self.max.y),
        )
    }
}
