//! Sprite shapes and their per-tick kinematics
//!
//! Two shapes exist and a run only ever uses one of them:
//! - `BounceSprite`: velocity form, falls under gravity and bounces off the
//!   floor and side walls
//! - `DriftSprite`: polar form, drifts at a fixed heading and wraps around
//!   the domain edges

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::rng::{GenState, Span};
use crate::consts::DEFAULT_GRAVITY;
use crate::polar_to_cartesian;

/// A simulated sprite. Updates return a new value instead of mutating.
pub trait Sprite: Clone + std::fmt::Debug {
    /// Motion and spawn parameters shared by every sprite of the run
    type Params: Clone + std::fmt::Debug;

    /// Draw one sprite, returning the advanced generator
    fn spawn(params: &Self::Params, rng: GenState) -> (Self, GenState);

    /// Advance by one tick of `delta` seconds
    fn advance(&self, delta: f64, params: &Self::Params) -> Self;

    /// Current position in domain coordinates
    fn position(&self) -> DVec2;
}

// ---------------------------------------------------------------------------
// Velocity form
// ---------------------------------------------------------------------------

/// Sprite with tracked velocity and a floor restitution speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceSprite {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Vertical speed assigned on floor contact
    pub bounce_speed: f64,
}

/// Ranges each bounce-sprite field is drawn from, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceSpawn {
    pub x: Span,
    pub y: Span,
    pub x_vel: Span,
    pub y_vel: Span,
    pub bounce_speed: Span,
}

impl BounceSpawn {
    /// Defaults for the unit square
    pub const UNIT: BounceSpawn = BounceSpawn {
        x: Span::new(0.0, 1.0),
        y: Span::new(0.5, 1.0),
        x_vel: Span::new(-0.5, 0.5),
        y_vel: Span::new(-1.0, 1.0),
        bounce_speed: Span::new(2.0, 3.2),
    };

    fn scaled(&self, size: DVec2) -> Self {
        let scale = |s: Span, k: f64| Span::new(s.min * k, s.max * k);
        Self {
            x: scale(self.x, size.x),
            y: scale(self.y, size.y),
            x_vel: scale(self.x_vel, size.x),
            y_vel: scale(self.y_vel, size.y),
            bounce_speed: scale(self.bounce_speed, size.y),
        }
    }
}

/// Motion parameters for bounce runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BounceParams {
    pub bounds: Bounds,
    /// Downward acceleration in domain units/s²
    pub gravity: f64,
    /// Clamp positions back into bounds after reflection
    pub clamp: bool,
    pub spawn: BounceSpawn,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self::unit(DEFAULT_GRAVITY)
    }
}

impl BounceParams {
    pub fn unit(gravity: f64) -> Self {
        Self {
            bounds: Bounds::UNIT,
            gravity,
            clamp: true,
            spawn: BounceSpawn::UNIT,
        }
    }

    /// Pixel-space run. Gravity is given in heights/s² and scaled to pixels
    /// along with the spawn ranges.
    pub fn pixels(width: f64, height: f64, gravity: f64) -> Self {
        let bounds = Bounds::pixels(width, height);
        Self {
            bounds,
            gravity: gravity * height,
            clamp: true,
            spawn: BounceSpawn::UNIT.scaled(bounds.size()),
        }
    }
}

impl Sprite for BounceSprite {
    type Params = BounceParams;

    fn spawn(params: &BounceParams, rng: GenState) -> (Self, GenState) {
        let s = &params.spawn;
        let (x, rng) = s.x.sample(rng);
        let (y, rng) = s.y.sample(rng);
        let (x_vel, rng) = s.x_vel.sample(rng);
        let (y_vel, rng) = s.y_vel.sample(rng);
        let (bounce_speed, rng) = s.bounce_speed.sample(rng);
        let sprite = BounceSprite {
            pos: DVec2::new(x, y),
            vel: DVec2::new(x_vel, y_vel),
            bounce_speed,
        };
        (sprite, rng)
    }

    fn advance(&self, delta: f64, params: &BounceParams) -> Self {
        let bounds = &params.bounds;
        let travel = self.vel * delta;

        // Side walls: elastic reflection
        let (x, x_vel) = if bounds.contains_x(self.pos.x + travel.x) {
            (self.pos.x + travel.x, self.vel.x)
        } else {
            (self.pos.x - travel.x, -self.vel.x)
        };

        // Floor: restitution to the sprite's bounce speed
        let (y, y_vel) = if self.pos.y + travel.y < bounds.min.y {
            (self.pos.y - travel.y, self.bounce_speed)
        } else {
            (self.pos.y + travel.y, self.vel.y)
        };

        let mut pos = DVec2::new(x, y);
        if params.clamp {
            pos = bounds.clamp(pos);
        }

        BounceSprite {
            pos,
            vel: DVec2::new(x_vel, y_vel - params.gravity * delta),
            bounce_speed: self.bounce_speed,
        }
    }

    fn position(&self) -> DVec2 {
        self.pos
    }
}

// ---------------------------------------------------------------------------
// Polar form
// ---------------------------------------------------------------------------

/// Sprite drifting at a fixed heading and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftSprite {
    pub pos: DVec2,
    /// Heading (radians), fixed for the sprite's lifetime
    pub angle: f64,
    /// Distance per tick, fixed for the sprite's lifetime
    pub speed: f64,
}

/// Ranges each drift-sprite field is drawn from, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftSpawn {
    pub x: Span,
    pub y: Span,
    pub angle: Span,
    pub speed: Span,
}

/// Motion parameters for wrap runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftParams {
    /// Visible domain
    pub bounds: Bounds,
    /// Wrap margin beyond the visible domain per axis (half the sprite size)
    pub margin: DVec2,
    pub spawn: DriftSpawn,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self::unit(DVec2::ZERO)
    }
}

impl DriftParams {
    /// Unit-square run. `sprite_size` is the sprite's extent in domain units
    /// on each axis, so a non-square viewport gets a different margin per axis.
    pub fn unit(sprite_size: DVec2) -> Self {
        Self {
            bounds: Bounds::UNIT,
            margin: sprite_size / 2.0,
            spawn: DriftSpawn {
                x: Span::new(0.0, 1.0),
                y: Span::new(0.0, 1.0),
                angle: Span::new(0.0, TAU),
                speed: Span::new(0.001, 0.005),
            },
        }
    }

    pub fn pixels(width: f64, height: f64, sprite_size: f64) -> Self {
        Self {
            bounds: Bounds::pixels(width, height),
            margin: DVec2::splat(sprite_size / 2.0),
            spawn: DriftSpawn {
                x: Span::new(0.0, width),
                y: Span::new(0.0, height),
                angle: Span::new(0.0, TAU),
                speed: Span::new(1.0, 5.0),
            },
        }
    }

    /// Rectangle a sprite may occupy before it wraps
    pub fn wrap_bounds(&self) -> Bounds {
        self.bounds.expanded(self.margin)
    }
}

impl Sprite for DriftSprite {
    type Params = DriftParams;

    fn spawn(params: &DriftParams, rng: GenState) -> (Self, GenState) {
        let s = &params.spawn;
        let (x, rng) = s.x.sample(rng);
        let (y, rng) = s.y.sample(rng);
        let (angle, rng) = s.angle.sample(rng);
        let (speed, rng) = s.speed.sample(rng);
        let sprite = DriftSprite {
            pos: DVec2::new(x, y),
            angle,
            speed,
        };
        (sprite, rng)
    }

    /// Moves one step along the heading regardless of `delta`
    fn advance(&self, _delta: f64, params: &DriftParams) -> Self {
        let next = self.pos + polar_to_cartesian(self.speed, self.angle);
        DriftSprite {
            pos: params.wrap_bounds().wrap(next),
            ..*self
        }
    }

    fn position(&self) -> DVec2 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_clamp() -> BounceParams {
        BounceParams {
            clamp: false,
            ..BounceParams::unit(10.0)
        }
    }

    #[test]
    fn test_side_wall_reflects() {
        let sprite = BounceSprite {
            pos: DVec2::new(0.99, 0.5),
            vel: DVec2::new(1.0, 0.0),
            bounce_speed: 3.0,
        };
        let delta = 0.02;
        let next = sprite.advance(delta, &no_clamp());
        assert_eq!(next.vel.x, -1.0);
        assert!((next.pos.x - (0.99 - 1.0 * delta)).abs() < 1e-12);
    }

    #[test]
    fn test_left_wall_reflects() {
        let sprite = BounceSprite {
            pos: DVec2::new(0.01, 0.5),
            vel: DVec2::new(-2.0, 0.0),
            bounce_speed: 3.0,
        };
        let next = sprite.advance(0.1, &BounceParams::unit(5.0));
        assert_eq!(next.vel.x, 2.0);
        assert!((next.pos.x - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_floor_resets_to_bounce_speed() {
        let sprite = BounceSprite {
            pos: DVec2::new(0.5, 0.01),
            vel: DVec2::new(0.0, -5.0),
            bounce_speed: 3.0,
        };
        let params = BounceParams {
            gravity: 0.0,
            ..no_clamp()
        };
        let next = sprite.advance(0.1, &params);
        assert_eq!(next.vel.y, 3.0);
        assert!((next.pos.y - 0.51).abs() < 1e-12);
    }

    #[test]
    fn test_gravity_applied_after_floor_reset() {
        let sprite = BounceSprite {
            pos: DVec2::new(0.5, 0.01),
            vel: DVec2::new(0.0, -5.0),
            bounce_speed: 3.0,
        };
        let next = sprite.advance(0.1, &no_clamp());
        // 3.0 - 10.0 * 0.1
        assert!((next.vel.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_gravity_in_free_flight() {
        let sprite = BounceSprite {
            pos: DVec2::new(0.5, 0.5),
            vel: DVec2::new(0.0, 0.0),
            bounce_speed: 3.0,
        };
        let next = sprite.advance(0.05, &BounceParams::unit(5.0));
        assert_eq!(next.pos, DVec2::new(0.5, 0.5));
        assert!((next.vel.y + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_zero_delta_no_motion() {
        let sprite = BounceSprite {
            pos: DVec2::new(0.3, 0.4),
            vel: DVec2::new(0.7, -0.2),
            bounce_speed: 2.5,
        };
        let next = sprite.advance(0.0, &BounceParams::unit(5.0));
        assert_eq!(next, sprite);
    }

    #[test]
    fn test_clamp_keeps_reflected_velocity() {
        // A huge delta reflects far outside; clamp pulls position back in
        let sprite = BounceSprite {
            pos: DVec2::new(0.9, 0.5),
            vel: DVec2::new(1.0, 0.0),
            bounce_speed: 3.0,
        };
        let next = sprite.advance(5.0, &BounceParams::unit(0.0));
        assert_eq!(next.pos.x, 0.0);
        assert_eq!(next.vel.x, -1.0);
    }

    #[test]
    fn test_pixel_params_scale() {
        let params = BounceParams::pixels(800.0, 600.0, 5.0);
        assert_eq!(params.gravity, 3000.0);
        assert_eq!(params.spawn.x, Span::new(0.0, 800.0));
        assert_eq!(params.spawn.bounce_speed.min, 1200.0);
    }

    #[test]
    fn test_pixel_right_wall_reflects() {
        let sprite = BounceSprite {
            pos: DVec2::new(790.0, 300.0),
            vel: DVec2::new(400.0, 0.0),
            bounce_speed: 1500.0,
        };
        for clamp in [true, false] {
            let params = BounceParams {
                clamp,
                ..BounceParams::pixels(800.0, 600.0, 5.0)
            };
            let next = sprite.advance(0.05, &params);
            assert_eq!(next.vel.x, -400.0);
            assert!((next.pos.x - 770.0).abs() < 1e-9);
            assert_eq!(next.pos.y, 300.0);
        }
    }

    #[test]
    fn test_pixel_overshoot_clamped_only_when_enabled() {
        // 400 px/s over 5 s reflects far past the left edge at 0
        let sprite = BounceSprite {
            pos: DVec2::new(790.0, 300.0),
            vel: DVec2::new(400.0, 0.0),
            bounce_speed: 1500.0,
        };
        let clamped = sprite.advance(5.0, &BounceParams::pixels(800.0, 600.0, 5.0));
        assert_eq!(clamped.pos.x, 0.0);
        assert_eq!(clamped.vel.x, -400.0);

        let free = sprite.advance(
            5.0,
            &BounceParams {
                clamp: false,
                ..BounceParams::pixels(800.0, 600.0, 5.0)
            },
        );
        assert!((free.pos.x + 1210.0).abs() < 1e-9);
        assert_eq!(free.vel.x, -400.0);
    }

    #[test]
    fn test_drift_wraps_to_min() {
        let params = DriftParams::pixels(800.0, 600.0, 26.0);
        let wrap = params.wrap_bounds();
        let sprite = DriftSprite {
            pos: DVec2::new(wrap.max.x + 1.0, 300.0),
            angle: 0.0,
            speed: 0.0,
        };
        let next = sprite.advance(0.016, &params);
        assert_eq!(next.pos.x, wrap.min.x);
        assert_eq!(next.pos.x, -13.0);
        assert_eq!(next.angle, sprite.angle);
        assert_eq!(next.speed, sprite.speed);
    }

    #[test]
    fn test_drift_wraps_y_independently() {
        let params = DriftParams::pixels(800.0, 600.0, 20.0);
        let sprite = DriftSprite {
            pos: DVec2::new(400.0, -9.0),
            angle: -std::f64::consts::FRAC_PI_2,
            speed: 2.0,
        };
        let next = sprite.advance(0.016, &params);
        assert_eq!(next.pos.y, 610.0);
        assert!((next.pos.x - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_drift_ignores_delta() {
        let params = DriftParams::unit(DVec2::ZERO);
        let sprite = DriftSprite {
            pos: DVec2::new(0.5, 0.5),
            angle: 0.0,
            speed: 0.01,
        };
        let a = sprite.advance(0.001, &params);
        let b = sprite.advance(1.0, &params);
        assert_eq!(a, b);
        assert!((a.pos.x - 0.51).abs() < 1e-12);
    }

    #[test]
    fn test_spawn_within_ranges() {
        let params = DriftParams::pixels(640.0, 480.0, 26.0);
        let mut rng = GenState::from_seed(3);
        for _ in 0..200 {
            let (s, next) = DriftSprite::spawn(&params, rng);
            assert!((0.0..=640.0).contains(&s.pos.x));
            assert!((0.0..=480.0).contains(&s.pos.y));
            assert!((0.0..=TAU).contains(&s.angle));
            assert!((1.0..=5.0).contains(&s.speed));
            rng = next;
        }
    }
}
