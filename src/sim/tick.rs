//! Per-frame simulation step
//!
//! Adjusts the population for the last frame's duration, then advances
//! every sprite. Sprites and generator state go in by value and come back
//! out; nothing is mutated behind the caller's back.

use super::population::{Adjustment, PopulationPolicy};
use super::rng::GenState;
use super::sprite::Sprite;

/// Everything the stepper needs besides the sprites and the generator
#[derive(Debug, Clone)]
pub struct SimConfig<S: Sprite> {
    pub policy: PopulationPolicy,
    pub params: S::Params,
}

impl<S: Sprite> SimConfig<S> {
    pub fn new(policy: PopulationPolicy, params: S::Params) -> Self {
        Self { policy, params }
    }
}

/// Draw `count` sprites in order, threading the generator through each draw
pub fn spawn_batch<S: Sprite>(count: usize, params: &S::Params, rng: GenState) -> (Vec<S>, GenState) {
    let mut batch = Vec::with_capacity(count);
    let mut rng = rng;
    for _ in 0..count {
        let (sprite, next) = S::spawn(params, rng);
        batch.push(sprite);
        rng = next;
    }
    (batch, rng)
}

/// Negative or NaN deltas count as zero
#[inline]
fn sanitize_ms(delta_ms: f64) -> f64 {
    if delta_ms > 0.0 { delta_ms } else { 0.0 }
}

/// Advance the simulation by one frame
pub fn step<S: Sprite>(
    delta_ms: f64,
    sprites: Vec<S>,
    rng: GenState,
    config: &SimConfig<S>,
) -> (Vec<S>, GenState) {
    let delta_ms = sanitize_ms(delta_ms);
    let delta = delta_ms / 1000.0;
    let len = sprites.len();

    // Population control sees milliseconds, kinematics see seconds
    let (population, rng) = match config.policy.adjust(len, delta_ms) {
        Adjustment::Grow(0) | Adjustment::Shrink(0) => (sprites, rng),
        Adjustment::Grow(n) => {
            let (mut batch, rng) = spawn_batch::<S>(n, &config.params, rng);
            batch.extend(sprites);
            log::trace!("population {} -> {} (+{})", len, batch.len(), n);
            (batch, rng)
        }
        Adjustment::Shrink(n) => {
            let mut sprites = sprites;
            let kept = sprites.split_off(n);
            log::trace!("population {} -> {} (-{})", len, kept.len(), n);
            (kept, rng)
        }
    };

    let next = population
        .iter()
        .map(|sprite| sprite.advance(delta, &config.params))
        .collect();

    (next, rng)
}
