//! Seeded generator state, threaded by value
//!
//! Every draw consumes a `GenState` and hands back the advanced one. Nothing
//! outside the update sequence holds a copy that could drift.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Opaque deterministic PRNG cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenState {
    rng: Pcg32,
}

impl GenState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from a wall-clock timestamp (ms). Uses the raw bit pattern so
    /// sub-millisecond timestamps still give distinct runs.
    pub fn from_timestamp(timestamp_ms: f64) -> Self {
        Self::from_seed(timestamp_ms.to_bits())
    }

    /// Draw a uniform value in [0, 1)
    pub fn next_unit(self) -> (f64, GenState) {
        let mut rng = self.rng;
        let value: f64 = rng.random();
        (value, GenState { rng })
    }
}

/// Closed range a sprite field is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw uniformly from the span. A degenerate span (min == max) still
    /// advances the generator so draw order stays fixed per field.
    pub fn sample(&self, rng: GenState) -> (f64, GenState) {
        let (unit, rng) = rng.next_unit();
        (self.min + (self.max - self.min) * unit, rng)
    }
}
