//! Run state: the sprite collection plus the generator that feeds it
//!
//! A `World` is a value. `tick` consumes it and returns the next one, so a
//! presenter holding the previous sprites never sees them change.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::population::PopulationPolicy;
use super::rng::GenState;
use super::sprite::{BounceParams, BounceSprite, DriftParams, DriftSprite, Sprite};
use super::tick::{SimConfig, spawn_batch, step};

/// Sprites and generator state for one run
#[derive(Debug, Clone)]
pub struct World<S: Sprite> {
    sprites: Vec<S>,
    rng: GenState,
    config: SimConfig<S>,
    time_ticks: u64,
}

impl<S: Sprite> World<S> {
    /// Seed the generator from `seed_timestamp` and spawn the initial
    /// population (at least one sprite)
    pub fn new(seed_timestamp: f64, initial_population: usize, config: SimConfig<S>) -> Self {
        Self::with_rng(GenState::from_timestamp(seed_timestamp), initial_population, config)
    }

    pub fn with_rng(rng: GenState, initial_population: usize, config: SimConfig<S>) -> Self {
        let (sprites, rng) = spawn_batch(initial_population.max(1), &config.params, rng);
        Self {
            sprites,
            rng,
            config,
            time_ticks: 0,
        }
    }

    /// Advance by one frame of `delta_ms` milliseconds
    pub fn tick(self, delta_ms: f64) -> Self {
        let (sprites, rng) = step(delta_ms, self.sprites, self.rng, &self.config);
        Self {
            sprites,
            rng,
            config: self.config,
            time_ticks: self.time_ticks + 1,
        }
    }

    pub fn sprites(&self) -> &[S] {
        &self.sprites
    }

    pub fn positions(&self) -> Vec<DVec2> {
        self.sprites.iter().map(|s| s.position()).collect()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}

/// Which sprite shape a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpriteModel {
    /// Gravity and floor bounce
    #[default]
    Bounce,
    /// Fixed heading, toroidal wrap
    Drift,
}

impl SpriteModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteModel::Bounce => "Bounce",
            SpriteModel::Drift => "Drift",
        }
    }
}

/// A run of either sprite shape, for callers that pick the shape at runtime
#[derive(Debug, Clone)]
pub enum Scene {
    Bounce(World<BounceSprite>),
    Drift(World<DriftSprite>),
}

impl Scene {
    pub fn bounce(seed_timestamp: f64, initial: usize, policy: PopulationPolicy, params: BounceParams) -> Self {
        Scene::Bounce(World::new(seed_timestamp, initial, SimConfig::new(policy, params)))
    }

    pub fn drift(seed_timestamp: f64, initial: usize, policy: PopulationPolicy, params: DriftParams) -> Self {
        Scene::Drift(World::new(seed_timestamp, initial, SimConfig::new(policy, params)))
    }

    pub fn model(&self) -> SpriteModel {
        match self {
            Scene::Bounce(_) => SpriteModel::Bounce,
            Scene::Drift(_) => SpriteModel::Drift,
        }
    }

    pub fn tick(self, delta_ms: f64) -> Self {
        match self {
            Scene::Bounce(world) => Scene::Bounce(world.tick(delta_ms)),
            Scene::Drift(world) => Scene::Drift(world.tick(delta_ms)),
        }
    }

    pub fn positions(&self) -> Vec<DVec2> {
        match self {
            Scene::Bounce(world) => world.positions(),
            Scene::Drift(world) => world.positions(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Scene::Bounce(world) => world.len(),
            Scene::Drift(world) => world.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn time_ticks(&self) -> u64 {
        match self {
            Scene::Bounce(world) => world.time_ticks(),
            Scene::Drift(world) => world.time_ticks(),
        }
    }
}
