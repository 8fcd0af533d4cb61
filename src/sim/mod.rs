//! Deterministic simulation module
//!
//! All sprite logic lives here. This module must be pure and deterministic:
//! - Seeded generator only, threaded by value
//! - Stable sprite order (new sprites in front, removals from the front)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod population;
pub mod rng;
pub mod sprite;
pub mod tick;
pub mod world;

pub use bounds::Bounds;
pub use population::{Adjustment, PopulationPolicy};
pub use rng::{GenState, Span};
pub use sprite::{BounceParams, BounceSpawn, BounceSprite, DriftParams, DriftSpawn, DriftSprite, Sprite};
pub use tick::{SimConfig, spawn_batch, step};
pub use world::{Scene, SpriteModel, World};
