//! Run settings and preferences
//!
//! Persisted in LocalStorage. Everything the stepper needs is derived from
//! here, including the domain bounds, so nothing is a module-level global.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_INITIAL_POPULATION, DEFAULT_SPRITE_SIZE};
use crate::renderer::{Projection, RendererKind};
use crate::sim::{BounceParams, Bounds, DriftParams, PopulationPolicy, Scene, SpriteModel};

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active rendering strategy
    pub renderer: RendererKind,
    /// Sprite shape for the run
    pub model: SpriteModel,
    /// Population control policy
    pub policy: PopulationPolicy,
    /// Gravity override (units/s²); the renderer's default when unset
    pub gravity: Option<f64>,
    /// Sprites spawned when a run starts
    pub initial_population: usize,
    /// Simulate in viewport pixels instead of the unit square
    pub pixel_space: bool,
    /// Clamp bouncing sprites back into bounds after reflection
    pub clamp_to_bounds: bool,
    /// Rendered sprite size in pixels
    pub sprite_size: f64,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            renderer: RendererKind::default(),
            model: SpriteModel::default(),
            policy: PopulationPolicy::default(),
            gravity: None,
            initial_population: DEFAULT_INITIAL_POPULATION,
            pixel_space: false,
            clamp_to_bounds: true,
            sprite_size: DEFAULT_SPRITE_SIZE,
            show_fps: true,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn effective_gravity(&self) -> f64 {
        self.gravity.unwrap_or_else(|| self.renderer.default_gravity())
    }

    /// Simulation domain for a viewport of `viewport` pixels
    pub fn bounds(&self, viewport: DVec2) -> Bounds {
        if self.pixel_space {
            Bounds::pixels(viewport.x, viewport.y)
        } else {
            Bounds::UNIT
        }
    }

    /// Bounce motion parameters for a viewport of `viewport` pixels
    pub fn bounce_params(&self, viewport: DVec2) -> BounceParams {
        let gravity = self.effective_gravity();
        let params = if self.pixel_space {
            BounceParams::pixels(viewport.x, viewport.y, gravity)
        } else {
            BounceParams::unit(gravity)
        };
        BounceParams {
            clamp: self.clamp_to_bounds,
            ..params
        }
    }

    /// Drift motion parameters. In the unit square the sprite's extent is
    /// normalized per axis, so wrap margins follow the viewport's aspect.
    pub fn drift_params(&self, viewport: DVec2) -> DriftParams {
        if self.pixel_space {
            DriftParams::pixels(viewport.x, viewport.y, self.sprite_size)
        } else {
            DriftParams::unit(DVec2::splat(self.sprite_size) / viewport.max(DVec2::ONE))
        }
    }

    /// Build a fresh run seeded from `seed_timestamp`
    pub fn scene(&self, seed_timestamp: f64, viewport: DVec2) -> Scene {
        match self.model {
            SpriteModel::Bounce => Scene::bounce(
                seed_timestamp,
                self.initial_population,
                self.policy,
                self.bounce_params(viewport),
            ),
            SpriteModel::Drift => Scene::drift(
                seed_timestamp,
                self.initial_population,
                self.policy,
                self.drift_params(viewport),
            ),
        }
    }

    /// Projection from the simulation domain into the viewport for the
    /// active renderer
    pub fn projection(&self, viewport: DVec2) -> Projection {
        let anchor_offset = if self.renderer.anchors_top_left() {
            self.sprite_size / 2.0
        } else {
            0.0
        };
        Projection {
            domain: self.bounds(viewport),
            viewport,
            flip_y: self.model == SpriteModel::Bounce,
            anchor_offset,
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sprite_stress_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native: read `SPRITE_STRESS_SETTINGS` as JSON if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("SPRITE_STRESS_SETTINGS") {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring SPRITE_STRESS_SETTINGS: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Settings not persisted on native ({})", Self::STORAGE_KEY);
    }
}
