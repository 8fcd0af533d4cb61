//! Peak population board
//!
//! One entry per renderer: the largest population it sustained. Persisted
//! to LocalStorage so comparisons survive a reload.

use serde::{Deserialize, Serialize};

use crate::renderer::RendererKind;

/// Best population a renderer reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakEntry {
    pub renderer: RendererKind,
    pub population: usize,
    /// Unix timestamp (ms) when reached
    pub timestamp: f64,
}

/// Per-renderer peaks, sorted by population (descending)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeakBoard {
    pub entries: Vec<PeakEntry>,
}

impl PeakBoard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sprite_stress_peaks";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Best population recorded for `renderer`
    pub fn best_for(&self, renderer: RendererKind) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.renderer == renderer)
            .map(|e| e.population)
    }

    /// Record a population for `renderer`. Returns the renderer's new rank
    /// (1-indexed) if this beat its previous peak, None otherwise.
    pub fn record(&mut self, renderer: RendererKind, population: usize, timestamp: f64) -> Option<usize> {
        if population == 0 {
            return None;
        }
        if let Some(best) = self.best_for(renderer) {
            if population <= best {
                return None;
            }
            self.entries.retain(|e| e.renderer != renderer);
        }

        let entry = PeakEntry {
            renderer,
            population,
            timestamp,
        };

        // Sorted descending; ties keep the earlier entry first
        let pos = self
            .entries
            .iter()
            .position(|e| population > e.population)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renderer with the highest peak
    pub fn leader(&self) -> Option<&PeakEntry> {
        self.entries.first()
    }

    /// Load the board from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<PeakBoard>(&json) {
                    log::info!("Loaded {} renderer peaks", board.entries.len());
                    return board;
                }
            }
        }

        log::info!("No renderer peaks found, starting fresh");
        Self::new()
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Renderer peaks saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
