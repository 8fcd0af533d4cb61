//! Rendering strategies
//!
//! Actual drawing happens outside this crate. Here we only describe the
//! strategies being compared and hand sprite positions to them in the form
//! each one consumes.

pub mod handoff;
pub mod instance;

pub use handoff::{ChannelHandoff, JsonHandoff, Projection, encode_positions};
pub use instance::{InstanceBuffer, SpriteInstance};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Rendering strategies under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RendererKind {
    /// Absolutely positioned elements via top/left
    #[default]
    HtmlTopLeft,
    /// Elements moved with CSS transform: translate
    CssTranslate,
    /// WebGL-backed 2D game library
    GameLibrary,
    /// Hand-written WebGL with an instance buffer
    RawWebGl,
    /// Canvas library reading a JSON data attribute
    CanvasAttribute,
    /// Canvas library fed through a message channel
    CanvasPort,
}

impl RendererKind {
    pub const ALL: [RendererKind; 6] = [
        RendererKind::HtmlTopLeft,
        RendererKind::CssTranslate,
        RendererKind::GameLibrary,
        RendererKind::RawWebGl,
        RendererKind::CanvasAttribute,
        RendererKind::CanvasPort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::HtmlTopLeft => "HTML top/left",
            RendererKind::CssTranslate => "CSS translate",
            RendererKind::GameLibrary => "Game library",
            RendererKind::RawWebGl => "Raw WebGL",
            RendererKind::CanvasAttribute => "Canvas (attribute)",
            RendererKind::CanvasPort => "Canvas (port)",
        }
    }

    /// Next strategy in `ALL`, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Gravity (units/s²) the strategy's scene was tuned with
    pub fn default_gravity(&self) -> f64 {
        match self {
            RendererKind::HtmlTopLeft | RendererKind::CssTranslate => 10.0,
            _ => 5.0,
        }
    }

    /// DOM-anchored strategies position the sprite's top-left corner, so
    /// positions are shifted by half the sprite size
    pub fn anchors_top_left(&self) -> bool {
        !matches!(self, RendererKind::GameLibrary | RendererKind::RawWebGl)
    }
}

/// Consumer of one frame's sprite positions
pub trait Presenter {
    fn kind(&self) -> RendererKind;

    /// Receive positions in simulation-domain coordinates
    fn present(&mut self, positions: &[DVec2]);
}
