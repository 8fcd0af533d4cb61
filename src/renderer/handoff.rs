//! JSON position handoff for renderers living across a DOM boundary
//!
//! Positions are projected into viewport pixels and encoded as a minified
//! JSON array of `{"x":..,"y":..}` records. The text is either written into a
//! `data-sprites` attribute or pushed down a message channel.

use glam::DVec2;
use serde::Serialize;

use super::{Presenter, RendererKind};
use crate::sim::Bounds;

/// Attribute the canvas library polls for positions
pub const SPRITES_ATTRIBUTE: &str = "data-sprites";

/// Maps simulation-domain coordinates to viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub domain: Bounds,
    /// Viewport size in pixels
    pub viewport: DVec2,
    /// Domain y grows upward, screen y grows downward
    pub flip_y: bool,
    /// Subtracted from both axes (half the sprite size for top-left anchors)
    pub anchor_offset: f64,
}

impl Projection {
    /// Identity mapping for pixel-space domains
    pub fn identity(domain: Bounds) -> Self {
        Self {
            domain,
            viewport: domain.size(),
            flip_y: false,
            anchor_offset: 0.0,
        }
    }

    pub fn project(&self, p: DVec2) -> DVec2 {
        let scale = self.viewport / self.domain.size();
        let mut px = (p - self.domain.min) * scale;
        if self.flip_y {
            px.y = self.viewport.y - px.y;
        }
        px - DVec2::splat(self.anchor_offset)
    }
}

#[derive(Serialize)]
struct Point {
    x: f64,
    y: f64,
}

/// Encode projected positions as minified JSON
pub fn encode_positions(positions: &[DVec2], projection: &Projection) -> String {
    let points: Vec<Point> = positions
        .iter()
        .map(|&p| {
            let p = projection.project(p);
            Point { x: p.x, y: p.y }
        })
        .collect();

    match serde_json::to_string(&points) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to encode sprite positions: {}", e);
            String::from("[]")
        }
    }
}

/// Keeps the latest encoded frame for the shell to write into the DOM
#[derive(Debug, Clone)]
pub struct JsonHandoff {
    kind: RendererKind,
    projection: Projection,
    payload: String,
}

impl JsonHandoff {
    pub fn new(kind: RendererKind, projection: Projection) -> Self {
        Self {
            kind,
            projection,
            payload: String::from("[]"),
        }
    }

    /// Last encoded frame
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl Presenter for JsonHandoff {
    fn kind(&self) -> RendererKind {
        self.kind
    }

    fn present(&mut self, positions: &[DVec2]) {
        self.payload = encode_positions(positions, &self.projection);
    }
}

/// Pushes each encoded frame into an outbound channel
pub struct ChannelHandoff<F: FnMut(&str)> {
    projection: Projection,
    send: F,
}

impl<F: FnMut(&str)> ChannelHandoff<F> {
    pub fn new(projection: Projection, send: F) -> Self {
        Self { projection, send }
    }
}

impl<F: FnMut(&str)> Presenter for ChannelHandoff<F> {
    fn kind(&self) -> RendererKind {
        RendererKind::CanvasPort
    }

    fn present(&mut self, positions: &[DVec2]) {
        let json = encode_positions(positions, &self.projection);
        (self.send)(&json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minified_records() {
        let projection = Projection::identity(Bounds::pixels(800.0, 600.0));
        let json = encode_positions(&[DVec2::new(1.5, 2.0), DVec2::new(0.0, 600.0)], &projection);
        assert_eq!(json, r#"[{"x":1.5,"y":2.0},{"x":0.0,"y":600.0}]"#);
    }

    #[test]
    fn test_empty_frame() {
        let projection = Projection::identity(Bounds::UNIT);
        assert_eq!(encode_positions(&[], &projection), "[]");
    }

    #[test]
    fn test_unit_square_projection() {
        let projection = Projection {
            domain: Bounds::UNIT,
            viewport: DVec2::new(800.0, 600.0),
            flip_y: true,
            anchor_offset: 13.0,
        };
        let p = projection.project(DVec2::new(0.5, 0.25));
        assert_eq!(p, DVec2::new(387.0, 437.0));
    }

    #[test]
    fn test_flipped_pixel_projection() {
        let projection = Projection {
            flip_y: true,
            anchor_offset: 5.0,
            ..Projection::identity(Bounds::pixels(100.0, 50.0))
        };
        assert_eq!(projection.project(DVec2::new(10.0, 0.0)), DVec2::new(5.0, 45.0));
    }

    #[test]
    fn test_json_handoff_keeps_latest() {
        let mut handoff = JsonHandoff::new(
            RendererKind::CanvasAttribute,
            Projection::identity(Bounds::pixels(10.0, 10.0)),
        );
        assert_eq!(handoff.payload(), "[]");
        handoff.present(&[DVec2::new(1.0, 2.0)]);
        handoff.present(&[DVec2::new(3.0, 4.0)]);
        assert_eq!(handoff.payload(), r#"[{"x":3.0,"y":4.0}]"#);
        assert_eq!(handoff.kind(), RendererKind::CanvasAttribute);
    }

    #[test]
    fn test_channel_handoff_sends_each_frame() {
        let mut sent = Vec::new();
        {
            let mut handoff = ChannelHandoff::new(
                Projection::identity(Bounds::pixels(10.0, 10.0)),
                |msg: &str| sent.push(msg.to_string()),
            );
            handoff.present(&[DVec2::new(1.0, 1.0)]);
            handoff.present(&[]);
            assert_eq!(handoff.kind(), RendererKind::CanvasPort);
        }
        assert_eq!(sent, vec![r#"[{"x":1.0,"y":1.0}]"#.to_string(), "[]".to_string()]);
    }
}
