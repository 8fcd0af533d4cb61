//! Instance buffer for the raw WebGL strategy

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use super::handoff::Projection;
use super::{Presenter, RendererKind};

/// Per-sprite instance attribute (clip-space position)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
}

impl SpriteInstance {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    /// Stride in bytes between instances
    pub const STRIDE: usize = std::mem::size_of::<SpriteInstance>();
}

/// Rebuilt every frame and uploaded as-is with `bufferData`
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    projection: Projection,
    instances: Vec<SpriteInstance>,
}

impl InstanceBuffer {
    /// `projection` should map into a 2×2 viewport; the result is shifted to
    /// clip space [-1, 1]
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            instances: Vec::new(),
        }
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Presenter for InstanceBuffer {
    fn kind(&self) -> RendererKind {
        RendererKind::RawWebGl
    }

    fn present(&mut self, positions: &[DVec2]) {
        let projection = self.projection;
        self.instances.clear();
        self.instances.extend(positions.iter().map(|&p| {
            let clip = projection.project(p) - DVec2::ONE;
            SpriteInstance::new(clip.x as f32, clip.y as f32)
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bounds;

    fn clip_buffer() -> InstanceBuffer {
        InstanceBuffer::new(Projection {
            domain: Bounds::UNIT,
            viewport: DVec2::splat(2.0),
            flip_y: false,
            anchor_offset: 0.0,
        })
    }

    #[test]
    fn test_unit_square_to_clip_space() {
        let mut buffer = clip_buffer();
        buffer.present(&[DVec2::ZERO, DVec2::ONE, DVec2::new(0.5, 0.75)]);
        assert_eq!(
            buffer.instances(),
            &[
                SpriteInstance::new(-1.0, -1.0),
                SpriteInstance::new(1.0, 1.0),
                SpriteInstance::new(0.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_bytes_layout() {
        let mut buffer = clip_buffer();
        buffer.present(&[DVec2::ZERO, DVec2::ONE]);
        assert_eq!(SpriteInstance::STRIDE, 8);
        assert_eq!(buffer.as_bytes().len(), 2 * SpriteInstance::STRIDE);
        assert_eq!(&buffer.as_bytes()[0..4], &(-1.0f32).to_ne_bytes());
    }

    #[test]
    fn test_rebuilt_each_frame() {
        let mut buffer = clip_buffer();
        buffer.present(&[DVec2::ZERO; 5]);
        buffer.present(&[DVec2::ONE]);
        assert_eq!(buffer.instances().len(), 1);
        assert_eq!(buffer.kind(), RendererKind::RawWebGl);
    }
}
