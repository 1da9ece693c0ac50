//! Per-circle instance data for the draw list

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::Ball;

/// One circle to rasterize
///
/// Laid out for direct upload as an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: Vec2,
    pub radius: f32,
    /// Packed 0xRRGGBBAA
    pub color: u32,
}

impl CircleInstance {
    pub const fn new(x: f32, y: f32, radius: f32, color: u32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
            color,
        }
    }

    /// Normalized RGBA for shaders that want floats
    pub fn rgba(&self) -> [f32; 4] {
        crate::sim::Color(self.color).to_rgba()
    }
}

impl From<&Ball> for CircleInstance {
    fn from(ball: &Ball) -> Self {
        Self::new(ball.pos.x, ball.pos.y, ball.radius(), ball.color.0)
    }
}
