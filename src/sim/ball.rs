//! Ball entity and color tags

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_RADIUS;

/// Packed 0xRRGGBBAA color, also used as the ball's category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Marker color of a clock cell that is switched off
    pub const UNLIT: Color = Color(0x3c3c3cff);
    /// Used when a spawn is asked to pick from an empty palette
    pub const DEFAULT_BALL: Color = Color(0xff0000ff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xff)
    }

    /// Normalized RGBA components
    pub fn to_rgba(self) -> [f32; 4] {
        let c = self.0;
        [
            ((c >> 24) & 0xff) as f32 / 255.0,
            ((c >> 16) & 0xff) as f32 / 255.0,
            ((c >> 8) & 0xff) as f32 / 255.0,
            (c & 0xff) as f32 / 255.0,
        ]
    }
}

/// A circular body: either a fixed clock cell or a free-flying ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BallData")]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    radius: f32,
    pub color: Color,
}

/// Wire form of a ball; deserializing goes through `Ball::new`
#[derive(Deserialize)]
struct BallData {
    pos: Vec2,
    #[serde(default)]
    vel: Vec2,
    radius: f32,
    color: Color,
}

impl From<BallData> for Ball {
    fn from(data: BallData) -> Self {
        Ball::new(data.pos, data.radius, data.color).with_velocity(data.vel)
    }
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, color: Color) -> Self {
        let radius = if radius.is_finite() && radius >= MIN_RADIUS {
            radius
        } else {
            log::warn!("Ball radius {} clamped to {}", radius, MIN_RADIUS);
            MIN_RADIUS
        };
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Radius is fixed at creation
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// A clock cell is lit unless it carries the unlit marker
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.color != Color::UNLIT
    }
}
