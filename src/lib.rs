//! Ball Clock - A countdown clock made of bouncing balls
//!
//! Core modules:
//! - `clock`: Glyph bitmaps, countdown math, and the digit grid
//! - `sim`: Ball physics, collisions, and the per-frame tick
//! - `renderer`: Draw list handed to whatever rasterizes the circles
//! - `platform`: Render loop thread and shared input handoff
//! - `settings`: Tunable constants, loadable from JSON

pub mod clock;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Engine constants that are not worth exposing as settings
pub mod consts {
    /// Smallest radius a ball may have
    pub const MIN_RADIUS: f32 = 0.5;

    /// Center distance below which two balls are treated as coincident
    pub const COINCIDENT_EPSILON: f32 = 1e-4;

    /// Number of clock fields (days, hours, minutes, seconds)
    pub const FIELD_COUNT: usize = 4;
    /// Digits shown per field
    pub const DIGITS_PER_FIELD: usize = 2;
}

/// Uniform float between `min` and `max` (either ordering works)
#[inline]
pub fn random_in<R: rand::Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Grid offset of a cell at (col, row) for the given pitch
#[inline]
pub fn grid_offset(col: usize, row: usize, pitch: f32) -> Vec2 {
    Vec2::new(col as f32 * pitch, row as f32 * pitch)
}
