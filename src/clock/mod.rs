//! Countdown clock face
//!
//! Static glyph data, the countdown math, and the cell grids that display it.

pub mod countdown;
pub mod digits;
pub mod glyph;

pub use countdown::{Field, Snapshot};
pub use digits::{ClockFace, DigitSet};
pub use glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, Glyph, GlyphError, GlyphTable};
