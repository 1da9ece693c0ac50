//! Clock face: one grid of cell balls per field
//!
//! Cells never move. Changing a digit recolors cells in place, and a cell
//! that switches off leaves a moving copy behind in the animation set.

use glam::Vec2;
use rand::Rng;

use super::countdown::{Field, Snapshot};
use super::glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphTable};
use crate::consts::{DIGITS_PER_FIELD, FIELD_COUNT};
use crate::settings::{BallSettings, ClockSettings};
use crate::sim::{AnimationSet, Ball, Bounds, Color};

const CELLS_PER_DIGIT: usize = GLYPH_WIDTH * GLYPH_HEIGHT;

/// Two-digit cell grid for one clock field
#[derive(Debug, Clone)]
pub struct DigitSet {
    cells: Vec<Ball>,
    lit_color: Color,
}

impl DigitSet {
    /// All cells start unlit at the origin until `layout` places them
    pub fn new(lit_color: Color, radius: f32) -> Self {
        let cells = (0..DIGITS_PER_FIELD * CELLS_PER_DIGIT)
            .map(|_| Ball::new(Vec2::ZERO, radius, Color::UNLIT))
            .collect();
        Self { cells, lit_color }
    }

    #[inline]
    fn index(digit: usize, col: usize, row: usize) -> usize {
        digit * CELLS_PER_DIGIT + row * GLYPH_WIDTH + col
    }

    pub fn cell(&self, digit: usize, col: usize, row: usize) -> Option<&Ball> {
        if digit >= DIGITS_PER_FIELD || col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return None;
        }
        self.cells.get(Self::index(digit, col, row))
    }

    pub fn cells(&self) -> &[Ball] {
        &self.cells
    }

    pub fn lit_color(&self) -> Color {
        self.lit_color
    }

    /// Size of the set's bounding box
    pub fn extent(pitch: f32, digit_gap: f32) -> Vec2 {
        Vec2::new(
            DIGITS_PER_FIELD as f32 * GLYPH_WIDTH as f32 * pitch + digit_gap,
            GLYPH_HEIGHT as f32 * pitch,
        )
    }

    /// Place cells with their bounding box's top-left corner at `origin`
    pub fn layout(&mut self, origin: Vec2, pitch: f32, digit_gap: f32) {
        let first = origin + Vec2::splat(pitch * 0.5);
        let digit_stride = GLYPH_WIDTH as f32 * pitch + digit_gap;
        for digit in 0..DIGITS_PER_FIELD {
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    let offset = Vec2::new(digit as f32 * digit_stride, 0.0) + crate::grid_offset(col, row, pitch);
                    self.cells[Self::index(digit, col, row)].pos = first + offset;
                }
            }
        }
    }

    /// Display `value % 100`, flipping only the cells whose state changes
    ///
    /// Cells turning off are ejected into `animations` when `eject` is set.
    /// Returns the number of cells ejected.
    pub fn show<R: Rng + ?Sized>(
        &mut self,
        value: u64,
        font: &GlyphTable,
        animations: &mut AnimationSet,
        rng: &mut R,
        ball: &BallSettings,
        eject: bool,
    ) -> usize {
        let value = value % 100;
        let digits = [(value / 10) as usize, (value % 10) as usize];
        let mut ejected = 0;

        for (digit, &shown) in digits.iter().enumerate() {
            let Some(glyph) = font.glyph(shown) else {
                continue;
            };
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    let cell = &mut self.cells[Self::index(digit, col, row)];
                    let want = glyph.is_lit(col, row);
                    if want == cell.is_lit() {
                        continue;
                    }
                    if !want && eject {
                        animations.eject_cell(rng, cell, ball);
                        ejected += 1;
                    }
                    cell.color = if want { self.lit_color } else { Color::UNLIT };
                }
            }
        }
        ejected
    }
}

/// The four fields of the countdown
#[derive(Debug, Clone)]
pub struct ClockFace {
    sets: Vec<DigitSet>,
}

impl ClockFace {
    /// Field `i` takes `palette[i]` as its lit color
    pub fn new(palette: &[Color], radius: f32) -> Self {
        if palette.len() < FIELD_COUNT {
            log::warn!(
                "Palette has {} colors for {} fields, padding with {:?}",
                palette.len(),
                FIELD_COUNT,
                Color::DEFAULT_BALL
            );
        }
        let sets = (0..FIELD_COUNT)
            .map(|i| {
                let color = palette.get(i).copied().unwrap_or(Color::DEFAULT_BALL);
                DigitSet::new(color, radius)
            })
            .collect();
        Self { sets }
    }

    pub fn set(&self, field: Field) -> &DigitSet {
        &self.sets[field.index()]
    }

    pub fn sets(&self) -> &[DigitSet] {
        &self.sets
    }

    /// Every cell of every field
    pub fn cells(&self) -> impl Iterator<Item = &Ball> {
        self.sets.iter().flat_map(|s| s.cells().iter())
    }

    /// Center the face in the canvas: one row of four fields, or a 2x2 block
    /// when the row would not fit
    pub fn layout(&mut self, bounds: Bounds, ball: &BallSettings, clock: &ClockSettings) {
        let pitch = ball.pitch();
        let set_size = DigitSet::extent(pitch, clock.digit_spacing);
        let gap = clock.field_spacing;

        let row_width = FIELD_COUNT as f32 * set_size.x + (FIELD_COUNT - 1) as f32 * gap;
        let columns = if row_width <= bounds.width { FIELD_COUNT } else { 2 };
        let rows = FIELD_COUNT.div_ceil(columns);

        let face = Vec2::new(
            columns as f32 * set_size.x + (columns - 1) as f32 * gap,
            rows as f32 * set_size.y + (rows - 1) as f32 * gap,
        );
        let origin = (Vec2::new(bounds.width, bounds.height) - face) * 0.5;

        for (i, set) in self.sets.iter_mut().enumerate() {
            let (col, row) = (i % columns, i / columns);
            let at = origin + Vec2::new(col as f32 * (set_size.x + gap), row as f32 * (set_size.y + gap));
            set.layout(at, pitch, clock.digit_spacing);
        }
        log::debug!("Clock face laid out {}x{} at ({:.0}, {:.0})", columns, rows, origin.x, origin.y);
    }

    /// Update the fields that differ from `previous` (all of them when there is none)
    ///
    /// Returns the number of cells ejected.
    #[allow(clippy::too_many_arguments)]
    pub fn show<R: Rng + ?Sized>(
        &mut self,
        current: &Snapshot,
        previous: Option<&Snapshot>,
        font: &GlyphTable,
        animations: &mut AnimationSet,
        rng: &mut R,
        ball: &BallSettings,
        eject: bool,
    ) -> usize {
        let fields = match previous {
            Some(previous) => current.changed_fields(previous),
            None => Field::ALL.to_vec(),
        };
        fields
            .into_iter()
            .map(|field| {
                self.sets[field.index()].show(current.get(field), font, animations, rng, ball, eject)
            })
            .sum()
    }
}
