//! 4x7 digit bitmaps

use thiserror::Error;

pub const GLYPH_WIDTH: usize = 4;
pub const GLYPH_HEIGHT: usize = 7;
pub const GLYPH_COUNT: usize = 10;

/// Malformed glyph data, detected once when the table is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("glyph has {0} rows, expected {h}", h = GLYPH_HEIGHT)]
    Height(usize),
    #[error("glyph row {row} has {width} cells, expected {w}", w = GLYPH_WIDTH)]
    Width { row: usize, width: usize },
    #[error("glyph cell ({col}, {row}) is {value}, expected 0 or 1")]
    Cell { col: usize, row: usize, value: u8 },
    #[error("font has {0} glyphs, expected {n}", n = GLYPH_COUNT)]
    Count(usize),
    #[error("font glyph {digit}: {source}")]
    Digit {
        digit: usize,
        #[source]
        source: Box<GlyphError>,
    },
}

/// A single digit bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    bits: [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT],
}

impl Glyph {
    /// Build from rows of 0/1 cells, top row first
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, GlyphError> {
        if rows.len() != GLYPH_HEIGHT {
            return Err(GlyphError::Height(rows.len()));
        }
        let mut bits = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != GLYPH_WIDTH {
                return Err(GlyphError::Width {
                    row,
                    width: cells.len(),
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                bits[row][col] = match value {
                    0 => false,
                    1 => true,
                    _ => return Err(GlyphError::Cell { col, row, value }),
                };
            }
        }
        Ok(Self { bits })
    }

    #[inline]
    pub fn is_lit(&self, col: usize, row: usize) -> bool {
        self.bits
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Lit cells as (col, row), row-major
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GLYPH_HEIGHT)
            .flat_map(|row| (0..GLYPH_WIDTH).map(move |col| (col, row)))
            .filter(|&(col, row)| self.bits[row][col])
    }
}

/// The ten digit glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: Vec<Glyph>,
}

impl GlyphTable {
    /// Build a table, rejecting anything that is not ten well-formed glyphs
    pub fn from_rows(font: &[&[&[u8]]]) -> Result<Self, GlyphError> {
        if font.len() != GLYPH_COUNT {
            return Err(GlyphError::Count(font.len()));
        }
        let glyphs = font
            .iter()
            .enumerate()
            .map(|(digit, rows)| {
                Glyph::from_rows(rows).map_err(|e| GlyphError::Digit {
                    digit,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { glyphs })
    }

    /// The built-in block font
    pub fn standard() -> Result<Self, GlyphError> {
        Self::from_rows(&STANDARD_FONT)
    }

    /// Glyph for a digit in 0..=9
    pub fn glyph(&self, digit: usize) -> Option<&Glyph> {
        self.glyphs.get(digit)
    }
}

const STANDARD_FONT: [&[&[u8]]; GLYPH_COUNT] = [
    &[
        &[1, 1, 1, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 1, 1, 1],
    ],
    &[
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
    ],
    &[
        &[1, 1, 1, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[1, 1, 1, 1],
        &[1, 0, 0, 0],
        &[1, 0, 0, 0],
        &[1, 1, 1, 1],
    ],
    &[
        &[1, 1, 1, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[1, 1, 1, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[1, 1, 1, 1],
    ],
    &[
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 1, 1, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
    ],
    &[
        &[1, 1, 1, 1],
        &[1, 0, 0, 0],
        &[1, 0, 0, 0],
        &[1, 1, 1, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[1, 1, 1, 1],
    ],
    &[
        &[1, 1, 1, 1],
        &[1, 0, 0, 0],
        &[1, 0, 0, 0],
        &[1, 1, 1, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 1, 1, 1],
    ],
    &[
        &[1, 1, 1, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
    ],
    &[
        &[1, 1, 1, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 1, 1, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 1, 1, 1],
    ],
    &[
        &[1, 1, 1, 1],
        &[1, 0, 0, 1],
        &[1, 0, 0, 1],
        &[1, 1, 1, 1],
        &[0, 0, 0, 1],
        &[0, 0, 0, 1],
        &[1, 1, 1, 1],
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_expected_sizes() {
        assert_eq!(GlyphError::Height(6).to_string(), "glyph has 6 rows, expected 7");
        assert_eq!(
            GlyphError::Width { row: 2, width: 3 }.to_string(),
            "glyph row 2 has 3 cells, expected 4"
        );
        assert_eq!(GlyphError::Count(9).to_string(), "font has 9 glyphs, expected 10");
    }

    #[test]
    fn test_standard_font_builds() {
        let font = GlyphTable::standard().unwrap();
        assert!(font.glyph(9).is_some());
        assert!(font.glyph(10).is_none());
    }

    #[test]
    fn test_lit_lookup() {
        let font = GlyphTable::standard().unwrap();
        let zero = font.glyph(0).unwrap();
        assert!(zero.is_lit(0, 0));
        assert!(!zero.is_lit(1, 1));
        assert!(!zero.is_lit(GLYPH_WIDTH, 0));
        assert_eq!(zero.lit_cells().count(), 18);
        assert_eq!(font.glyph(1).unwrap().lit_cells().count(), 7);
    }

    #[test]
    fn test_rejects_wrong_height() {
        let row: &[u8] = &[1, 1, 1, 1];
        let rows = vec![row; 6];
        assert_eq!(Glyph::from_rows(&rows), Err(GlyphError::Height(6)));
    }

    #[test]
    fn test_rejects_wrong_width() {
        let full: &[u8] = &[1, 1, 1, 1];
        let mut rows = vec![full; GLYPH_HEIGHT];
        rows[3] = &[1, 1, 1];
        assert_eq!(
            Glyph::from_rows(&rows),
            Err(GlyphError::Width { row: 3, width: 3 })
        );
    }

    #[test]
    fn test_rejects_non_binary_cell() {
        let empty: &[u8] = &[0, 0, 0, 0];
        let mut rows = vec![empty; GLYPH_HEIGHT];
        rows[2] = &[0, 2, 0, 0];
        assert_eq!(
            Glyph::from_rows(&rows),
            Err(GlyphError::Cell { col: 1, row: 2, value: 2 })
        );
    }

    #[test]
    fn test_table_rejects_bad_count_and_names_digit() {
        assert_eq!(
            GlyphTable::from_rows(&STANDARD_FONT[..9]),
            Err(GlyphError::Count(9))
        );

        let bad: &[&[u8]] = &[&[1, 1, 1, 1]];
        let mut font: [&[&[u8]]; GLYPH_COUNT] = STANDARD_FONT;
        font[4] = bad;
        match GlyphTable::from_rows(&font) {
            Err(GlyphError::Digit { digit: 4, source }) => {
                assert_eq!(*source, GlyphError::Height(1));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
