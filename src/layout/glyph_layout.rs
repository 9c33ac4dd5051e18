//! Per-character square aggregation
//!
//! Unions the squares of every contour of a glyph and flips them from the
//! font's bottom-up y axis to top-down rows.

use crate::font_source::Glyph;
use crate::geometry::{rasterize, RasterStrategy, Square};
use std::collections::BTreeSet;

/// A glyph reduced to grid squares plus its box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaidOutGlyph {
    pub ch: char,
    /// Glyph-local squares, row 0 at the top
    pub squares: BTreeSet<Square>,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphLayoutEngine {
    strategy: RasterStrategy,
}

impl GlyphLayoutEngine {
    pub fn new(strategy: RasterStrategy) -> Self {
        Self { strategy }
    }

    pub fn layout(&self, glyph: &Glyph) -> LaidOutGlyph {
        if glyph.is_blank() {
            return LaidOutGlyph {
                ch: glyph.ch,
                squares: BTreeSet::new(),
                width: glyph.advance_width,
                height: glyph.height,
            };
        }
        let squares = glyph
            .contours
            .iter()
            .flat_map(|contour| rasterize(contour, self.strategy))
            .map(|s| Square::new(s.x, glyph.height - 1 - s.y))
            .collect();

        LaidOutGlyph {
            ch: glyph.ch,
            squares,
            width: glyph.advance_width,
            height: glyph.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Contour;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        Contour::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
    }

    #[test]
    fn test_rows_are_flipped() {
        // A one-cell foot at the baseline of a glyph four units tall
        let glyph = Glyph::new('.', vec![rect(0, 0, 1, 1)], 2, 4);
        let laid = GlyphLayoutEngine::default().layout(&glyph);
        assert_eq!(laid.squares, BTreeSet::from([Square::new(0, 3)]));
        assert_eq!((laid.width, laid.height), (2, 4));
    }

    #[test]
    fn test_overlapping_contours_collapse() {
        let glyph = Glyph::new('+', vec![rect(0, 1, 3, 2), rect(1, 0, 2, 3)], 4, 3);
        let laid = GlyphLayoutEngine::new(RasterStrategy::FloodFill).layout(&glyph);
        let expected: BTreeSet<Square> = [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]
            .into_iter()
            .map(|(x, y)| Square::new(x, y))
            .collect();
        assert_eq!(laid.squares, expected);
    }

    #[test]
    fn test_blank_glyph_keeps_width() {
        let laid = GlyphLayoutEngine::default().layout(&Glyph::blank(' ', 1));
        assert!(laid.squares.is_empty());
        assert_eq!(laid.width, 1);
    }
}
