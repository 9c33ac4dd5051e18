//! Quantized glyph data handed to the rasterizer

use crate::geometry::{Contour, GridPoint};

/// One character's outline in grid units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub contours: Vec<Contour>,
    /// Horizontal advance in grid units
    pub advance_width: i32,
    /// Vertical extent in grid units, used to flip rows top-down
    pub height: i32,
}

impl Glyph {
    pub fn new(ch: char, contours: Vec<Contour>, advance_width: i32, height: i32) -> Self {
        Self {
            ch,
            contours,
            advance_width,
            height,
        }
    }

    /// A glyph that takes horizontal space but paints nothing
    pub fn blank(ch: char, advance_width: i32) -> Self {
        Self::new(ch, Vec::new(), advance_width, 0)
    }

    pub fn is_blank(&self) -> bool {
        self.contours.iter().all(|c| c.points.is_empty())
    }

    /// Highest grid y over all contour points, 0 for a blank glyph
    pub fn y_max(&self) -> i32 {
        self.contours
            .iter()
            .flat_map(|c| c.points.iter())
            .map(|p: &GridPoint| p.y)
            .max()
            .unwrap_or(0)
    }
}
