//! In-memory glyph source
//!
//! Useful for programmatic pixel fonts and for exercising the layout code
//! without a font file on disk.

use super::{Glyph, GlyphSource};
use crate::core::errors::{LayoutError, LayoutResult};
use crate::geometry::Contour;
use std::collections::HashMap;

/// Glyphs already expressed in grid units, keyed by character
#[derive(Debug, Clone, Default)]
pub struct StaticGlyphSource {
    glyphs: HashMap<char, Glyph>,
    blank_advance: Option<i32>,
}

impl StaticGlyphSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve unmapped whitespace to a blank glyph of this width
    pub fn with_blank_advance(mut self, advance: i32) -> Self {
        self.blank_advance = Some(advance);
        self
    }

    pub fn insert(&mut self, glyph: Glyph) {
        self.glyphs.insert(glyph.ch, glyph);
    }

    /// Builder-style insert of a glyph whose height is its highest point
    pub fn with_glyph(mut self, ch: char, contours: Vec<Contour>, advance_width: i32) -> Self {
        let mut glyph = Glyph::new(ch, contours, advance_width, 0);
        glyph.height = glyph.y_max();
        self.insert(glyph);
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSource for StaticGlyphSource {
    fn has_char(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch) || (ch.is_whitespace() && self.blank_advance.is_some())
    }

    fn contours_of(&self, ch: char) -> LayoutResult<Glyph> {
        if let Some(glyph) = self.glyphs.get(&ch) {
            return Ok(glyph.clone());
        }
        match self.blank_advance {
            Some(advance) if ch.is_whitespace() => Ok(Glyph::blank(ch, advance)),
            _ => Err(LayoutError::GlyphNotFound(ch)),
        }
    }
}
