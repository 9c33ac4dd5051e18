//! TrueType/OpenType glyph source
//!
//! Outlines are read with ttf-parser. Like the UFO source, every point the
//! outline visits (on-curve ends and off-curve controls alike) becomes a
//! polygon vertex, in drawing order.

use super::{assign_heights, Glyph, GlyphSource, GlyphSourceOptions};
use crate::core::errors::{LayoutError, LayoutResult};
use crate::geometry::{Contour, GridPoint};
use anyhow::{anyhow, Context, Result};
use kurbo::Point;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use ttf_parser::{Face, OutlineBuilder};

/// Glyph source over the cmap of a TrueType or OpenType font
#[derive(Debug, Clone)]
pub struct TtfGlyphSource {
    glyphs: HashMap<char, Glyph>,
    options: GlyphSourceOptions,
}

impl TtfGlyphSource {
    pub fn load(path: impl AsRef<Path>, options: GlyphSourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .with_context(|| format!("Failed to read font file {}", path.display()))?;
        let source = Self::from_bytes(&data, options)
            .with_context(|| format!("Failed to load font from {}", path.display()))?;
        tracing::info!(
            "Loaded {} mapped glyphs from {}",
            source.glyphs.len(),
            path.display()
        );
        Ok(source)
    }

    pub fn from_bytes(data: &[u8], options: GlyphSourceOptions) -> Result<Self> {
        anyhow::ensure!(options.px_step > 0, "px_step must be positive");
        let face = Face::parse(data, 0).map_err(|e| anyhow!("Invalid font data: {}", e))?;

        let mut codepoints = Vec::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if subtable.is_unicode() {
                    subtable.codepoints(|cp| codepoints.push(cp));
                }
            }
        }

        let step = f64::from(options.px_step);
        let mut glyphs = HashMap::new();
        for ch in codepoints.into_iter().filter_map(char::from_u32) {
            if glyphs.contains_key(&ch) {
                continue;
            }
            let Some(id) = face.glyph_index(ch) else {
                continue;
            };
            let advance = face.glyph_hor_advance(id).unwrap_or(0);
            let advance_width = (f64::from(advance) / step).floor() as i32;

            let glyph = if ch.is_whitespace() {
                Glyph::blank(ch, advance_width)
            } else {
                let mut collector = ContourCollector::default();
                face.outline_glyph(id, &mut collector);
                let contours = collector
                    .finish()
                    .into_iter()
                    .map(|points| {
                        Contour::new(
                            points
                                .into_iter()
                                .map(|p| GridPoint::quantize(p.x, p.y, options.px_step))
                                .collect(),
                        )
                    })
                    .collect();
                Glyph::new(ch, contours, advance_width, 0)
            };
            glyphs.insert(ch, glyph);
        }

        let declared = face
            .capital_height()
            .or(Some(face.ascender()))
            .map(f64::from);
        assign_heights(&mut glyphs, declared, &options);

        Ok(Self { glyphs, options })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSource for TtfGlyphSource {
    fn has_char(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch) || ch.is_whitespace()
    }

    fn contours_of(&self, ch: char) -> LayoutResult<Glyph> {
        match self.glyphs.get(&ch) {
            Some(glyph) => Ok(glyph.clone()),
            None if ch.is_whitespace() => Ok(Glyph::blank(ch, self.options.blank_advance)),
            None => Err(LayoutError::GlyphNotFound(ch)),
        }
    }
}

/// Collects outline points per contour, in font units
#[derive(Debug, Default)]
struct ContourCollector {
    contours: Vec<Vec<Point>>,
    current: Vec<Point>,
}

impl ContourCollector {
    fn push(&mut self, x: f32, y: f32) {
        self.current.push(Point::new(f64::from(x), f64::from(y)));
    }

    fn flush(&mut self) {
        // A closing segment repeats the start point
        if self.current.len() > 1 && self.current.first() == self.current.last() {
            self.current.pop();
        }
        if !self.current.is_empty() {
            self.contours.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<Vec<Point>> {
        self.flush();
        self.contours
    }
}

impl OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        self.push(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push(x1, y1);
        self.push(x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.push(x1, y1);
        self.push(x2, y2);
        self.push(x, y);
    }

    fn close(&mut self) {
        self.flush();
    }
}
