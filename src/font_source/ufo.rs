//! UFO-backed glyph source
//!
//! Reads a UFO font with norad and quantizes every glyph of the default
//! layer that has at least one codepoint. On- and off-curve points are both
//! taken as polygon vertices, in contour order.

use super::{assign_heights, Glyph, GlyphSource, GlyphSourceOptions};
use crate::core::errors::{LayoutError, LayoutResult};
use crate::geometry::{Contour, GridPoint};
use anyhow::{Context, Result};
use kurbo::{Affine, Point};
use norad::Font;
use std::collections::HashMap;
use std::path::Path;

/// Component references deeper than this are ignored
const MAX_COMPONENT_DEPTH: usize = 8;

/// Glyph source over the default layer of a UFO font
#[derive(Debug, Clone)]
pub struct UfoGlyphSource {
    glyphs: HashMap<char, Glyph>,
    options: GlyphSourceOptions,
}

impl UfoGlyphSource {
    /// Load a UFO font from disk
    pub fn load(path: impl AsRef<Path>, options: GlyphSourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let font = Font::load(path)
            .with_context(|| format!("Failed to load UFO font from {}", path.display()))?;
        let source = Self::from_font(&font, options)?;
        tracing::info!(
            "Loaded {} mapped glyphs from {}",
            source.glyphs.len(),
            path.display()
        );
        Ok(source)
    }

    /// Build from an already loaded norad font
    pub fn from_font(font: &Font, options: GlyphSourceOptions) -> Result<Self> {
        anyhow::ensure!(options.px_step > 0, "px_step must be positive");

        let layer = font.default_layer();
        let by_name: HashMap<String, &norad::Glyph> = layer
            .iter()
            .map(|glyph| (glyph.name().to_string(), glyph))
            .collect();

        let mut glyphs = HashMap::new();
        for norad_glyph in layer.iter() {
            let contours = collect_contours(norad_glyph, &by_name, Affine::IDENTITY, 0)
                .into_iter()
                .map(|points| {
                    Contour::new(
                        points
                            .into_iter()
                            .map(|p| GridPoint::quantize(p.x, p.y, options.px_step))
                            .collect(),
                    )
                })
                .collect::<Vec<_>>();
            let advance_width = (norad_glyph.width / f64::from(options.px_step)).floor() as i32;

            for ch in norad_glyph.codepoints.iter() {
                let glyph = if ch.is_whitespace() {
                    Glyph::blank(ch, advance_width)
                } else {
                    Glyph::new(ch, contours.clone(), advance_width, 0)
                };
                tracing::trace!(
                    "Mapped '{}' to glyph {} ({} contours, width {})",
                    ch,
                    norad_glyph.name(),
                    glyph.contours.len(),
                    glyph.advance_width
                );
                glyphs.insert(ch, glyph);
            }
        }

        let declared = font.font_info.cap_height.or(font.font_info.ascender);
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

/// Font-unit contours of a glyph with its components flattened in.
fn collect_contours(
    glyph: &norad::Glyph,
    by_name: &HashMap<String, &norad::Glyph>,
    transform: Affine,
    depth: usize,
) -> Vec<Vec<Point>> {
    let mut contours: Vec<Vec<Point>> = glyph
        .contours
        .iter()
        .map(|contour| {
            contour
                .points
                .iter()
                .map(|p| transform * Point::new(p.x, p.y))
                .collect()
        })
        .collect();

    if depth >= MAX_COMPONENT_DEPTH {
        if !glyph.components.is_empty() {
            tracing::warn!("Component nesting too deep in glyph {}", glyph.name());
        }
        return contours;
    }

    for component in &glyph.components {
        let base_name = component.base.to_string();
        let Some(base) = by_name.get(&base_name) else {
            tracing::warn!(
                "Glyph {} references missing component base {}",
                glyph.name(),
                base_name
            );
            continue;
        };
        let t = &component.transform;
        let local = Affine::new([
            t.x_scale, t.xy_scale, t.yx_scale, t.y_scale, t.x_offset, t.y_offset,
        ]);
        contours.extend(collect_contours(base, by_name, transform * local, depth + 1));
    }

    contours
}

impl GlyphSource for UfoGlyphSource {
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
