//! Glyph sources
//!
//! A glyph source answers, per character, with the character's contours in
//! grid units plus its advance width and height. Parsing font files is left
//! to `norad` (UFO) and `ttf-parser` (TrueType/OpenType); everything
//! downstream only sees [`Glyph`] values.

pub mod builtin;
pub mod glyph;
pub mod memory;
pub mod ttf;
pub mod ufo;

pub use builtin::pixel_font;
pub use glyph::Glyph;
pub use memory::StaticGlyphSource;
pub use ttf::TtfGlyphSource;
pub use ufo::UfoGlyphSource;

use crate::core::errors::{LayoutError, LayoutResult};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Lookup surface consumed by the layout pipeline
pub trait GlyphSource {
    /// Whether `contours_of` would succeed for this character
    fn has_char(&self, ch: char) -> bool;

    /// The quantized glyph for `ch`, or [`LayoutError::GlyphNotFound`]
    fn contours_of(&self, ch: char) -> LayoutResult<Glyph>;

    /// First character of `text` the source cannot provide
    fn first_missing(&self, text: &str) -> Option<char> {
        text.chars().find(|&ch| !self.has_char(ch))
    }

    /// Fail with [`LayoutError::GlyphNotFound`] unless every character is
    /// available.
    fn check_text(&self, text: &str) -> LayoutResult<()> {
        match self.first_missing(text) {
            Some(ch) => Err(LayoutError::GlyphNotFound(ch)),
            None => Ok(()),
        }
    }
}

impl<S: GlyphSource + ?Sized> GlyphSource for &S {
    fn has_char(&self, ch: char) -> bool {
        (**self).has_char(ch)
    }

    fn contours_of(&self, ch: char) -> LayoutResult<Glyph> {
        (**self).contours_of(ch)
    }
}

/// How font units become grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSourceOptions {
    /// Font units per grid square
    pub px_step: u32,
    /// Shared glyph height for row inversion, overriding the font's own
    pub line_height: Option<i32>,
    /// Flip every glyph by its own top instead of one font-wide height
    pub per_glyph_height: bool,
    /// Advance given to whitespace the font does not map
    pub blank_advance: i32,
}

impl Default for GlyphSourceOptions {
    fn default() -> Self {
        Self {
            px_step: 200,
            line_height: None,
            per_glyph_height: false,
            blank_advance: 1,
        }
    }
}

/// Font-wide height in squares: the declared cap height (or ascender) when
/// the font has one, else the top of the tallest glyph.
pub fn font_height<'a>(
    declared: Option<f64>,
    px_step: u32,
    glyphs: impl Iterator<Item = &'a Glyph>,
) -> i32 {
    declared
        .map(|h| (h / f64::from(px_step)).floor() as i32)
        .filter(|&h| h > 0)
        .unwrap_or_else(|| glyphs.map(Glyph::y_max).max().unwrap_or(0))
}

/// Give every non-whitespace glyph the height its rows are flipped by.
fn assign_heights(
    glyphs: &mut HashMap<char, Glyph>,
    declared: Option<f64>,
    options: &GlyphSourceOptions,
) {
    let shared = match (options.line_height, options.per_glyph_height) {
        (Some(height), _) => Some(height),
        (None, true) => None,
        (None, false) => Some(font_height(declared, options.px_step, glyphs.values())),
    };
    if let Some(height) = shared {
        tracing::debug!("Flipping all glyphs by a height of {} squares", height);
    }
    for glyph in glyphs.values_mut() {
        if !glyph.ch.is_whitespace() {
            let height = shared.unwrap_or_else(|| glyph.y_max());
            glyph.height = height;
        }
    }
}

/// Whichever font the run was configured with
#[derive(Debug, Clone)]
pub enum LoadedFont {
    Ufo(UfoGlyphSource),
    Ttf(TtfGlyphSource),
    Builtin(StaticGlyphSource),
}

impl LoadedFont {
    /// Load `path` as a UFO directory or a TrueType/OpenType file, or fall
    /// back to the built-in pixel font when no path is given.
    pub fn open(path: Option<&Path>, options: GlyphSourceOptions) -> Result<Self> {
        match path {
            None => {
                tracing::info!("No font file given, using the built-in pixel font");
                Ok(Self::Builtin(pixel_font()))
            }
            Some(path) if is_ufo(path) => UfoGlyphSource::load(path, options).map(Self::Ufo),
            Some(path) => TtfGlyphSource::load(path, options).map(Self::Ttf),
        }
    }

    fn source(&self) -> &dyn GlyphSource {
        match self {
            Self::Ufo(source) => source,
            Self::Ttf(source) => source,
            Self::Builtin(source) => source,
        }
    }
}

impl GlyphSource for LoadedFont {
    fn has_char(&self, ch: char) -> bool {
        self.source().has_char(ch)
    }

    fn contours_of(&self, ch: char) -> LayoutResult<Glyph> {
        self.source().contours_of(ch)
    }
}

/// UFO fonts are directories, usually named `*.ufo`
pub fn is_ufo(path: &Path) -> bool {
    path.is_dir()
        || path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ufo"))
}
