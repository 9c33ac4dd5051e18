//! Error types for glyph lookup and calendar layout
//!
//! Every failure here is a deterministic function of the font, the text,
//! the year and the padding, so none of them is worth retrying.

use thiserror::Error;

/// Errors produced while turning text into dated grid squares.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The font has no glyph mapped to this character.
    #[error("font has no char '{0}'")]
    GlyphNotFound(char),

    /// The font/canvas combination cannot represent the layout.
    #[error("canvas capacity exceeded: {0}")]
    CanvasCapacityExceeded(CapacityExceeded),

    /// The year lies outside the supported calendar range.
    #[error("year {0} cannot be represented as a calendar date")]
    InvalidYear(i32),
}

/// The ways a layout can overflow the fixed 7x53 canvas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityExceeded {
    #[error("year {year} spans {weeks} weeks, expected 1..={max}")]
    WeeksOutOfRange { year: i32, weeks: i64, max: i32 },

    #[error("row {row} is outside the {rows}-row canvas of year {year}")]
    RowOutOfRange { year: i32, row: i32, rows: i32 },

    #[error("character '{ch}' of width {width} does not fit an empty canvas for year {year}")]
    CharacterTooWide { ch: char, width: i32, year: i32 },
}

impl From<CapacityExceeded> for LayoutError {
    fn from(err: CapacityExceeded) -> Self {
        LayoutError::CanvasCapacityExceeded(err)
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;
