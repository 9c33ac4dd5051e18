//! Calendar layout
//!
//! Turns glyphs into grid squares and places them on one week grid per
//! year, converting every square into the date it stands for.

pub mod canvas;
pub mod glyph_layout;
pub mod pipeline;

pub use canvas::{CalendarCanvas, CommitSquare, Padding, HOUR_OFFSET, MAX_COLUMNS, ROWS};
pub use glyph_layout::{GlyphLayoutEngine, LaidOutGlyph};
pub use pipeline::{CommitSquares, LayoutOptions, LayoutPipeline};
