//! ghht
//!
//! Paints text onto a commit activity heatmap: glyph outlines are
//! rasterized into grid squares, laid out on one 7-row week grid per year,
//! and every square is turned into a date.
pub mod core;
pub mod font_source;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod sink;
#[cfg(test)]
mod tests;
