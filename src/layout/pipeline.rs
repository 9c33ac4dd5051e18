//! Text to dated squares
//!
//! Characters are laid out left to right. When the next character does not
//! fit the active year any more, layout continues on a fresh canvas for the
//! year before, so long text spills further into the past.

use super::canvas::{CalendarCanvas, CommitSquare, Padding};
use super::glyph_layout::GlyphLayoutEngine;
use crate::core::errors::{CapacityExceeded, LayoutResult};
use crate::font_source::GlyphSource;
use crate::geometry::{RasterStrategy, Square};

/// Settings for one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Year of the first (newest) canvas
    pub start_year: i32,
    pub padding: Padding,
    pub strategy: RasterStrategy,
}

impl LayoutOptions {
    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            padding: Padding::default(),
            strategy: RasterStrategy::default(),
        }
    }
}

pub struct LayoutPipeline<S> {
    source: S,
    engine: GlyphLayoutEngine,
    options: LayoutOptions,
}

impl<S: GlyphSource> LayoutPipeline<S> {
    pub fn new(source: S, options: LayoutOptions) -> Self {
        Self {
            source,
            engine: GlyphLayoutEngine::new(options.strategy),
            options,
        }
    }

    /// Start laying out `text`.
    ///
    /// Every character is checked against the glyph source and the first
    /// canvas is built before anything is produced, so a missing glyph or a
    /// bad start year fails here rather than partway through the stream.
    pub fn run<'a>(&'a self, text: &str) -> LayoutResult<CommitSquares<'a, S>> {
        self.source.check_text(text)?;
        let canvas = CalendarCanvas::new(self.options.start_year, self.options.padding)?;
        tracing::debug!(
            "Laying out {} characters starting in {}",
            text.chars().count(),
            canvas.year()
        );
        Ok(CommitSquares {
            pipeline: self,
            chars: text.chars().collect::<Vec<_>>().into_iter(),
            canvas,
            pending: Vec::new().into_iter(),
            pending_advance: None,
            done: false,
        })
    }

    /// Eager variant of [`run`](Self::run)
    pub fn collect(&self, text: &str) -> LayoutResult<Vec<CommitSquare>> {
        self.run(text)?.collect()
    }
}

/// Lazy, single-pass stream of laid out squares.
///
/// Squares of one character come out in row-major order, characters in text
/// order. The stream ends after the first error.
pub struct CommitSquares<'a, S> {
    pipeline: &'a LayoutPipeline<S>,
    chars: std::vec::IntoIter<char>,
    canvas: CalendarCanvas,
    pending: std::vec::IntoIter<Square>,
    pending_advance: Option<i32>,
    done: bool,
}

impl<S: GlyphSource> CommitSquares<'_, S> {
    /// The canvas currently being written
    pub fn canvas(&self) -> &CalendarCanvas {
        &self.canvas
    }

    /// Lay out the next character, rolling over when it does not fit.
    ///
    /// Returns `Ok(false)` once the text is exhausted.
    fn next_char(&mut self) -> LayoutResult<bool> {
        if let Some(width) = self.pending_advance.take() {
            self.canvas = self.canvas.advanced(width);
        }
        let Some(ch) = self.chars.next() else {
            return Ok(false);
        };

        let glyph = self.pipeline.source.contours_of(ch)?;
        let laid = self.pipeline.engine.layout(&glyph);

        if !self.canvas.is_inside(laid.width) {
            let previous = self.canvas.previous_year()?;
            tracing::info!(
                "'{}' does not fit {} at column {}, rolling over to {}",
                ch,
                self.canvas.year(),
                self.canvas.dx(),
                previous.year()
            );
            if !previous.is_inside(laid.width) {
                return Err(CapacityExceeded::CharacterTooWide {
                    ch,
                    width: laid.width,
                    year: previous.year(),
                }
                .into());
            }
            self.canvas = previous;
        }

        let mut squares: Vec<Square> = laid.squares.into_iter().collect();
        squares.sort_by_key(|s| (s.y, s.x));
        self.pending = squares.into_iter();
        self.pending_advance = Some(laid.width);
        Ok(true)
    }
}

impl<S: GlyphSource> Iterator for CommitSquares<'_, S> {
    type Item = LayoutResult<CommitSquare>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(square) = self.pending.next() {
                let result = self.canvas.local_to_date(square.x, square.y);
                self.done = result.is_err();
                return Some(result);
            }
            match self.next_char() {
                Ok(true) => continue,
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::LayoutError;
    use crate::font_source::StaticGlyphSource;
    use crate::geometry::Contour;
    use chrono::{Datelike, Duration};

    /// A three-row block glyph of the given width
    fn block(width: i32) -> Contour {
        Contour::from(vec![(0, 0), (width, 0), (width, 3), (0, 3)])
    }

    fn source() -> StaticGlyphSource {
        StaticGlyphSource::new()
            .with_blank_advance(1)
            .with_glyph('a', vec![block(1)], 2)
            .with_glyph('W', vec![block(10)], 11)
            .with_glyph('M', vec![block(60)], 60)
    }

    #[test]
    fn test_single_char_positions() {
        let pipeline = LayoutPipeline::new(source(), LayoutOptions::new(2024));
        let squares = pipeline.collect("a").unwrap();
        let positions: Vec<(i32, i32)> = squares.iter().map(|s| (s.column, s.row)).collect();
        assert_eq!(positions, vec![(1, 1), (1, 2), (1, 3)]);

        let begin = CalendarCanvas::topleft(2024).unwrap().and_hms_opt(6, 0, 0).unwrap();
        assert_eq!(squares[0].date, begin + Duration::weeks(1) + Duration::days(1));
    }

    #[test]
    fn test_whitespace_advances_cursor() {
        let pipeline = LayoutPipeline::new(source(), LayoutOptions::new(2024));
        let squares = pipeline.collect("a a").unwrap();
        let columns: Vec<i32> = squares.iter().map(|s| s.column).collect();
        // 'a' at dx 0, space at dx 2, second 'a' at dx 3
        assert_eq!(columns, vec![1, 1, 1, 4, 4, 4]);
    }

    #[test]
    fn test_missing_glyph_fails_before_layout() {
        let pipeline = LayoutPipeline::new(source(), LayoutOptions::new(2024));
        assert!(matches!(
            pipeline.run("aaz"),
            Err(LayoutError::GlyphNotFound('z'))
        ));
    }

    #[test]
    fn test_rollover_happens_once_at_first_overflow() {
        // 2024 spans 51 weeks: the fifth 'W' would start at dx 44 and
        // 11 + 44 + 1 is not below 51 - 1.
        let pipeline = LayoutPipeline::new(source(), LayoutOptions::new(2024));
        let mut stream = pipeline.run("WWWWWW").unwrap();

        let mut years_per_char = Vec::new();
        let mut last = None;
        while let Some(square) = stream.next() {
            let square = square.unwrap();
            let year = stream.canvas().year();
            let char_start = stream.canvas().dx();
            if last != Some((year, char_start)) {
                years_per_char.push((year, char_start));
                last = Some((year, char_start));
            }
            assert!(square.column > 0);
        }
        assert_eq!(
            years_per_char,
            vec![
                (2024, 0),
                (2024, 11),
                (2024, 22),
                (2024, 33),
                (2023, 0),
                (2023, 11),
            ]
        );
    }

    #[test]
    fn test_rolled_over_char_starts_at_padding() {
        let pipeline = LayoutPipeline::new(source(), LayoutOptions::new(2024));
        let squares = pipeline.collect("WWWWW").unwrap();
        let last = squares.last().unwrap();
        // The fifth 'W' lands on the 2023 canvas with the cursor reset
        let begin_2023 = CalendarCanvas::topleft(2023).unwrap();
        assert_eq!(last.date.year(), 2023);
        assert_eq!(last.column, 10);
        assert_eq!(
            last.date,
            begin_2023.and_hms_opt(6, 0, 0).unwrap()
                + Duration::weeks(10)
                + Duration::days(i64::from(last.row))
        );
        assert!(last.date.date() >= begin_2023);
    }

    #[test]
    fn test_too_wide_char_fails() {
        let pipeline = LayoutPipeline::new(source(), LayoutOptions::new(2024));
        let result = pipeline.collect("aM");
        assert!(matches!(
            result,
            Err(LayoutError::CanvasCapacityExceeded(
                CapacityExceeded::CharacterTooWide { ch: 'M', width: 60, year: 2023 }
            ))
        ));
    }

    #[test]
    fn test_stream_stops_after_error() {
        let tall = StaticGlyphSource::new().with_glyph(
            'T',
            vec![Contour::from(vec![(0, 0), (1, 0), (1, 9), (0, 9)])],
            2,
        );
        let pipeline = LayoutPipeline::new(tall, LayoutOptions::new(2024));
        let mut stream = pipeline.run("T").unwrap();
        // Row 0 lands on row 1, row 5 on row 6, row 6 overflows
        for _ in 0..6 {
            assert!(stream.next().unwrap().is_ok());
        }
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_empty_text() {
        let pipeline = LayoutPipeline::new(source(), LayoutOptions::new(2024));
        assert!(pipeline.collect("").unwrap().is_empty());
    }
}
