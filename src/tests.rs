#[cfg(test)]
mod pipeline_tests {
    use crate::core::runner::{check_font, plan_squares};
    use crate::core::LayoutError;
    use crate::font_source::{
        pixel_font as builtin_font, GlyphSource, GlyphSourceOptions, StaticGlyphSource,
        UfoGlyphSource,
    };
    use crate::geometry::{Contour, RasterStrategy};
    use crate::layout::{CalendarCanvas, LayoutOptions, LayoutPipeline, Padding};
    use crate::sink::SkipList;
    use chrono::{Datelike, Duration, NaiveDate};
    use norad::{ContourPoint, Font, PointType};
    use std::collections::BTreeSet;

    /// Pixel-font style glyphs drawn in a 100-unit grid, four units tall
    fn pixel_font() -> Font {
        let mut font = Font::new();
        let layer = font.default_layer_mut();

        let shapes: [(&str, char, f64, Vec<(f64, f64)>); 2] = [
            // 'L': vertical bar with a foot
            (
                "L",
                'L',
                300.0,
                vec![
                    (0.0, 0.0),
                    (200.0, 0.0),
                    (200.0, 100.0),
                    (100.0, 100.0),
                    (100.0, 400.0),
                    (0.0, 400.0),
                ],
            ),
            // 'I': plain vertical bar
            ("I", 'I', 200.0, vec![(0.0, 0.0), (100.0, 0.0), (100.0, 400.0), (0.0, 400.0)]),
        ];
        for (name, ch, width, points) in shapes {
            let mut glyph = norad::Glyph::new(name);
            glyph.width = width;
            glyph.codepoints.insert(ch);
            let points = points
                .into_iter()
                .map(|(x, y)| ContourPoint::new(x, y, PointType::Line, false, None, None))
                .collect();
            glyph.contours.push(norad::Contour::new(points, None));
            layer.insert_glyph(glyph);
        }

        let mut space = norad::Glyph::new("space");
        space.width = 100.0;
        space.codepoints.insert(' ');
        layer.insert_glyph(space);

        font
    }

    fn pixel_source() -> UfoGlyphSource {
        let options = GlyphSourceOptions {
            px_step: 100,
            line_height: Some(4),
            ..Default::default()
        };
        UfoGlyphSource::from_font(&pixel_font(), options).unwrap()
    }

    #[test]
    fn test_ufo_text_to_dates() {
        let source = pixel_source();
        let squares = plan_squares(&source, "L I", LayoutOptions::new(2024), &SkipList::default())
            .unwrap();

        let positions: BTreeSet<(i32, i32)> =
            squares.iter().map(|s| (s.column, s.row)).collect();
        // 'L' at dx 0, space at dx 3, 'I' at dx 4; rows shifted by the top padding
        let expected: BTreeSet<(i32, i32)> = [
            (1, 1), (1, 2), (1, 3), (1, 4), (2, 4),
            (5, 1), (5, 2), (5, 3), (5, 4),
        ]
        .into_iter()
        .collect();
        assert_eq!(positions, expected);

        let begin = CalendarCanvas::topleft(2024).unwrap();
        for square in &squares {
            let expected_date = begin.and_hms_opt(6, 0, 0).unwrap()
                + Duration::weeks(i64::from(square.column))
                + Duration::days(i64::from(square.row));
            assert_eq!(square.date, expected_date);
            assert_eq!(square.date.weekday().num_days_from_sunday() as i32, square.row);
        }
    }

    #[test]
    fn test_strategies_agree_on_pixel_font() {
        let source = pixel_source();
        let flood = LayoutOptions {
            strategy: RasterStrategy::FloodFill,
            ..LayoutOptions::new(2022)
        };
        let even_odd = LayoutOptions {
            strategy: RasterStrategy::EvenOdd,
            ..LayoutOptions::new(2022)
        };
        let a: BTreeSet<_> = LayoutPipeline::new(&source, flood)
            .collect("LIL")
            .unwrap()
            .into_iter()
            .collect();
        let b: BTreeSet<_> = LayoutPipeline::new(&source, even_odd)
            .collect("LIL")
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 14);
    }

    fn unit_rect(name: &str, ch: char, width: f64, top: f64) -> norad::Glyph {
        let mut glyph = norad::Glyph::new(name);
        glyph.width = width;
        glyph.codepoints.insert(ch);
        let points = [(0.0, 0.0), (200.0, 0.0), (200.0, top), (0.0, top)]
            .into_iter()
            .map(|(x, y)| ContourPoint::new(x, y, PointType::Line, false, None, None))
            .collect();
        glyph.contours.push(norad::Contour::new(points, None));
        glyph
    }

    #[test]
    fn test_glyphs_sit_on_a_shared_baseline() {
        let mut font = Font::new();
        let layer = font.default_layer_mut();
        layer.insert_glyph(unit_rect("I", 'I', 400.0, 800.0));
        layer.insert_glyph(unit_rect("period", '.', 400.0, 200.0));
        let source = UfoGlyphSource::from_font(&font, GlyphSourceOptions::default()).unwrap();

        let squares = plan_squares(&source, "I.", LayoutOptions::new(2024), &SkipList::default())
            .unwrap();
        let positions: BTreeSet<(i32, i32)> =
            squares.iter().map(|s| (s.column, s.row)).collect();
        // The period lands on the bottom row of the 'I', not on its top row
        let expected = BTreeSet::from([(1, 1), (1, 2), (1, 3), (1, 4), (3, 4)]);
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_builtin_font_without_font_file() {
        let source = builtin_font();
        let squares = plan_squares(&source, "hi", LayoutOptions::new(2024), &SkipList::default())
            .unwrap();
        // 'H' lights 11 pixels, 'I' lights 9 and starts after the 4-column 'H'
        assert_eq!(squares.len(), 20);
        assert!(squares.iter().all(|s| (1..=5).contains(&s.row)));
        let columns: BTreeSet<i32> = squares.iter().map(|s| s.column).collect();
        assert_eq!(columns, BTreeSet::from([1, 2, 3, 5, 6, 7]));
    }

    #[test]
    fn test_skip_list_drops_dates() {
        let source = pixel_source();
        let all = plan_squares(&source, "I", LayoutOptions::new(2024), &SkipList::default())
            .unwrap();
        assert_eq!(all.len(), 4);

        let skipped_day = all[0].date.date();
        let skip = SkipList::parse(&format!("{}\n", skipped_day.format("%Y-%m-%d"))).unwrap();
        let kept = plan_squares(&source, "I", LayoutOptions::new(2024), &skip).unwrap();
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|s| s.date.date() != skipped_day));
    }

    #[test]
    fn test_missing_char_is_reported_first() {
        let source = pixel_source();
        assert_eq!(check_font(&source, "LIZ"), Err(LayoutError::GlyphNotFound('Z')));
        assert!(matches!(
            plan_squares(&source, "LIZ", LayoutOptions::new(2024), &SkipList::default()),
            Err(LayoutError::GlyphNotFound('Z'))
        ));
    }

    #[test]
    fn test_long_text_spills_into_previous_year() {
        // Each 'I' advances two columns; 2024 leaves 48 usable columns
        let source = pixel_source();
        let text = "I".repeat(30);
        let squares = plan_squares(&source, &text, LayoutOptions::new(2024), &SkipList::default())
            .unwrap();

        let years: BTreeSet<i32> = squares.iter().map(|s| s.date.year()).collect();
        assert_eq!(years, BTreeSet::from([2023, 2024]));
        // Characters at dx 0, 2, ..., 46 fit; the 25th rolls over
        let in_2024 = squares.iter().filter(|s| s.date.year() == 2024).count();
        assert_eq!(in_2024, 24 * 4);
        let first_2023 = squares.iter().find(|s| s.date.year() == 2023).unwrap();
        assert_eq!(first_2023.column, 1);
        assert_eq!(
            first_2023.date.date(),
            CalendarCanvas::topleft(2023).unwrap() + Duration::weeks(1) + Duration::days(1)
        );
    }

    #[test]
    fn test_custom_padding() {
        let source = StaticGlyphSource::new().with_glyph(
            '.',
            vec![Contour::from(vec![(0, 0), (1, 0), (1, 1), (0, 1)])],
            1,
        );
        let options = LayoutOptions {
            padding: Padding { top: 3, right: 0, left: 5 },
            ..LayoutOptions::new(2021)
        };
        let squares = LayoutPipeline::new(&source, options).collect(".").unwrap();
        assert_eq!(squares.len(), 1);
        assert_eq!((squares[0].column, squares[0].row), (5, 3));
        assert!(source.has_char('.'));
        assert_eq!(
            squares[0].date.date(),
            NaiveDate::from_ymd_opt(2021, 1, 3).unwrap() + Duration::weeks(5) + Duration::days(3)
        );
    }
}
