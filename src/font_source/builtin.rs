//! Built-in pixel font
//!
//! A five-row bitmap font covering A-Z, 0-9 and some punctuation, used when
//! no font file is configured. Lowercase letters share the uppercase
//! shapes. Every lit pixel becomes a one-square contour.

use super::{Glyph, StaticGlyphSource};
use crate::geometry::Contour;

/// Rows of every built-in glyph
pub const HEIGHT: i32 = 5;
/// Advance of whitespace, in squares
pub const SPACE_ADVANCE: i32 = 2;

type Bitmap = [&'static str; HEIGHT as usize];

const GLYPHS: &[(char, Bitmap)] = &[
    ('A', [".#.", "#.#", "###", "#.#", "#.#"]),
    ('B', ["##.", "#.#", "##.", "#.#", "##."]),
    ('C', [".##", "#..", "#..", "#..", ".##"]),
    ('D', ["##.", "#.#", "#.#", "#.#", "##."]),
    ('E', ["###", "#..", "##.", "#..", "###"]),
    ('F', ["###", "#..", "##.", "#..", "#.."]),
    ('G', [".##", "#..", "#.#", "#.#", ".##"]),
    ('H', ["#.#", "#.#", "###", "#.#", "#.#"]),
    ('I', ["###", ".#.", ".#.", ".#.", "###"]),
    ('J', ["..#", "..#", "..#", "#.#", ".#."]),
    ('K', ["#.#", "#.#", "##.", "#.#", "#.#"]),
    ('L', ["#..", "#..", "#..", "#..", "###"]),
    ('M', ["#...#", "##.##", "#.#.#", "#...#", "#...#"]),
    ('N', ["#..#", "##.#", "#.##", "#..#", "#..#"]),
    ('O', [".#.", "#.#", "#.#", "#.#", ".#."]),
    ('P', ["##.", "#.#", "##.", "#..", "#.."]),
    ('Q', [".#.", "#.#", "#.#", "##.", ".##"]),
    ('R', ["##.", "#.#", "##.", "#.#", "#.#"]),
    ('S', [".##", "#..", ".#.", "..#", "##."]),
    ('T', ["###", ".#.", ".#.", ".#.", ".#."]),
    ('U', ["#.#", "#.#", "#.#", "#.#", "###"]),
    ('V', ["#.#", "#.#", "#.#", "#.#", ".#."]),
    ('W', ["#...#", "#...#", "#.#.#", "##.##", "#...#"]),
    ('X', ["#.#", "#.#", ".#.", "#.#", "#.#"]),
    ('Y', ["#.#", "#.#", ".#.", ".#.", ".#."]),
    ('Z', ["###", "..#", ".#.", "#..", "###"]),
    ('0', ["###", "#.#", "#.#", "#.#", "###"]),
    ('1', [".#.", "##.", ".#.", ".#.", "###"]),
    ('2', ["##.", "..#", ".#.", "#..", "###"]),
    ('3', ["##.", "..#", ".#.", "..#", "##."]),
    ('4', ["#.#", "#.#", "###", "..#", "..#"]),
    ('5', ["###", "#..", "##.", "..#", "##."]),
    ('6', [".##", "#..", "###", "#.#", "###"]),
    ('7', ["###", "..#", ".#.", ".#.", ".#."]),
    ('8', ["###", "#.#", "###", "#.#", "###"]),
    ('9', ["###", "#.#", "###", "..#", "##."]),
    ('!', ["#", "#", "#", ".", "#"]),
    ('.', [".", ".", ".", ".", "#"]),
    (',', [".", ".", ".", "#", "#"]),
    (':', [".", "#", ".", "#", "."]),
    ('\'', ["#", "#", ".", ".", "."]),
    ('?', ["##.", "..#", ".#.", "...", ".#."]),
    ('-', ["...", "...", "###", "...", "..."]),
    ('+', ["...", ".#.", "###", ".#.", "..."]),
];

/// The built-in font as a glyph source
pub fn pixel_font() -> StaticGlyphSource {
    let mut source = StaticGlyphSource::new().with_blank_advance(SPACE_ADVANCE);
    for &(ch, bitmap) in GLYPHS {
        let glyph = bitmap_glyph(ch, &bitmap);
        if ch.is_ascii_uppercase() {
            let lower = ch.to_ascii_lowercase();
            source.insert(Glyph { ch: lower, ..glyph.clone() });
        }
        source.insert(glyph);
    }
    source
}

/// One unit square per `#`, with the first bitmap row at the top
fn bitmap_glyph(ch: char, bitmap: &Bitmap) -> Glyph {
    let width = bitmap.iter().map(|row| row.len()).max().unwrap_or(0) as i32;
    let contours = bitmap
        .iter()
        .zip((0..HEIGHT).rev())
        .flat_map(|(row, y)| {
            row.char_indices()
                .filter(|&(_, c)| c == '#')
                .map(move |(x, _)| {
                    let x = x as i32;
                    Contour::from(vec![(x, y), (x + 1, y), (x + 1, y + 1), (x, y + 1)])
                })
        })
        .collect();
    Glyph::new(ch, contours, width + 1, HEIGHT)
}
