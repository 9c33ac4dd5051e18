//! Integer grid primitives
//!
//! Glyph outlines are quantized into grid units before any rasterization
//! happens, so everything in this module is integer-valued.

/// A point in grid units (font units floor-divided by the pixel step)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantize a font-unit coordinate pair by floor division.
    ///
    /// This is lossy: several font-unit points collapse onto one grid point.
    pub fn quantize(x: f64, y: f64, px_step: u32) -> Self {
        let step = f64::from(px_step);
        Self {
            x: (x / step).floor() as i32,
            y: (y / step).floor() as i32,
        }
    }

    pub(crate) fn scaled(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One grid cell judged interior to a glyph.
///
/// The cell `(x, y)` covers `[x, x + 1) x [y, y + 1)`; its center is at
/// `(x + 0.5, y + 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    pub x: i32,
    pub y: i32,
}

impl Square {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn center(&self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x) + 0.5, f64::from(self.y) + 0.5)
    }
}

/// Closed polygonal outline; the edge from the last point back to the first
/// is implied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    pub points: Vec<GridPoint>,
}

impl Contour {
    pub fn new(points: Vec<GridPoint>) -> Self {
        Self { points }
    }

    /// Inclusive bounding box as `(min, max)`, `None` for an empty contour
    pub fn bounds(&self) -> Option<(GridPoint, GridPoint)> {
        let first = *self.points.first()?;
        let bounds = self.points.iter().fold((first, first), |(min, max), p| {
            (
                GridPoint::new(min.x.min(p.x), min.y.min(p.y)),
                GridPoint::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(bounds)
    }

    /// Edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (GridPoint, GridPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Fewer than three points, or no enclosed area.
    ///
    /// A self-intersecting contour like a figure eight can have a zero
    /// signed area and still enclose cells, so only a contour whose points
    /// are all collinear counts as zero-area here.
    pub fn is_degenerate(&self) -> bool {
        if self.points.len() < 3 {
            return true;
        }
        let a = self.points[0];
        let Some(b) = self.points.iter().copied().find(|p| *p != a) else {
            return true;
        };
        self.points.iter().all(|p| {
            let cross = i64::from(b.x - a.x) * i64::from(p.y - a.y)
                - i64::from(b.y - a.y) * i64::from(p.x - a.x);
            cross == 0
        })
    }
}

impl From<Vec<(i32, i32)>> for Contour {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Self::new(points.into_iter().map(GridPoint::from).collect())
    }
}
