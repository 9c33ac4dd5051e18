//! Geometric Primitives and Rasterization

pub mod point;
pub mod rasterize;

pub use point::{Contour, GridPoint, Square};
pub use rasterize::{
    contains_even_odd, rasterize, rasterize_even_odd, rasterize_flood_fill, RasterStrategy,
};
