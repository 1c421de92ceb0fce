//! Geometric primitives and the primitive intersection library.

pub mod circle;
pub mod intersect;
pub mod line;
pub mod polygon;
pub mod rect;

pub use circle::Circle;
pub use intersect::IntersectResult;
pub use line::{InfiniteLine, Ray, Segment};
pub use polygon::Polygon;
pub use rect::Rect;

use thiserror::Error;

/// Errors raised while constructing geometric primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeomError {
    /// A polygon needs at least three vertices to have edges and normals.
    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),
}

/// Distance between two coordinates.
#[inline]
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    distance_squared(x1, y1, x2, y2).sqrt()
}

/// Squared distance between two coordinates. Preferred in comparisons
/// to avoid the square root.
#[inline]
pub fn distance_squared(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1)
}
