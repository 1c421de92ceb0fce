//! Convex polygon with precomputed edges and outward normals.

use glam::Vec2;

use super::GeomError;

/// A convex polygon given as clockwise-wound vertices relative to `pos`.
///
/// Edges and unit outward normals are precomputed at construction;
/// `normals[i]` belongs to the edge from `points[i]` to `points[i + 1]`.
/// The SAT tester relies on the normals being unit length and outward.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub pos: Vec2,
    points: Vec<Vec2>,
    edges: Vec<Vec2>,
    normals: Vec<Vec2>,
}

/// Clockwise perpendicular, the outward direction for clockwise winding.
#[inline]
pub(crate) fn perp(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

impl Polygon {
    /// Build a polygon from clockwise vertices.
    pub fn new(pos: Vec2, points: Vec<Vec2>) -> Result<Self, GeomError> {
        if points.len() < 3 {
            return Err(GeomError::DegeneratePolygon(points.len()));
        }
        let mut polygon = Self {
            pos,
            points,
            edges: Vec::new(),
            normals: Vec::new(),
        };
        polygon.recalc();
        Ok(polygon)
    }

    /// Axis-aligned rectangle as a polygon, anchored at `(x, y)`.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(
            Vec2::new(x, y),
            vec![
                Vec2::ZERO,
                Vec2::new(width, 0.0),
                Vec2::new(width, height),
                Vec2::new(0.0, height),
            ],
        )
        .expect("rectangle polygon has 4 vertices")
    }

    fn recalc(&mut self) {
        let len = self.points.len();
        self.edges.clear();
        self.normals.clear();
        for i in 0..len {
            let next = if i == len - 1 { 0 } else { i + 1 };
            let edge = self.points[next] - self.points[i];
            self.edges.push(edge);
            self.normals.push(perp(edge).normalize_or_zero());
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    #[inline]
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Replace the vertices and recompute edges and normals.
    pub fn set_points(&mut self, points: Vec<Vec2>) -> Result<(), GeomError> {
        if points.len() < 3 {
            return Err(GeomError::DegeneratePolygon(points.len()));
        }
        self.points = points;
        self.recalc();
        Ok(())
    }
}
