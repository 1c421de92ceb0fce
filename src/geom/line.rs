//! Line-like primitives with distinct bound semantics.
//!
//! All three share `(start, end)` storage but intersection functions accept
//! only the variant whose bounds they honor, so callers state their intent
//! in the type instead of by convention.

use glam::Vec2;

/// An unbounded line through two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteLine {
    pub start: Vec2,
    pub end: Vec2,
}

/// A line bounded at both endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

/// A line anchored at `origin`, passing through `through`.
///
/// The ray extends past `through` on axes where the direction increases;
/// on a non-increasing axis it is bounded at the smaller endpoint. This
/// mixed semantic is inherited behavior that game code depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub through: Vec2,
}

impl InfiniteLine {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        }
    }

    /// Foot of the perpendicular dropped from `point` onto this line,
    /// together with the perpendicular distance.
    ///
    /// A zero-length line degenerates to its single point.
    pub fn perp_foot(&self, point: Vec2) -> (Vec2, f32) {
        let dir = self.end - self.start;
        let len2 = dir.length_squared();
        let foot = if len2 == 0.0 {
            self.start
        } else {
            self.start + dir * ((point - self.start).dot(dir) / len2)
        };
        (foot, (point - foot).length())
    }
}

impl Segment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.start.x.min(self.end.x)
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.start.x.max(self.end.x)
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.start.y.min(self.end.y)
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.start.y.max(self.end.y)
    }

    /// Whether `(x, y)` lies inside the segment's bounding box (inclusive).
    #[inline]
    pub fn bounds_contain(&self, x: f32, y: f32) -> bool {
        x >= self.min_x() && x <= self.max_x() && y >= self.min_y() && y <= self.max_y()
    }
}

impl Ray {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            origin: Vec2::new(x1, y1),
            through: Vec2::new(x2, y2),
        }
    }
}

impl From<Segment> for InfiniteLine {
    fn from(seg: Segment) -> Self {
        Self {
            start: seg.start,
            end: seg.end,
        }
    }
}

impl From<Ray> for InfiniteLine {
    fn from(ray: Ray) -> Self {
        Self {
            start: ray.origin,
            end: ray.through,
        }
    }
}

impl From<Ray> for Segment {
    fn from(ray: Ray) -> Self {
        Self {
            start: ray.origin,
            end: ray.through,
        }
    }
}
