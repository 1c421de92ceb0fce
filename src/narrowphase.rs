//! SAT narrow phase for circles and convex polygons.
//!
//! Axis projection with Voronoi regions for the polygon-vs-circle corner
//! cases. All temporaries come from a [`ScratchArena`] so the hot path
//! stays allocation-free; the guards hand their slots back on every exit,
//! including the early separating-axis returns.

use glam::Vec2;

use crate::geom::polygon::perp;
use crate::geom::{Circle, Polygon};
use crate::response::Response;
use crate::scratch::ScratchArena;

/// Region of a point relative to a directed edge: behind its start,
/// beside it, or past its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoronoiRegion {
    Left,
    Middle,
    Right,
}

/// Classify `point` against the edge vector `line` (both relative to the
/// edge's start).
#[inline]
pub fn voronoi_region(line: Vec2, point: Vec2) -> VoronoiRegion {
    let len2 = line.length_squared();
    let dp = point.dot(line);
    if dp < 0.0 {
        VoronoiRegion::Left
    } else if dp > len2 {
        VoronoiRegion::Right
    } else {
        VoronoiRegion::Middle
    }
}

/// Normalize, falling back to the unit diagonal for a zero vector so a
/// degenerate input still yields a usable push direction.
#[inline]
fn normalize_or_diagonal(v: Vec2) -> Vec2 {
    let n = v.normalize_or_zero();
    if n == Vec2::ZERO {
        Vec2::splat(std::f32::consts::FRAC_1_SQRT_2)
    } else {
        n
    }
}

/// Project `points` onto `normal`, writing `[min, max]` into `range`.
pub fn flatten_points_on(points: &[Vec2], normal: Vec2, range: &mut [f32; 2]) {
    let mut min = f32::MAX;
    let mut max = -f32::MAX;
    for point in points {
        let dot = point.dot(normal);
        min = min.min(dot);
        max = max.max(dot);
    }
    range[0] = min;
    range[1] = max;
}

/// Whether `axis` separates the two point sets.
///
/// Returns `true` for a gap (no collision on this axis). Otherwise, when a
/// response is given, folds the signed overlap into it: the smallest
/// absolute overlap wins, and the recorded normal is flipped to point from
/// the first shape toward the second. Containment flags are cleared by any
/// axis whose projection disproves them.
pub fn is_separating_axis(
    a_pos: Vec2,
    b_pos: Vec2,
    a_points: &[Vec2],
    b_points: &[Vec2],
    axis: Vec2,
    response: Option<&mut Response>,
    arena: &ScratchArena,
) -> bool {
    let mut range_a = arena.range();
    let mut range_b = arena.range();
    let mut offset = arena.vector();
    *offset = b_pos - a_pos;
    let projected_offset = offset.dot(axis);

    flatten_points_on(a_points, axis, &mut range_a);
    flatten_points_on(b_points, axis, &mut range_b);
    range_b[0] += projected_offset;
    range_b[1] += projected_offset;

    if range_a[0] > range_b[1] || range_b[0] > range_a[1] {
        return true;
    }

    if let Some(response) = response {
        let overlap;
        if range_a[0] < range_b[0] {
            response.a_in_b = false;
            if range_a[1] < range_b[1] {
                overlap = range_a[1] - range_b[0];
                response.b_in_a = false;
            } else {
                let option1 = range_a[1] - range_b[0];
                let option2 = range_b[1] - range_a[0];
                overlap = if option1 < option2 { option1 } else { -option2 };
            }
        } else {
            response.b_in_a = false;
            if range_a[1] > range_b[1] {
                overlap = range_a[0] - range_b[1];
                response.a_in_b = false;
            } else {
                let option1 = range_a[1] - range_b[0];
                let option2 = range_b[1] - range_a[0];
                overlap = if option1 < option2 { option1 } else { -option2 };
            }
        }
        let abs_overlap = overlap.abs();
        if abs_overlap < response.overlap {
            response.overlap = abs_overlap;
            response.overlap_n = if overlap < 0.0 { -axis } else { axis };
        }
    }
    false
}

/// Circle-vs-circle test. Clears the response on entry.
pub fn test_circle_circle(
    a: &Circle,
    b: &Circle,
    mut response: Option<&mut Response>,
    arena: &ScratchArena,
) -> bool {
    if let Some(r) = response.as_deref_mut() {
        r.clear();
    }
    let mut difference = arena.vector();
    *difference = b.pos - a.pos;
    let total_radius = a.radius + b.radius;
    let distance_sq = difference.length_squared();
    if distance_sq > total_radius * total_radius {
        return false;
    }
    if let Some(response) = response {
        let dist = distance_sq.sqrt();
        response.overlap = total_radius - dist;
        response.overlap_n = normalize_or_diagonal(*difference);
        response.overlap_v = response.overlap_n * response.overlap;
        response.a_in_b = a.radius <= b.radius && dist <= b.radius - a.radius;
        response.b_in_a = b.radius <= a.radius && dist <= a.radius - b.radius;
    }
    true
}

/// Polygon-vs-circle test. Clears the response on entry.
///
/// Walks the polygon's vertices, resolving each into a Voronoi region of
/// its incident edges. Left-region hits are deferred to the previous
/// vertex's right region so each corner is tested exactly once.
pub fn test_polygon_circle(
    polygon: &Polygon,
    circle: &Circle,
    mut response: Option<&mut Response>,
    arena: &ScratchArena,
) -> bool {
    if let Some(r) = response.as_deref_mut() {
        r.clear();
    }
    let mut circle_pos = arena.vector();
    *circle_pos = circle.pos - polygon.pos;
    let radius = circle.radius;
    let radius2 = radius * radius;
    let points = polygon.points();
    let edges = polygon.edges();
    let len = points.len();
    let mut edge = arena.vector();
    let mut point = arena.vector();

    for i in 0..len {
        let next = if i == len - 1 { 0 } else { i + 1 };
        let prev = if i == 0 { len - 1 } else { i - 1 };
        let mut overlap = 0.0;
        let mut overlap_n: Option<Vec2> = None;

        *edge = edges[i];
        *point = *circle_pos - points[i];

        // A vertex outside the circle rules out polygon-in-circle.
        if point.length_squared() > radius2 {
            if let Some(r) = response.as_deref_mut() {
                r.a_in_b = false;
            }
        }

        let mut region = voronoi_region(*edge, *point);
        if region == VoronoiRegion::Left {
            // Only a hit if the center also sits past the end of the
            // previous edge; otherwise the previous iteration owns it.
            *edge = edges[prev];
            let mut point2 = arena.vector();
            *point2 = *circle_pos - points[prev];
            region = voronoi_region(*edge, *point2);
            if region == VoronoiRegion::Right {
                let dist = point.length();
                if dist > radius {
                    return false;
                } else if let Some(r) = response.as_deref_mut() {
                    r.b_in_a = false;
                    overlap_n = Some(normalize_or_diagonal(*point));
                    overlap = radius - dist;
                }
            }
        } else if region == VoronoiRegion::Right {
            *edge = edges[next];
            *point = *circle_pos - points[next];
            region = voronoi_region(*edge, *point);
            if region == VoronoiRegion::Left {
                let dist = point.length();
                if dist > radius {
                    return false;
                } else if let Some(r) = response.as_deref_mut() {
                    r.b_in_a = false;
                    overlap_n = Some(normalize_or_diagonal(*point));
                    overlap = radius - dist;
                }
            }
        } else {
            let normal = normalize_or_diagonal(perp(*edge));
            let dist = point.dot(normal);
            let dist_abs = dist.abs();
            if dist > 0.0 && dist_abs > radius {
                return false;
            } else if let Some(r) = response.as_deref_mut() {
                overlap_n = Some(normal);
                overlap = radius - dist;
                // The circle poking out the far side still clears b-in-a.
                if dist >= 0.0 || overlap < 2.0 * radius {
                    r.b_in_a = false;
                }
            }
        }

        if let Some(n) = overlap_n {
            if let Some(r) = response.as_deref_mut() {
                if overlap.abs() < r.overlap.abs() {
                    r.overlap = overlap;
                    r.overlap_n = n;
                }
            }
        }
    }

    if let Some(response) = response {
        response.overlap_v = response.overlap_n * response.overlap;
    }
    true
}

/// Circle-vs-polygon test: delegates to [`test_polygon_circle`] and flips
/// the response back into the circle's frame.
pub fn test_circle_polygon(
    circle: &Circle,
    polygon: &Polygon,
    mut response: Option<&mut Response>,
    arena: &ScratchArena,
) -> bool {
    let result = test_polygon_circle(polygon, circle, response.as_deref_mut(), arena);
    if result {
        if let Some(response) = response {
            response.overlap_n = -response.overlap_n;
            response.overlap_v = -response.overlap_v;
            std::mem::swap(&mut response.a_in_b, &mut response.b_in_a);
        }
    }
    result
}

/// Polygon-vs-polygon SAT over both shapes' precomputed normals. Clears
/// the response on entry.
pub fn test_polygon_polygon(
    a: &Polygon,
    b: &Polygon,
    mut response: Option<&mut Response>,
    arena: &ScratchArena,
) -> bool {
    if let Some(r) = response.as_deref_mut() {
        r.clear();
    }
    for &normal in a.normals() {
        if is_separating_axis(
            a.pos,
            b.pos,
            a.points(),
            b.points(),
            normal,
            response.as_deref_mut(),
            arena,
        ) {
            return false;
        }
    }
    for &normal in b.normals() {
        if is_separating_axis(
            a.pos,
            b.pos,
            a.points(),
            b.points(),
            normal,
            response.as_deref_mut(),
            arena,
        ) {
            return false;
        }
    }
    if let Some(response) = response {
        response.overlap_v = response.overlap_n * response.overlap;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::{RANGE_SLOTS, VECTOR_SLOTS};
    use approx::assert_relative_eq;

    fn square(x: f32, y: f32, size: f32) -> Polygon {
        let mut p = Polygon::from_rect(0.0, 0.0, size, size);
        p.pos = Vec2::new(x, y);
        p
    }

    #[test]
    fn test_voronoi_region_classification() {
        let edge = Vec2::new(10.0, 0.0);
        assert_eq!(voronoi_region(edge, Vec2::new(-1.0, 3.0)), VoronoiRegion::Left);
        assert_eq!(voronoi_region(edge, Vec2::new(5.0, 3.0)), VoronoiRegion::Middle);
        assert_eq!(voronoi_region(edge, Vec2::new(11.0, 3.0)), VoronoiRegion::Right);
    }

    #[test]
    fn test_flatten_points_on_axis() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0), Vec2::new(-3.0, 7.0)];
        let mut range = [0.0; 2];
        flatten_points_on(&points, Vec2::X, &mut range);
        assert_relative_eq!(range[0], -3.0);
        assert_relative_eq!(range[1], 4.0);
    }

    #[test]
    fn test_circle_circle_overlap() {
        let arena = ScratchArena::new();
        let a = Circle::new(0.0, 0.0, 20.0);
        let b = Circle::new(30.0, 0.0, 20.0);
        let mut response = Response::new();
        assert!(test_circle_circle(&a, &b, Some(&mut response), &arena));
        assert_relative_eq!(response.overlap, 10.0);
        assert_relative_eq!(response.overlap_n.x, 1.0);
        assert_relative_eq!(response.overlap_v.x, 10.0);
        assert!(!response.a_in_b && !response.b_in_a);
    }

    #[test]
    fn test_circle_circle_symmetry() {
        let arena = ScratchArena::new();
        let a = Circle::new(0.0, 0.0, 20.0);
        let b = Circle::new(30.0, 0.0, 20.0);
        let mut ab = Response::new();
        let mut ba = Response::new();
        assert_eq!(
            test_circle_circle(&a, &b, Some(&mut ab), &arena),
            test_circle_circle(&b, &a, Some(&mut ba), &arena)
        );
        assert_relative_eq!(ab.overlap, ba.overlap);
        assert_relative_eq!(ab.overlap_n.x, -ba.overlap_n.x);
    }

    #[test]
    fn test_circle_circle_containment_flags() {
        let arena = ScratchArena::new();
        let small = Circle::new(0.0, 0.0, 5.0);
        let big = Circle::new(0.0, 0.0, 20.0);
        let mut response = Response::new();
        assert!(test_circle_circle(&small, &big, Some(&mut response), &arena));
        assert!(response.a_in_b);
        assert!(!response.b_in_a);
    }

    #[test]
    fn test_concentric_circles_get_diagonal_push() {
        let arena = ScratchArena::new();
        let a = Circle::new(5.0, 5.0, 4.0);
        let b = Circle::new(5.0, 5.0, 4.0);
        let mut response = Response::new();
        assert!(test_circle_circle(&a, &b, Some(&mut response), &arena));
        let d = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(response.overlap_n.x, d);
        assert_relative_eq!(response.overlap_n.y, d);
    }

    #[test]
    fn test_polygon_polygon_overlap() {
        let arena = ScratchArena::new();
        let a = square(0.0, 0.0, 40.0);
        let b = square(30.0, 0.0, 40.0);
        let mut response = Response::new();
        assert!(test_polygon_polygon(&a, &b, Some(&mut response), &arena));
        assert_relative_eq!(response.overlap, 10.0);
        assert_relative_eq!(response.overlap_n.x, 1.0);
        assert_relative_eq!(response.overlap_n.y, 0.0);
        assert_relative_eq!(response.overlap_v.x, 10.0);
    }

    #[test]
    fn test_polygon_polygon_symmetry() {
        let arena = ScratchArena::new();
        let a = square(0.0, 0.0, 40.0);
        let b = square(30.0, 0.0, 40.0);
        let mut ab = Response::new();
        let mut ba = Response::new();
        assert_eq!(
            test_polygon_polygon(&a, &b, Some(&mut ab), &arena),
            test_polygon_polygon(&b, &a, Some(&mut ba), &arena)
        );
        assert_relative_eq!(ab.overlap, ba.overlap);
        assert_relative_eq!(ab.overlap_n.x, -ba.overlap_n.x);
        assert_relative_eq!(ab.overlap_n.y, -ba.overlap_n.y);
    }

    #[test]
    fn test_polygon_polygon_separated() {
        let arena = ScratchArena::new();
        let a = square(0.0, 0.0, 40.0);
        let b = square(100.0, 0.0, 40.0);
        assert!(!test_polygon_polygon(&a, &b, Some(&mut Response::new()), &arena));
        assert_eq!(arena.available_vectors(), VECTOR_SLOTS);
        assert_eq!(arena.available_ranges(), RANGE_SLOTS);
    }

    #[test]
    fn test_polygon_containment_flags() {
        let arena = ScratchArena::new();
        let big = square(0.0, 0.0, 100.0);
        let small = square(30.0, 30.0, 10.0);
        let mut response = Response::new();
        assert!(test_polygon_polygon(&big, &small, Some(&mut response), &arena));
        assert!(response.b_in_a);
        assert!(!response.a_in_b);
    }

    #[test]
    fn test_polygon_circle_edge_contact() {
        let arena = ScratchArena::new();
        let polygon = square(0.0, 0.0, 40.0);
        let circle = Circle::new(50.0, 20.0, 15.0);
        let mut response = Response::new();
        assert!(test_polygon_circle(&polygon, &circle, Some(&mut response), &arena));
        assert_relative_eq!(response.overlap, 5.0);
        assert_relative_eq!(response.overlap_n.x, 1.0);
        assert_relative_eq!(response.overlap_n.y, 0.0);
    }

    #[test]
    fn test_polygon_circle_corner_contact() {
        let arena = ScratchArena::new();
        let polygon = square(0.0, 0.0, 40.0);
        let circle = Circle::new(50.0, -10.0, 15.0);
        let mut response = Response::new();
        assert!(test_polygon_circle(&polygon, &circle, Some(&mut response), &arena));
        let dist = (200.0_f32).sqrt();
        assert_relative_eq!(response.overlap, 15.0 - dist, epsilon = 1e-4);
        assert_relative_eq!(response.overlap_n.x, 10.0 / dist, epsilon = 1e-4);
        assert_relative_eq!(response.overlap_n.y, -10.0 / dist, epsilon = 1e-4);
    }

    #[test]
    fn test_polygon_circle_miss_restores_pools() {
        let arena = ScratchArena::new();
        let polygon = square(0.0, 0.0, 40.0);
        let circle = Circle::new(60.0, 20.0, 15.0);
        assert!(!test_polygon_circle(&polygon, &circle, Some(&mut Response::new()), &arena));
        assert_eq!(arena.available_vectors(), VECTOR_SLOTS);
        assert_eq!(arena.available_ranges(), RANGE_SLOTS);
    }

    #[test]
    fn test_circle_polygon_flips_response() {
        let arena = ScratchArena::new();
        let polygon = square(0.0, 0.0, 40.0);
        let circle = Circle::new(50.0, 20.0, 15.0);
        let mut flipped = Response::new();
        assert!(test_circle_polygon(&circle, &polygon, Some(&mut flipped), &arena));
        assert_relative_eq!(flipped.overlap, 5.0);
        assert_relative_eq!(flipped.overlap_n.x, -1.0);
        assert_relative_eq!(flipped.overlap_v.x, -5.0);
    }

    #[test]
    fn test_pools_balanced_after_hits() {
        let arena = ScratchArena::new();
        let a = square(0.0, 0.0, 40.0);
        let b = square(30.0, 0.0, 40.0);
        let circle = Circle::new(50.0, 20.0, 15.0);
        test_polygon_polygon(&a, &b, Some(&mut Response::new()), &arena);
        test_polygon_circle(&a, &circle, Some(&mut Response::new()), &arena);
        test_circle_circle(
            &Circle::new(0.0, 0.0, 5.0),
            &Circle::new(3.0, 0.0, 5.0),
            None,
            &arena,
        );
        assert_eq!(arena.available_vectors(), VECTOR_SLOTS);
        assert_eq!(arena.available_ranges(), RANGE_SLOTS);
    }
}
