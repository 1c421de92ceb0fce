//! Primitive intersection tests.
//!
//! Every function writes into a caller-supplied [`IntersectResult`] so hot
//! paths can reuse one record across many tests; passing `None` uses a stack
//! temporary instead. The returned `bool` mirrors the record's `result`
//! field.
//!
//! Several bound checks are deliberately asymmetric (noted per function);
//! game code has grown to depend on those outcomes, so they are preserved
//! rather than corrected.

use glam::Vec2;

use super::{distance_squared, Circle, InfiniteLine, Ray, Rect, Segment};

/// Mutable out-record for intersection tests.
///
/// `width`/`height` are only populated by [`rectangle_to_rectangle`], where
/// they hold the overlap rectangle's size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntersectResult {
    pub result: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl IntersectResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_to(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    /// The intersection point, when one was computed.
    #[inline]
    pub fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Resolve the optional out-record against a stack temporary.
macro_rules! resolve_output {
    ($output:ident, $local:ident) => {
        let mut $local = IntersectResult::default();
        let $output: &mut IntersectResult = match $output {
            Some(out) => {
                out.result = false;
                out
            }
            None => &mut $local,
        };
    };
}

/// Intersection point of the infinite line through `l` with the infinite
/// line through `(x1, y1)-(x2, y2)`, or `None` when they are parallel
/// (zero determinant).
fn line_line_point(l: &InfiniteLine, x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Vec2> {
    let (lx1, ly1) = (l.start.x, l.start.y);
    let (lx2, ly2) = (l.end.x, l.end.y);
    let denominator = (lx1 - lx2) * (y1 - y2) - (ly1 - ly2) * (x1 - x2);
    if denominator == 0.0 {
        return None;
    }
    let cross_l = lx1 * ly2 - ly1 * lx2;
    let cross_s = x1 * y2 - y1 * x2;
    Some(Vec2::new(
        (cross_l * (x1 - x2) - (lx1 - lx2) * cross_s) / denominator,
        (cross_l * (y1 - y2) - (ly1 - ly2) * cross_s) / denominator,
    ))
}

/// Intersection of two infinite lines. `false` only when parallel.
pub fn line_to_line(
    line1: &InfiniteLine,
    line2: &InfiniteLine,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    if let Some(point) = line_line_point(line1, line2.start.x, line2.start.y, line2.end.x, line2.end.y)
    {
        output.result = true;
        output.x = point.x;
        output.y = point.y;
    }
    output.result
}

fn raw_segment_into(
    line: &InfiniteLine,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    output: &mut IntersectResult,
) {
    output.result = false;
    if let Some(point) = line_line_point(line, x1, y1, x2, y2) {
        output.x = point.x;
        output.y = point.y;
        // Accepts when either coordinate is within the segment's range,
        // not both. Inherited behavior, kept as-is.
        let x_in = point.x <= x1.max(x2) && point.x >= x1.min(x2);
        let y_in = point.y <= y1.max(y2) && point.y >= y1.min(y2);
        if x_in || y_in {
            output.result = true;
        }
    }
}

/// Intersection of an infinite line with a bounded segment.
pub fn line_to_line_segment(
    line: &InfiniteLine,
    seg: &Segment,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    raw_segment_into(line, seg.start.x, seg.start.y, seg.end.x, seg.end.y, output);
    output.result
}

/// [`line_to_line_segment`] over raw segment coordinates.
pub fn line_to_raw_segment(
    line: &InfiniteLine,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    raw_segment_into(line, x1, y1, x2, y2, output);
    output.result
}

fn ray_into(line: &InfiniteLine, ray: &Ray, output: &mut IntersectResult) {
    output.result = false;
    if let Some(point) = line_line_point(line, ray.origin.x, ray.origin.y, ray.through.x, ray.through.y)
    {
        output.x = point.x;
        output.y = point.y;
        // Each axis is only bounds-checked when the ray does not grow
        // toward increasing coordinates on that axis.
        output.result = true;
        if !(ray.origin.x >= ray.through.x) && point.x < ray.origin.x {
            output.result = false;
        }
        if !(ray.origin.y >= ray.through.y) && point.y < ray.origin.y {
            output.result = false;
        }
    }
}

/// Intersection of an infinite line with a ray.
pub fn line_to_ray(line: &InfiniteLine, ray: &Ray, output: Option<&mut IntersectResult>) -> bool {
    resolve_output!(output, local);
    ray_into(line, ray, output);
    output.result
}

/// Whether an infinite line passes within `circle.radius` of its center.
pub fn line_to_circle(
    line: &InfiniteLine,
    circle: &Circle,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    let (_, dist) = line.perp_foot(circle.pos);
    if dist <= circle.radius {
        output.result = true;
    }
    output.result
}

/// Test the line against the rectangle's four edges, stopping at the first
/// hit. Edge order: top, left, bottom, right.
pub fn line_to_rectangle(
    line: &InfiniteLine,
    rect: &Rect,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    raw_segment_into(line, rect.x, rect.y, rect.right(), rect.y, output);
    if output.result {
        return true;
    }
    raw_segment_into(line, rect.x, rect.y, rect.x, rect.bottom(), output);
    if output.result {
        return true;
    }
    raw_segment_into(line, rect.x, rect.bottom(), rect.right(), rect.bottom(), output);
    if output.result {
        return true;
    }
    raw_segment_into(line, rect.right(), rect.y, rect.right(), rect.bottom(), output);
    output.result
}

/// Intersection of two bounded segments.
///
/// Delegates to the line-vs-segment test, then additionally requires the
/// point to lie within the first segment's bounding box. Only the first;
/// the second segment keeps the either-coordinate acceptance.
pub fn line_segment_to_line_segment(
    line1: &Segment,
    line2: &Segment,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    raw_segment_into(
        &InfiniteLine::from(*line1),
        line2.start.x,
        line2.start.y,
        line2.end.x,
        line2.end.y,
        output,
    );
    if output.result && !line1.bounds_contain(output.x, output.y) {
        output.result = false;
    }
    output.result
}

/// Intersection of a bounded segment with a ray. As with
/// [`line_segment_to_line_segment`], only the segment's bounds are
/// re-checked.
pub fn line_segment_to_ray(
    line: &Segment,
    ray: &Ray,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    ray_into(&InfiniteLine::from(*line), ray, output);
    if output.result && !line.bounds_contain(output.x, output.y) {
        output.result = false;
    }
    output.result
}

/// Intersection of a bounded segment with a circle.
///
/// Uses the perpendicular foot when it lands on the segment; otherwise
/// falls back to testing the endpoints against the circle.
pub fn line_segment_to_circle(
    seg: &Segment,
    circle: &Circle,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    let (foot, dist) = InfiniteLine::from(*seg).perp_foot(circle.pos);
    if dist <= circle.radius {
        if seg.bounds_contain(foot.x, foot.y) {
            output.result = true;
        } else if circle_contains_point(circle, seg.start, None)
            || circle_contains_point(circle, seg.end, None)
        {
            output.result = true;
        }
    }
    output.result
}

/// Intersection of a bounded segment with a rectangle.
///
/// A segment fully inside the rectangle hits without an edge test. The
/// edge tests run against the full line through the segment's endpoints;
/// the segment's own bounds are not reapplied.
pub fn line_segment_to_rectangle(
    seg: &Segment,
    rect: &Rect,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    if rect.contains(seg.start.x, seg.start.y) && rect.contains(seg.end.x, seg.end.y) {
        output.result = true;
        return true;
    }
    line_to_rectangle(&InfiniteLine::from(*seg), rect, Some(output))
}

/// Intersection of a ray with a rectangle.
///
/// Finds the first edge hit in test order, which is not necessarily the
/// hit closest to the ray origin.
pub fn ray_to_rectangle(ray: &Ray, rect: &Rect, output: Option<&mut IntersectResult>) -> bool {
    resolve_output!(output, local);
    line_to_rectangle(&InfiniteLine::from(*ray), rect, Some(output))
}

/// Parametric ray-vs-segment solve over raw coordinates.
///
/// Accepts when the ray parameter `r >= 0` and the segment parameter
/// `s` lies in `[0, 1]`.
#[allow(clippy::too_many_arguments)]
pub fn ray_to_line_segment(
    ray_x1: f32,
    ray_y1: f32,
    ray_x2: f32,
    ray_y2: f32,
    line_x1: f32,
    line_y1: f32,
    line_x2: f32,
    line_y2: f32,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    let d = (ray_x2 - ray_x1) * (line_y2 - line_y1) - (ray_y2 - ray_y1) * (line_x2 - line_x1);
    if d != 0.0 {
        let r = ((ray_y1 - line_y1) * (line_x2 - line_x1) - (ray_x1 - line_x1) * (line_y2 - line_y1))
            / d;
        let s =
            ((ray_y1 - line_y1) * (ray_x2 - ray_x1) - (ray_x1 - line_x1) * (ray_y2 - ray_y1)) / d;
        if r >= 0.0 && (0.0..=1.0).contains(&s) {
            output.result = true;
            output.x = ray_x1 + r * (ray_x2 - ray_x1);
            output.y = ray_y1 + r * (ray_y2 - ray_y1);
        }
    }
    output.result
}

/// Point-in-rectangle test; the record's `(x, y)` echoes the point.
pub fn point_to_rectangle(point: Vec2, rect: &Rect, output: Option<&mut IntersectResult>) -> bool {
    resolve_output!(output, local);
    output.set_to(point.x, point.y, 0.0, 0.0);
    output.result = rect.contains_point(point);
    output.result
}

/// Rectangle-vs-rectangle test computing the overlap rectangle.
///
/// Reports `true` only when the overlap rectangle's center lies strictly
/// inside `rect1`, a containment-biased definition that is stricter than
/// plain geometric overlap.
pub fn rectangle_to_rectangle(
    rect1: &Rect,
    rect2: &Rect,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    let left = rect1.x.max(rect2.x);
    let right = rect1.right().min(rect2.right());
    let top = rect1.y.max(rect2.y);
    let bottom = rect1.bottom().min(rect2.bottom());
    output.set_to(left, top, right - left, bottom - top);

    let cx = output.x + output.width * 0.5;
    let cy = output.y + output.height * 0.5;
    if (cx > rect1.x && cx < rect1.right()) && (cy > rect1.y && cy < rect1.bottom()) {
        output.result = true;
    }
    output.result
}

/// Rectangle-vs-circle test. See [`circle_to_rectangle`].
pub fn rectangle_to_circle(
    rect: &Rect,
    circle: &Circle,
    output: Option<&mut IntersectResult>,
) -> bool {
    circle_to_rectangle(circle, rect, output)
}

/// Circle-vs-rectangle test via the rectangle inflated by the radius.
/// Slightly over-accepts at the corners; fine for arcade use.
pub fn circle_to_rectangle(
    circle: &Circle,
    rect: &Rect,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    output.result = rect
        .inflated(circle.radius, circle.radius)
        .contains(circle.pos.x, circle.pos.y);
    output.result
}

/// Circle-vs-circle test on squared distance.
pub fn circle_to_circle(
    circle1: &Circle,
    circle2: &Circle,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    let total = circle1.radius + circle2.radius;
    output.result = total * total
        >= distance_squared(circle1.pos.x, circle1.pos.y, circle2.pos.x, circle2.pos.y);
    output.result
}

/// Point-in-circle test on squared distance.
pub fn circle_contains_point(
    circle: &Circle,
    point: Vec2,
    output: Option<&mut IntersectResult>,
) -> bool {
    resolve_output!(output, local);
    output.result = circle.radius * circle.radius
        >= distance_squared(circle.pos.x, circle.pos.y, point.x, point.y);
    output.result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_crossing_diagonals_meet_in_the_middle() {
        let line = InfiniteLine::new(0.0, 0.0, 10.0, 10.0);
        let seg = Segment::new(0.0, 10.0, 10.0, 0.0);
        let mut out = IntersectResult::new();
        assert!(line_to_line_segment(&line, &seg, Some(&mut out)));
        assert_relative_eq!(out.x, 5.0);
        assert_relative_eq!(out.y, 5.0);

        // Both bounded: same point.
        let seg1 = Segment::new(0.0, 0.0, 10.0, 10.0);
        assert!(line_segment_to_line_segment(&seg1, &seg, Some(&mut out)));
        assert_relative_eq!(out.x, 5.0);
        assert_relative_eq!(out.y, 5.0);
    }

    #[test]
    fn test_parallel_lines_never_intersect() {
        let a = InfiniteLine::new(0.0, 0.0, 10.0, 0.0);
        let b = InfiniteLine::new(0.0, 5.0, 10.0, 5.0);
        let mut out = IntersectResult::new();
        out.result = true; // stale value must be cleared
        assert!(!line_to_line(&a, &b, Some(&mut out)));
        assert!(!out.result);
    }

    #[test]
    fn test_segment_bound_is_either_axis() {
        // The intersection (20, 0) has x outside the segment's range but
        // y inside it; the either-coordinate acceptance keeps the hit.
        let line = InfiniteLine::new(20.0, -10.0, 20.0, 10.0);
        let seg = Segment::new(0.0, 0.0, 10.0, 0.0);
        assert!(line_to_line_segment(&line, &seg, None));
        // The fully bounded test rejects it via the first segment's box.
        let seg1 = Segment::new(20.0, -10.0, 20.0, 10.0);
        assert!(line_segment_to_line_segment(&seg1, &seg, None));
        let narrow = Segment::new(0.0, 0.0, 10.0, 0.0);
        assert!(!line_segment_to_line_segment(&narrow, &Segment::new(20.0, -10.0, 20.0, 10.0), None));
    }

    #[test]
    fn test_ray_rejects_hits_behind_origin() {
        // Ray growing toward +x: hits behind the origin are discarded.
        let ray = Ray::new(0.0, 0.0, 5.0, 0.0);
        let behind = InfiniteLine::new(-3.0, -5.0, -3.0, 5.0);
        let ahead = InfiniteLine::new(8.0, -5.0, 8.0, 5.0);
        assert!(!line_to_ray(&behind, &ray, None));
        let mut out = IntersectResult::new();
        assert!(line_to_ray(&ahead, &ray, Some(&mut out)));
        assert_relative_eq!(out.x, 8.0);
    }

    #[test]
    fn test_line_to_circle_distance_threshold() {
        let line = InfiniteLine::new(0.0, 0.0, 10.0, 0.0);
        assert!(line_to_circle(&line, &Circle::new(5.0, 3.0, 3.0), None));
        assert!(!line_to_circle(&line, &Circle::new(5.0, 3.5, 3.0), None));
    }

    #[test]
    fn test_line_to_rectangle_reports_first_edge_hit() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Vertical line through the middle: first tested edge is the top.
        let line = InfiniteLine::new(5.0, -5.0, 5.0, 15.0);
        let mut out = IntersectResult::new();
        assert!(line_to_rectangle(&line, &rect, Some(&mut out)));
        assert_relative_eq!(out.x, 5.0);
        assert_relative_eq!(out.y, 0.0);
    }

    #[test]
    fn test_segment_to_circle_endpoint_fallback() {
        // The perpendicular foot lies outside the segment, but an endpoint
        // is inside the circle.
        let seg = Segment::new(4.0, 1.0, 10.0, 1.0);
        let circle = Circle::new(3.0, 0.0, 2.0);
        assert!(line_segment_to_circle(&seg, &circle, None));
        // Foot outside and both endpoints clear of the circle.
        let far = Segment::new(6.0, 1.0, 10.0, 1.0);
        assert!(!line_segment_to_circle(&far, &circle, None));
    }

    #[test]
    fn test_segment_inside_rectangle_short_circuits() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let seg = Segment::new(2.0, 2.0, 8.0, 8.0);
        assert!(line_segment_to_rectangle(&seg, &rect, None));
        let outside = Segment::new(20.0, 20.0, 30.0, 20.0);
        assert!(!line_segment_to_rectangle(&outside, &rect, None));
        // Edge tests run against the full line through the segment, so a
        // far-away segment still hits when its line crosses the rectangle.
        let collinear = Segment::new(20.0, 20.0, 30.0, 30.0);
        assert!(line_segment_to_rectangle(&collinear, &rect, None));
    }

    #[test]
    fn test_ray_to_line_segment_parametric() {
        let mut out = IntersectResult::new();
        assert!(ray_to_line_segment(
            0.0, 0.0, 1.0, 1.0, 0.0, 10.0, 10.0, 0.0,
            Some(&mut out)
        ));
        assert_relative_eq!(out.x, 5.0);
        assert_relative_eq!(out.y, 5.0);
        // Pointing away: r < 0.
        assert!(!ray_to_line_segment(
            0.0, 0.0, -1.0, -1.0, 0.0, 10.0, 10.0, 0.0,
            None
        ));
        // Beyond the segment: s outside [0, 1].
        assert!(!ray_to_line_segment(
            0.0, 0.0, 1.0, 1.0, 20.0, 10.0, 30.0, 0.0,
            None
        ));
    }

    #[test]
    fn test_rectangle_overlap_dimensions() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let mut out = IntersectResult::new();
        assert!(rectangle_to_rectangle(&a, &b, Some(&mut out)));
        assert_relative_eq!(out.x, 5.0);
        assert_relative_eq!(out.y, 5.0);
        assert_relative_eq!(out.width, 5.0);
        assert_relative_eq!(out.height, 5.0);
    }

    #[test]
    fn test_rectangle_overlap_center_bias() {
        // Edge-touching rectangles: overlap center sits on rect1's border,
        // which the strict containment check rejects.
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rectangle_to_rectangle(&a, &b, None));
    }

    #[test]
    fn test_circle_to_circle_symmetry() {
        let a = Circle::new(0.0, 0.0, 3.0);
        let b = Circle::new(5.0, 0.0, 2.5);
        assert_eq!(
            circle_to_circle(&a, &b, None),
            circle_to_circle(&b, &a, None)
        );
        assert!(circle_to_circle(&a, &b, None));
        let c = Circle::new(6.0, 0.0, 2.5);
        assert_eq!(
            circle_to_circle(&a, &c, None),
            circle_to_circle(&c, &a, None)
        );
        assert!(!circle_to_circle(&a, &c, None));
    }

    #[test]
    fn test_circle_contains_point_boundary() {
        let circle = Circle::new(0.0, 0.0, 5.0);
        assert!(circle_contains_point(&circle, Vec2::new(5.0, 0.0), None));
        assert!(!circle_contains_point(&circle, Vec2::new(5.1, 0.0), None));
    }

    #[test]
    fn test_point_to_rectangle_echoes_point() {
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0);
        let mut out = IntersectResult::new();
        assert!(point_to_rectangle(Vec2::new(1.0, 2.0), &rect, Some(&mut out)));
        assert_relative_eq!(out.x, 1.0);
        assert_relative_eq!(out.y, 2.0);
        assert!(!point_to_rectangle(Vec2::new(5.0, 2.0), &rect, None));
    }

    #[test]
    fn test_circle_to_rectangle_inflation() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(circle_to_rectangle(&Circle::new(-2.0, 5.0, 3.0), &rect, None));
        assert!(!circle_to_rectangle(&Circle::new(-4.0, 5.0, 3.0), &rect, None));
        assert!(rectangle_to_circle(&rect, &Circle::new(-2.0, 5.0, 3.0), None));
    }
}
