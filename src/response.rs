//! Collision response record for the SAT tests.

use glam::Vec2;

/// Accumulated result of a shape-vs-shape SAT test.
///
/// `overlap` is the smallest penetration depth found across all tested
/// axes, `overlap_n` the unit axis it occurred on (pointing from the
/// first shape into the second), and `overlap_v` the translation that
/// moves the first shape out of collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    pub overlap: f32,
    pub overlap_n: Vec2,
    pub overlap_v: Vec2,
    pub a_in_b: bool,
    pub b_in_a: bool,
}

impl Response {
    pub fn new() -> Self {
        let mut response = Self {
            overlap: 0.0,
            overlap_n: Vec2::ZERO,
            overlap_v: Vec2::ZERO,
            a_in_b: true,
            b_in_a: true,
        };
        response.clear();
        response
    }

    /// Reset for reuse before a new test. Containment flags start `true`
    /// and are cleared by any axis that disproves them; `overlap` starts
    /// at infinity so the first tested axis always records.
    pub fn clear(&mut self) -> &mut Self {
        self.overlap = f32::INFINITY;
        self.overlap_n = Vec2::ZERO;
        self.overlap_v = Vec2::ZERO;
        self.a_in_b = true;
        self.b_in_a = true;
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_restores_accumulator_state() {
        let mut response = Response::new();
        response.overlap = 3.0;
        response.overlap_n = Vec2::X;
        response.a_in_b = false;
        response.clear();
        assert_eq!(response.overlap, f32::INFINITY);
        assert_eq!(response.overlap_n, Vec2::ZERO);
        assert!(response.a_in_b && response.b_in_a);
    }
}
