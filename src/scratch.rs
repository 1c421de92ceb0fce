//! Pooled scratch storage for the SAT narrow phase.
//!
//! Projection tests need a handful of short-lived vectors and min/max
//! ranges per call. Rather than allocate, each physics context owns a
//! small [`ScratchArena`] and hands out slots through RAII guards, so a
//! slot returns to the pool on every exit path.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use glam::Vec2;

/// Vector slots per arena. Sized for the deepest call chain in the
/// narrow phase (polygon-vs-circle), with headroom.
pub const VECTOR_SLOTS: usize = 10;

/// Range slots per arena. Axis projection borrows at most two at a time.
pub const RANGE_SLOTS: usize = 5;

/// Fixed-capacity pools of reusable vectors and projection ranges.
///
/// Single-threaded by construction (`RefCell`); one arena per physics
/// context.
#[derive(Debug)]
pub struct ScratchArena {
    vectors: RefCell<Vec<Vec2>>,
    ranges: RefCell<Vec<[f32; 2]>>,
}

impl ScratchArena {
    pub fn new() -> Self {
        Self {
            vectors: RefCell::new(vec![Vec2::ZERO; VECTOR_SLOTS]),
            ranges: RefCell::new(vec![[0.0; 2]; RANGE_SLOTS]),
        }
    }

    /// Borrow a vector slot, zeroed.
    ///
    /// Panics when the pool is exhausted; that means a guard is being
    /// held across more nested borrows than the pool is sized for, which
    /// is a programming error rather than a runtime condition.
    pub fn vector(&self) -> VectorGuard<'_> {
        self.vectors
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| panic!("scratch vector pool exhausted ({VECTOR_SLOTS} slots)"));
        VectorGuard {
            arena: self,
            value: Vec2::ZERO,
        }
    }

    /// Borrow a range slot, zeroed.
    pub fn range(&self) -> RangeGuard<'_> {
        self.ranges
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| panic!("scratch range pool exhausted ({RANGE_SLOTS} slots)"));
        RangeGuard {
            arena: self,
            value: [0.0; 2],
        }
    }

    /// Vector slots currently free.
    pub fn available_vectors(&self) -> usize {
        self.vectors.borrow().len()
    }

    /// Range slots currently free.
    pub fn available_ranges(&self) -> usize {
        self.ranges.borrow().len()
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive handle to a pooled vector; returns its slot on drop.
pub struct VectorGuard<'a> {
    arena: &'a ScratchArena,
    value: Vec2,
}

impl Deref for VectorGuard<'_> {
    type Target = Vec2;

    fn deref(&self) -> &Vec2 {
        &self.value
    }
}

impl DerefMut for VectorGuard<'_> {
    fn deref_mut(&mut self) -> &mut Vec2 {
        &mut self.value
    }
}

impl Drop for VectorGuard<'_> {
    fn drop(&mut self) {
        self.arena.vectors.borrow_mut().push(self.value);
    }
}

/// Exclusive handle to a pooled projection range; returns its slot on drop.
pub struct RangeGuard<'a> {
    arena: &'a ScratchArena,
    value: [f32; 2],
}

impl Deref for RangeGuard<'_> {
    type Target = [f32; 2];

    fn deref(&self) -> &[f32; 2] {
        &self.value
    }
}

impl DerefMut for RangeGuard<'_> {
    fn deref_mut(&mut self) -> &mut [f32; 2] {
        &mut self.value
    }
}

impl Drop for RangeGuard<'_> {
    fn drop(&mut self) {
        self.arena.ranges.borrow_mut().push(self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_return_slots_on_drop() {
        let arena = ScratchArena::new();
        {
            let _a = arena.vector();
            let _b = arena.vector();
            let _r = arena.range();
            assert_eq!(arena.available_vectors(), VECTOR_SLOTS - 2);
            assert_eq!(arena.available_ranges(), RANGE_SLOTS - 1);
        }
        assert_eq!(arena.available_vectors(), VECTOR_SLOTS);
        assert_eq!(arena.available_ranges(), RANGE_SLOTS);
    }

    #[test]
    fn test_slots_restore_on_early_return() {
        let arena = ScratchArena::new();
        fn bails_out(arena: &ScratchArena) -> bool {
            let mut v = arena.vector();
            *v = Vec2::new(1.0, 2.0);
            if v.x > 0.0 {
                return false;
            }
            true
        }
        bails_out(&arena);
        assert_eq!(arena.available_vectors(), VECTOR_SLOTS);
    }

    #[test]
    fn test_guard_is_writable() {
        let arena = ScratchArena::new();
        let mut v = arena.vector();
        assert_eq!(*v, Vec2::ZERO);
        *v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    #[should_panic(expected = "scratch vector pool exhausted")]
    fn test_exhaustion_panics() {
        let arena = ScratchArena::new();
        let mut held = Vec::new();
        for _ in 0..=VECTOR_SLOTS {
            held.push(arena.vector());
        }
    }
}
