//! Axis-aligned physics body.

use bitflags::bitflags;
use glam::Vec2;

use crate::geom::Rect;

bitflags! {
    /// Sides of a body, used both as a facing filter (`allow_collisions`)
    /// and as a contact report (`touching`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CollideFlags: u32 {
        const NONE = 0;
        const LEFT = 0x0001;
        const RIGHT = 0x0010;
        const UP = 0x0100;
        const DOWN = 0x1000;

        const CEILING = Self::UP.bits();
        const FLOOR = Self::DOWN.bits();
        const WALL = Self::LEFT.bits() | Self::RIGHT.bits();
        const ANY = Self::LEFT.bits() | Self::RIGHT.bits() | Self::UP.bits() | Self::DOWN.bits();
    }
}

/// A movable axis-aligned box with arcade-style dynamics.
///
/// Positions are top-left corners in screen space (y grows downward).
/// `last` is the position at the start of the frame; per-frame motion
/// deltas are derived from it, so [`Body::pre_update`] must run before
/// movement each step.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub last: Vec2,
    pub width: f32,
    pub height: f32,
    pub velocity: Vec2,
    pub mass: f32,
    /// Bounce retained after a separation, `0.0..=1.0`.
    pub elasticity: f32,
    /// Immovable bodies absorb the full correction of whatever hits them.
    pub immovable: bool,
    pub active: bool,
    /// Whether this body transports riders standing on it.
    pub moves: bool,
    /// Sides that accept collisions; others pass through.
    pub allow_collisions: CollideFlags,
    /// Sides in contact after the most recent separation pass.
    pub touching: CollideFlags,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            last: Vec2::new(x, y),
            width,
            height,
            velocity: Vec2::ZERO,
            mass: 1.0,
            elasticity: 0.0,
            immovable: false,
            active: true,
            moves: true,
            allow_collisions: CollideFlags::ANY,
            touching: CollideFlags::empty(),
        }
    }

    /// Latch the frame-start position. Call once per step, before any
    /// movement or separation.
    pub fn pre_update(&mut self) {
        self.last = self.pos;
        self.touching = CollideFlags::empty();
    }

    #[inline]
    pub fn delta_x(&self) -> f32 {
        self.pos.x - self.last.x
    }

    #[inline]
    pub fn delta_y(&self) -> f32 {
        self.pos.y - self.last.y
    }

    #[inline]
    pub fn delta_x_abs(&self) -> f32 {
        self.delta_x().abs()
    }

    #[inline]
    pub fn delta_y_abs(&self) -> f32 {
        self.delta_y().abs()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Current AABB.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Whether the current AABBs of two bodies intersect.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}
