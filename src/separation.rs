//! Positional separation and velocity response for overlapping bodies.
//!
//! Each axis is resolved independently and sequentially (X then Y). That is
//! an approximation rather than a simultaneous 2D solve, chosen for
//! predictable arcade behavior.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::body::{Body, CollideFlags};
use crate::geom::Rect;

/// Penetration tolerated beyond the frame's own motion before a contact is
/// rejected as tunnelling. Keeps resting contacts from jittering.
pub const OVERLAP_BIAS: f32 = 4.0;

static TILE_OVERLAP: AtomicBool = AtomicBool::new(false);

/// Whether the most recent [`separate_tile`] call found any overlap.
/// Process-wide, reset at the start of each call.
pub fn tile_overlap() -> bool {
    TILE_OVERLAP.load(Ordering::Relaxed)
}

/// A static tile cell. Always immovable; `mass` is carried for symmetry
/// with [`Body`] but never enters the velocity response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    /// Faces of the tile that accept collisions.
    pub collide: CollideFlags,
}

impl Tile {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            mass: 1.0,
            collide: CollideFlags::ANY,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Hull swept over this step's X motion. Y uses the frame-start position
/// because the Y axis has not been resolved yet.
fn x_hull(body: &Body, delta: f32) -> Rect {
    Rect::new(
        body.pos.x - delta.max(0.0),
        body.last.y,
        body.width + delta.abs(),
        body.height,
    )
}

/// Hull swept over this step's Y motion, at the current X.
fn y_hull(body: &Body, delta: f32) -> Rect {
    Rect::new(
        body.pos.x,
        body.pos.y - delta.max(0.0),
        body.width,
        body.height + delta.abs(),
    )
}

/// New velocity magnitude for a body absorbing the other body's momentum,
/// signed by the other's direction of travel.
#[inline]
fn exchange_velocity(other_v: f32, other_mass: f32, own_mass: f32) -> f32 {
    let magnitude = ((other_v * other_v * other_mass) / own_mass).sqrt();
    if other_v > 0.0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Resolve both axes between two bodies. Returns `true` if either axis
/// produced a correction. Both axes always run; X does not mask Y.
pub fn separate(body1: &mut Body, body2: &mut Body) -> bool {
    let separated_x = separate_x(body1, body2);
    let separated_y = separate_y(body1, body2);
    separated_x || separated_y
}

/// Resolve the X axis between two bodies.
pub fn separate_x(body1: &mut Body, body2: &mut Body) -> bool {
    if body1.immovable && body2.immovable {
        return false;
    }

    let mut overlap = 0.0;
    let delta1 = body1.delta_x();
    let delta2 = body2.delta_x();

    // Gate on the swept hulls, not the current AABBs: a diagonal corner
    // hit must not register on this axis when the approach was vertical.
    if delta1 != delta2 && x_hull(body1, delta1).intersects(&x_hull(body2, delta2)) {
        let max_overlap = body1.delta_x_abs() + body2.delta_x_abs() + OVERLAP_BIAS;
        if delta1 > delta2 {
            // body1 moving right relative to body2.
            overlap = body1.right() - body2.pos.x;
            if overlap > max_overlap
                || !body1.allow_collisions.contains(CollideFlags::RIGHT)
                || !body2.allow_collisions.contains(CollideFlags::LEFT)
            {
                overlap = 0.0;
            } else {
                body1.touching |= CollideFlags::RIGHT;
                body2.touching |= CollideFlags::LEFT;
            }
        } else {
            overlap = body1.pos.x - body2.width - body2.pos.x;
            if -overlap > max_overlap
                || !body1.allow_collisions.contains(CollideFlags::LEFT)
                || !body2.allow_collisions.contains(CollideFlags::RIGHT)
            {
                overlap = 0.0;
            } else {
                body1.touching |= CollideFlags::LEFT;
                body2.touching |= CollideFlags::RIGHT;
            }
        }
    }

    if overlap == 0.0 {
        return false;
    }

    let v1 = body1.velocity.x;
    let v2 = body2.velocity.x;
    if !body1.immovable && !body2.immovable {
        let half = overlap * 0.5;
        body1.pos.x -= half;
        body2.pos.x += half;
        let mut new_v1 = exchange_velocity(v2, body2.mass, body1.mass);
        let mut new_v2 = exchange_velocity(v1, body1.mass, body2.mass);
        let average = (new_v1 + new_v2) * 0.5;
        new_v1 -= average;
        new_v2 -= average;
        body1.velocity.x = average + new_v1 * body1.elasticity;
        body2.velocity.x = average + new_v2 * body2.elasticity;
    } else if !body1.immovable {
        body1.pos.x -= overlap;
        body1.velocity.x = v2 - v1 * body1.elasticity;
    } else if !body2.immovable {
        body2.pos.x += overlap;
        body2.velocity.x = v1 - v2 * body2.elasticity;
    }
    true
}

/// Resolve the Y axis between two bodies. When one body is the immovable
/// one being stood upon, the rider is additionally carried sideways by the
/// platform's X motion.
pub fn separate_y(body1: &mut Body, body2: &mut Body) -> bool {
    if body1.immovable && body2.immovable {
        return false;
    }

    let mut overlap = 0.0;
    let delta1 = body1.delta_y();
    let delta2 = body2.delta_y();

    if delta1 != delta2 && y_hull(body1, delta1).intersects(&y_hull(body2, delta2)) {
        let max_overlap = body1.delta_y_abs() + body2.delta_y_abs() + OVERLAP_BIAS;
        if delta1 > delta2 {
            // body1 moving down relative to body2.
            overlap = body1.bottom() - body2.pos.y;
            if overlap > max_overlap
                || !body1.allow_collisions.contains(CollideFlags::DOWN)
                || !body2.allow_collisions.contains(CollideFlags::UP)
            {
                overlap = 0.0;
            } else {
                body1.touching |= CollideFlags::DOWN;
                body2.touching |= CollideFlags::UP;
            }
        } else {
            overlap = body1.pos.y - body2.height - body2.pos.y;
            if -overlap > max_overlap
                || !body1.allow_collisions.contains(CollideFlags::UP)
                || !body2.allow_collisions.contains(CollideFlags::DOWN)
            {
                overlap = 0.0;
            } else {
                body1.touching |= CollideFlags::UP;
                body2.touching |= CollideFlags::DOWN;
            }
        }
    }

    if overlap == 0.0 {
        return false;
    }

    let v1 = body1.velocity.y;
    let v2 = body2.velocity.y;
    if !body1.immovable && !body2.immovable {
        let half = overlap * 0.5;
        body1.pos.y -= half;
        body2.pos.y += half;
        let mut new_v1 = exchange_velocity(v2, body2.mass, body1.mass);
        let mut new_v2 = exchange_velocity(v1, body1.mass, body2.mass);
        let average = (new_v1 + new_v2) * 0.5;
        new_v1 -= average;
        new_v2 -= average;
        body1.velocity.y = average + new_v1 * body1.elasticity;
        body2.velocity.y = average + new_v2 * body2.elasticity;
    } else if !body1.immovable {
        body1.pos.y -= overlap;
        body1.velocity.y = v2 - v1 * body1.elasticity;
        if delta1 > delta2 {
            carry_rider(body1, body2);
        }
    } else if !body2.immovable {
        body2.pos.y += overlap;
        body2.velocity.y = v1 - v2 * body2.elasticity;
        if delta1 < delta2 {
            carry_rider(body2, body1);
        }
    }
    true
}

/// Translate a body standing on a moving platform by the platform's X
/// displacement this step.
fn carry_rider(rider: &mut Body, platform: &Body) {
    if platform.active && platform.moves {
        rider.pos.x += platform.pos.x - platform.last.x;
    }
}

/// Resolve a body against a static tile cell.
///
/// `do_separate_x`/`do_separate_y` suppress the position and velocity
/// mutation on that axis while still computing overlap and touching flags,
/// so callers can probe tiles without moving the body. The process-wide
/// tile-overlap flag is reset on entry and latched by either axis.
pub fn separate_tile(body: &mut Body, tile: &Tile, do_separate_x: bool, do_separate_y: bool) -> bool {
    TILE_OVERLAP.store(false, Ordering::Relaxed);
    let hit_x = separate_tile_x(body, tile, do_separate_x);
    let hit_y = separate_tile_y(body, tile, do_separate_y);
    hit_x || hit_y
}

fn separate_tile_x(body: &mut Body, tile: &Tile, separate: bool) -> bool {
    if body.immovable {
        return false;
    }

    let mut overlap = 0.0;
    let delta = body.delta_x();

    if delta != 0.0 && x_hull(body, delta).intersects(&tile.bounds()) {
        let max_overlap = body.delta_x_abs() + OVERLAP_BIAS;
        if delta > 0.0 {
            overlap = body.right() - tile.x;
            if overlap > max_overlap || !tile.collide.contains(CollideFlags::LEFT) {
                overlap = 0.0;
            } else {
                body.touching |= CollideFlags::RIGHT;
            }
        } else {
            overlap = body.pos.x - tile.width - tile.x;
            if -overlap > max_overlap || !tile.collide.contains(CollideFlags::RIGHT) {
                overlap = 0.0;
            } else {
                body.touching |= CollideFlags::LEFT;
            }
        }
    }

    if overlap == 0.0 {
        return false;
    }
    if separate {
        body.pos.x -= overlap;
        body.velocity.x = -(body.velocity.x * body.elasticity);
    }
    TILE_OVERLAP.store(true, Ordering::Relaxed);
    true
}

fn separate_tile_y(body: &mut Body, tile: &Tile, separate: bool) -> bool {
    if body.immovable {
        return false;
    }

    let mut overlap = 0.0;
    let delta = body.delta_y();

    if delta != 0.0 && y_hull(body, delta).intersects(&tile.bounds()) {
        let max_overlap = body.delta_y_abs() + OVERLAP_BIAS;
        if delta > 0.0 {
            overlap = body.bottom() - tile.y;
            if overlap > max_overlap || !tile.collide.contains(CollideFlags::UP) {
                overlap = 0.0;
            } else {
                body.touching |= CollideFlags::DOWN;
            }
        } else {
            overlap = body.pos.y - tile.height - tile.y;
            if -overlap > max_overlap || !tile.collide.contains(CollideFlags::DOWN) {
                overlap = 0.0;
            } else {
                body.touching |= CollideFlags::UP;
            }
        }
    }

    if overlap == 0.0 {
        return false;
    }
    if separate {
        body.pos.y -= overlap;
        body.velocity.y = -(body.velocity.y * body.elasticity);
    }
    TILE_OVERLAP.store(true, Ordering::Relaxed);
    true
}
