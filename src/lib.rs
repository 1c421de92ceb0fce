//! Collide2d
//!
//! 2D collision detection and arcade-style physics separation.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geom** - Shape primitives and pairwise intersection tests
//! 2. **scratch** - Pooled temporaries for the allocation-free hot path
//! 3. **response** - Minimum-translation-vector accumulator
//! 4. **narrowphase** - SAT tests for circles and convex polygons
//! 5. **body** - Axis-aligned bodies with arcade dynamics
//! 6. **separation** - Positional correction and velocity response
//! 7. **overlap** - Collision pass over a host-supplied broad phase
//!
//! Bodies are caller-owned and mutated in place; the crate holds no world
//! state of its own beyond the scratch pools.

pub mod body;
pub mod geom;
pub mod narrowphase;
pub mod overlap;
pub mod response;
pub mod scratch;
pub mod separation;

// Re-export commonly used types
pub use body::{Body, CollideFlags};
pub use geom::{Circle, GeomError, InfiniteLine, IntersectResult, Polygon, Ray, Rect, Segment};
pub use narrowphase::{
    test_circle_circle, test_circle_polygon, test_polygon_circle, test_polygon_polygon,
};
pub use overlap::{overlap, BroadPhase};
pub use response::Response;
pub use scratch::ScratchArena;
pub use separation::{
    separate, separate_tile, separate_x, separate_y, tile_overlap, Tile, OVERLAP_BIAS,
};

// Re-export the math crate so hosts can name Vec2 without a version pin.
pub use glam;
