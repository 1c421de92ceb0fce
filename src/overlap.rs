//! Overlap orchestrator over an externally-owned broad-phase index.
//!
//! The crate does not build a spatial index of its own; the host supplies
//! one (typically a quadtree over the world bounds) through [`BroadPhase`],
//! and [`overlap`] drives a full pass through it: load the roots, walk the
//! candidate pairs through the separation resolver, release the index.

use tracing::trace;

use crate::body::Body;
use crate::separation::separate;

/// Host-side broad-phase spatial index, rebuilt each pass.
///
/// `Root` identifies a group of bodies registered with the index (a scene
/// node, a group handle, a layer id). `execute` must invoke `visit` on
/// every candidate pair and report whether any invocation returned `true`.
pub trait BroadPhase {
    type Root: Copy + PartialEq;

    /// Register the roots for this pass. A `None` second root means the
    /// first root is tested against itself, member-pairwise.
    fn load(&mut self, first: Self::Root, second: Option<Self::Root>);

    /// Walk candidate pairs. Returns `true` if any pair was accepted.
    fn execute(&mut self, visit: &mut dyn FnMut(&mut Body, &mut Body) -> bool) -> bool;

    /// Release per-pass resources.
    fn destroy(&mut self);
}

/// Run one collision pass.
///
/// `first` defaults to `world_root` when omitted, and a `second` equal to
/// `first` collapses to self-testing. Each candidate pair goes through
/// [`separate`]; pairs that produced a correction are then gated on
/// `process` (when given) before `notify` fires. Returns `true` if at
/// least one pair was separated and accepted.
pub fn overlap<I: BroadPhase>(
    index: &mut I,
    world_root: I::Root,
    first: Option<I::Root>,
    second: Option<I::Root>,
    mut notify: Option<&mut dyn FnMut(&mut Body, &mut Body)>,
    mut process: Option<&mut dyn FnMut(&mut Body, &mut Body) -> bool>,
) -> bool {
    let first = first.unwrap_or(world_root);
    let second = second.filter(|second| *second != first);
    index.load(first, second);

    let mut visit = |a: &mut Body, b: &mut Body| -> bool {
        if !separate(a, b) {
            return false;
        }
        if let Some(process) = process.as_deref_mut() {
            if !process(a, b) {
                return false;
            }
        }
        if let Some(notify) = notify.as_deref_mut() {
            notify(a, b);
        }
        true
    };
    let any_overlap = index.execute(&mut visit);
    trace!(any_overlap, "collision pass complete");
    index.destroy();
    any_overlap
}
