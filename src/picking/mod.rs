//! CPU ray-cast picking.
//!
//! Turns a world-space [`Ray`](crate::math::Ray) into the closest hit among
//! a set of candidate meshes. Each candidate is first pruned by its
//! world-space bounding sphere, then the ray is moved into the candidate's
//! local space and tested against every triangle.
//!
//! Picking has no side effects: the caller applies the resulting selection.

mod picker;

pub use picker::{pick, pick_with_stats, PickCandidate, PickHit, PickStats};
