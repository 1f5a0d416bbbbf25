//! Ray construction and the intersection primitives used by picking and
//! path-point placement.
//!
//! Everything here is a pure function of its inputs. Degenerate cases
//! (singular matrices, parallel rays, zero-length vectors) are reported as
//! `None` rather than errors.

mod bounds;
mod plane;
mod ray;
mod triangle;

pub use bounds::BoundingSphere;
pub use plane::Plane;
pub use ray::{ndc_from_pixel, Ray};
pub use triangle::{Triangle, MIN_HIT_DISTANCE, PARALLEL_EPSILON};
