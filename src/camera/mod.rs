//! Camera system for scene viewing and object rotation.
//!
//! Provides a look-at camera, an orbit controller with axis-locked rotation
//! and a top-view toggle, and a virtual trackball for rotating objects.

/// Orbit controller with axis locks, zoom and the top view.
pub mod controller;
/// Core camera struct and GPU uniform type.
pub mod core;
/// Virtual trackball mapping drags to rotations.
pub mod trackball;

pub use controller::{OrbitController, RotationAxis, ViewMode};
pub use core::{Camera, CameraUniform, Projection};
pub use trackball::{project_to_sphere, Trackball};
