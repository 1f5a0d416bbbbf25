//! Animation system for entity motion along placed paths.

/// Quadratic path fitting and per-frame motion.
pub mod path;

pub use path::{
    clamp_speed, MotionStep, PathCoefficients, PathMotion, MIN_SPEED,
};
