//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a pointer
//! gesture or a programmatic call, is an [`OrreryCommand`]. Consumers pass
//! commands to [`Engine::submit`](super::Engine::submit); they take effect
//! on the next [`Engine::advance`](super::Engine::advance).

use glam::Vec2;

use crate::camera::RotationAxis;

/// What a left-drag or left-click does to the selected entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Drag rotates the selection with the trackball.
    #[default]
    Rotate,
    /// Vertical drag scales the selection.
    Scale,
    /// Clicks place path points for the selection.
    Path,
}

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.submit(OrreryCommand::ToggleViewMode);
/// engine.submit(OrreryCommand::RotateCamera { delta: Vec2::new(4.0, 0.0) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrreryCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of pointer movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    /// Constrain subsequent orbit drags.
    SetRotationAxis(RotationAxis),

    /// Swap between the orbit and top views.
    ToggleViewMode,

    // ── Selection ───────────────────────────────────────────────────
    /// Pick at a canvas pixel and make the hit the selection. A miss
    /// clears the selection.
    SelectAt {
        /// Canvas pixel, origin top-left.
        position: Vec2,
    },

    /// Clear the current selection.
    ClearSelection,

    // ── Manipulation ────────────────────────────────────────────────
    /// Choose what left-drags and clicks do to the selection.
    SetEditMode(EditMode),

    /// Rotate the selection by the trackball drag `from` → `to` (pixels).
    TrackballDrag {
        /// Previous pointer position.
        from: Vec2,
        /// Current pointer position.
        to: Vec2,
    },

    /// Multiply the selection's scale uniformly.
    ScaleSelected {
        /// Multiplicative factor.
        factor: f32,
    },

    // ── Motion ──────────────────────────────────────────────────────
    /// Drop a path point under a canvas pixel for the selection.
    PlacePathPoint {
        /// Canvas pixel, origin top-left.
        position: Vec2,
    },

    /// Multiply the global path speed.
    AdjustMotionSpeed {
        /// Multiplicative factor.
        factor: f32,
    },

    /// Stop the selection's path motion where it is.
    CancelMotion,
}
