use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_view_mode = "v"
/// edit_path = "p"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Swap between the orbit and top views.
    ToggleViewMode,
    /// Unlock camera rotation.
    RotateFree,
    /// Lock camera rotation to elevation.
    RotateX,
    /// Lock camera rotation to azimuth.
    RotateY,
    /// Roll the camera about its view direction.
    RotateZ,
    /// Left-drag rotates the selection with the trackball.
    EditRotate,
    /// Left-drag scales the selection.
    EditScale,
    /// Left-click places path points for the selection.
    EditPath,
    /// Drop the current selection.
    Cancel,
    /// Make path motion faster.
    SpeedUp,
    /// Make path motion slower.
    SlowDown,
    /// Stop the selection's path motion where it is.
    CancelMotion,
}

impl KeyAction {
    /// Whether triggering this action switches what a drag does, so any
    /// drag in progress must stop feeding deltas.
    #[must_use]
    pub const fn interrupts_drag(self) -> bool {
        matches!(
            self,
            Self::EditRotate
                | Self::EditScale
                | Self::EditPath
                | Self::Cancel
                | Self::ToggleViewMode
        )
    }
}
