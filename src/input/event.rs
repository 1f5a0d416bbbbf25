/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`OrreryCommand`](crate::OrreryCommand) values.
/// Positions are canvas pixels with the origin at the top-left.
///
/// # Example
///
/// ```ignore
/// let cmd = input_processor.handle_event(
///     &InputEvent::PointerMove { x: 100.0, y: 200.0 },
///     engine.input_context(),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer button pressed at a position.
    PointerDown {
        /// Which button was pressed.
        button: MouseButton,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Pointer moved to an absolute position.
    PointerMove {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Pointer button released.
    PointerUp {
        /// Which button was released.
        button: MouseButton,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount.
        delta: f32,
    },
    /// Key pressed, by logical key name (`"v"`, `"escape"`, `"+"`).
    KeyDown {
        /// Key name; matched case-insensitively.
        key: String,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "winit")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            // Back/forward/extra buttons carry no gesture.
            _ => Self::Middle,
        }
    }
}
