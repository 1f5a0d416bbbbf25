use glam::Vec2;

use super::event::MouseButton;

/// Result of processing a pointer-up event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickResult {
    /// No click: the pointer was dragged, the drag was interrupted, or the
    /// released button was not the pressed one.
    NoAction,
    /// Press and release without significant movement.
    Click {
        /// Button that clicked.
        button: MouseButton,
        /// Where the button went down.
        position: Vec2,
    },
}

/// Tracks pointer position and click-vs-drag state for one held button.
pub struct PointerState {
    /// Last known pointer position.
    pub position: Vec2,
    /// Held button and where it went down.
    pressed: Option<(MouseButton, Vec2)>,
    is_dragging: bool,
    /// Set when a mode switch happens mid-drag; the rest of the drag is
    /// swallowed.
    suspended: bool,
    drag_threshold: f32,
}

impl PointerState {
    /// Pointer state treating moves beyond `drag_threshold` pixels as a
    /// drag.
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            pressed: None,
            is_dragging: false,
            suspended: false,
            drag_threshold,
        }
    }

    /// Button currently held, if any.
    pub fn pressed_button(&self) -> Option<MouseButton> {
        self.pressed.map(|(button, _)| button)
    }

    /// Whether the current press has become a drag.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Record a press. A second button while one is held is ignored.
    pub fn handle_down(&mut self, button: MouseButton, position: Vec2) {
        self.position = position;
        if self.pressed.is_some() {
            return;
        }
        self.pressed = Some((button, position));
        self.is_dragging = false;
        self.suspended = false;
    }

    /// Record a move and return the delta to apply, if a live drag is in
    /// progress.
    pub fn handle_move(&mut self, position: Vec2) -> Option<(MouseButton, Vec2)> {
        let previous = self.position;
        self.position = position;

        let (button, origin) = self.pressed?;
        if self.suspended {
            return None;
        }
        if !self.is_dragging {
            if position.distance(origin) <= self.drag_threshold {
                return None;
            }
            self.is_dragging = true;
        }
        Some((button, previous))
    }

    /// Stop consuming deltas until the button is released.
    pub fn suspend_drag(&mut self) {
        if self.pressed.is_some() {
            self.suspended = true;
        }
    }

    /// Release `button` and classify the press.
    pub fn handle_up(&mut self, button: MouseButton) -> ClickResult {
        let Some((held, origin)) = self.pressed else {
            return ClickResult::NoAction;
        };
        if held != button {
            return ClickResult::NoAction;
        }
        let clicked = !self.is_dragging && !self.suspended;
        self.pressed = None;
        self.is_dragging = false;
        self.suspended = false;
        if clicked {
            ClickResult::Click {
                button,
                position: origin,
            }
        } else {
            ClickResult::NoAction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_jitter_is_still_a_click() {
        let mut state = PointerState::new(3.0);
        state.handle_down(MouseButton::Left, Vec2::new(10.0, 10.0));
        assert!(state.handle_move(Vec2::new(11.0, 11.0)).is_none());
        assert_eq!(
            state.handle_up(MouseButton::Left),
            ClickResult::Click {
                button: MouseButton::Left,
                position: Vec2::new(10.0, 10.0),
            }
        );
    }

    #[test]
    fn movement_past_threshold_becomes_drag() {
        let mut state = PointerState::new(3.0);
        state.handle_down(MouseButton::Left, Vec2::ZERO);
        let (button, previous) = state.handle_move(Vec2::new(5.0, 0.0)).unwrap();
        assert_eq!(button, MouseButton::Left);
        assert_eq!(previous, Vec2::ZERO);
        assert!(state.is_dragging());
        assert_eq!(state.handle_up(MouseButton::Left), ClickResult::NoAction);
        assert_eq!(state.pressed_button(), None);
    }

    #[test]
    fn suspended_drag_swallows_moves_and_click() {
        let mut state = PointerState::new(3.0);
        state.handle_down(MouseButton::Left, Vec2::ZERO);
        let _ = state.handle_move(Vec2::new(10.0, 0.0));
        state.suspend_drag();
        assert!(state.handle_move(Vec2::new(20.0, 0.0)).is_none());
        assert_eq!(state.handle_up(MouseButton::Left), ClickResult::NoAction);
    }

    #[test]
    fn mismatched_release_is_ignored() {
        let mut state = PointerState::new(3.0);
        state.handle_down(MouseButton::Right, Vec2::ZERO);
        assert_eq!(state.handle_up(MouseButton::Left), ClickResult::NoAction);
        assert_eq!(state.pressed_button(), Some(MouseButton::Right));
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let mut state = PointerState::new(3.0);
        assert!(state.handle_move(Vec2::new(50.0, 50.0)).is_none());
        assert_eq!(state.position, Vec2::new(50.0, 50.0));
    }
}
