//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (pointer tracking,
//! drag detection, interrupted drags) and the key-binding map. It is the
//! only thing that sits between raw window events and
//! [`Engine::submit`](crate::Engine::submit).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::mouse::{ClickResult, PointerState};
use crate::camera::RotationAxis;
use crate::engine::command::{EditMode, OrreryCommand};
use crate::options::{InteractionOptions, KeybindingOptions, Options};

/// Engine state the processor needs to interpret a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    /// Whether an entity is selected.
    pub has_selection: bool,
    /// What left-drags and clicks do to the selection.
    pub edit_mode: EditMode,
}

/// Converts raw events into [`OrreryCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = processor.handle_event(&event, engine.input_context()) {
///     engine.submit(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Pointer tracking and click/drag state.
    state: PointerState,
    interaction: InteractionOptions,
    speed_step_factor: f32,
    /// Key name → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a processor configured from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            state: PointerState::new(options.interaction.drag_threshold),
            interaction: options.interaction.clone(),
            speed_step_factor: options.motion.speed_step_factor,
            key_bindings: options.keybindings.clone(),
        }
    }

    /// Current pointer position in pixels.
    #[must_use]
    pub fn pointer_pos(&self) -> Vec2 {
        self.state.position
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Stop the current drag from feeding further deltas. Called when the
    /// edit mode or selection changes underneath it.
    pub fn interrupt_drag(&mut self) {
        self.state.suspend_drag();
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        ctx: InputContext,
    ) -> Option<OrreryCommand> {
        match *event {
            InputEvent::PointerDown { button, x, y } => {
                self.state.handle_down(button, Vec2::new(x, y));
                None
            }
            InputEvent::PointerMove { x, y } => {
                self.handle_pointer_move(Vec2::new(x, y), ctx)
            }
            InputEvent::PointerUp { button } => {
                self.handle_pointer_up(button, ctx)
            }
            InputEvent::Scroll { delta } => Some(OrreryCommand::Zoom { delta }),
            InputEvent::KeyDown { ref key } => self.handle_key_press(key),
        }
    }

    /// Look up a key press and return the corresponding command, if bound.
    pub fn handle_key_press(&mut self, key: &str) -> Option<OrreryCommand> {
        let action = self.key_bindings.lookup(key)?;
        if action.interrupts_drag() {
            self.state.suspend_drag();
        }
        Some(self.action_command(action))
    }

    fn action_command(&self, action: KeyAction) -> OrreryCommand {
        match action {
            KeyAction::ToggleViewMode => OrreryCommand::ToggleViewMode,
            KeyAction::RotateFree => {
                OrreryCommand::SetRotationAxis(RotationAxis::Free)
            }
            KeyAction::RotateX => OrreryCommand::SetRotationAxis(RotationAxis::X),
            KeyAction::RotateY => OrreryCommand::SetRotationAxis(RotationAxis::Y),
            KeyAction::RotateZ => OrreryCommand::SetRotationAxis(RotationAxis::Z),
            KeyAction::EditRotate => OrreryCommand::SetEditMode(EditMode::Rotate),
            KeyAction::EditScale => OrreryCommand::SetEditMode(EditMode::Scale),
            KeyAction::EditPath => OrreryCommand::SetEditMode(EditMode::Path),
            KeyAction::Cancel => OrreryCommand::ClearSelection,
            KeyAction::SpeedUp => OrreryCommand::AdjustMotionSpeed {
                factor: self.speed_step_factor,
            },
            KeyAction::SlowDown => OrreryCommand::AdjustMotionSpeed {
                factor: self.speed_step_factor.recip(),
            },
            KeyAction::CancelMotion => OrreryCommand::CancelMotion,
        }
    }

    /// Pointer moved: a live drag becomes a camera or manipulation command.
    fn handle_pointer_move(
        &mut self,
        position: Vec2,
        ctx: InputContext,
    ) -> Option<OrreryCommand> {
        let (button, previous) = self.state.handle_move(position)?;
        let delta = position - previous;

        match button {
            MouseButton::Right => Some(OrreryCommand::RotateCamera { delta }),
            MouseButton::Middle => None,
            MouseButton::Left if !ctx.has_selection => {
                Some(OrreryCommand::RotateCamera { delta })
            }
            MouseButton::Left => match ctx.edit_mode {
                EditMode::Rotate => Some(OrreryCommand::TrackballDrag {
                    from: previous,
                    to: position,
                }),
                EditMode::Scale => Some(OrreryCommand::ScaleSelected {
                    factor: self.scale_factor(delta.y),
                }),
                EditMode::Path => Some(OrreryCommand::RotateCamera { delta }),
            },
        }
    }

    /// Dragging up grows, dragging down shrinks.
    fn scale_factor(&self, dy: f32) -> f32 {
        (1.0 - dy * self.interaction.scale_sensitivity).clamp(
            self.interaction.min_scale_step,
            self.interaction.max_scale_step,
        )
    }

    /// Convert a pointer-up into a selection or path command (if any).
    fn handle_pointer_up(
        &mut self,
        button: MouseButton,
        ctx: InputContext,
    ) -> Option<OrreryCommand> {
        match self.state.handle_up(button) {
            ClickResult::NoAction => None,
            ClickResult::Click {
                button: MouseButton::Left,
                position,
            } => {
                if ctx.has_selection && ctx.edit_mode == EditMode::Path {
                    Some(OrreryCommand::PlacePathPoint { position })
                } else {
                    Some(OrreryCommand::SelectAt { position })
                }
            }
            ClickResult::Click { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> InputProcessor {
        InputProcessor::new(&Options::default())
    }

    fn down(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { button, x, y }
    }

    fn to(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    fn up(button: MouseButton) -> InputEvent {
        InputEvent::PointerUp { button }
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::KeyDown { key: name.into() }
    }

    const SELECTED: InputContext = InputContext {
        has_selection: true,
        edit_mode: EditMode::Rotate,
    };

    #[test]
    fn click_without_movement_selects_at_press() {
        let mut p = processor();
        let ctx = InputContext::default();
        assert_eq!(p.handle_event(&down(MouseButton::Left, 40.0, 30.0), ctx), None);
        assert_eq!(p.handle_event(&to(41.0, 30.0), ctx), None);
        assert_eq!(
            p.handle_event(&up(MouseButton::Left), ctx),
            Some(OrreryCommand::SelectAt {
                position: Vec2::new(40.0, 30.0)
            })
        );
    }

    #[test]
    fn drag_on_background_orbits_camera_and_is_not_a_click() {
        let mut p = processor();
        let ctx = InputContext::default();
        let _ = p.handle_event(&down(MouseButton::Left, 0.0, 0.0), ctx);
        assert_eq!(
            p.handle_event(&to(10.0, 4.0), ctx),
            Some(OrreryCommand::RotateCamera {
                delta: Vec2::new(10.0, 4.0)
            })
        );
        assert_eq!(p.handle_event(&up(MouseButton::Left), ctx), None);
    }

    #[test]
    fn right_drag_always_orbits() {
        let mut p = processor();
        let _ = p.handle_event(&down(MouseButton::Right, 0.0, 0.0), SELECTED);
        assert!(matches!(
            p.handle_event(&to(0.0, 8.0), SELECTED),
            Some(OrreryCommand::RotateCamera { .. })
        ));
        assert_eq!(p.handle_event(&up(MouseButton::Right), SELECTED), None);
    }

    #[test]
    fn left_drag_on_selection_follows_edit_mode() {
        let mut p = processor();
        let _ = p.handle_event(&down(MouseButton::Left, 0.0, 0.0), SELECTED);
        assert_eq!(
            p.handle_event(&to(10.0, 0.0), SELECTED),
            Some(OrreryCommand::TrackballDrag {
                from: Vec2::ZERO,
                to: Vec2::new(10.0, 0.0),
            })
        );

        let scale = InputContext {
            edit_mode: EditMode::Scale,
            ..SELECTED
        };
        let Some(OrreryCommand::ScaleSelected { factor }) =
            p.handle_event(&to(10.0, -10.0), scale)
        else {
            panic!("expected a scale command");
        };
        assert!((factor - 1.1).abs() < 1e-6);

        let path = InputContext {
            edit_mode: EditMode::Path,
            ..SELECTED
        };
        assert!(matches!(
            p.handle_event(&to(20.0, -10.0), path),
            Some(OrreryCommand::RotateCamera { .. })
        ));
    }

    #[test]
    fn scale_step_is_clamped() {
        let mut p = processor();
        let scale = InputContext {
            has_selection: true,
            edit_mode: EditMode::Scale,
        };
        let _ = p.handle_event(&down(MouseButton::Left, 0.0, 0.0), scale);
        assert_eq!(
            p.handle_event(&to(0.0, 500.0), scale),
            Some(OrreryCommand::ScaleSelected { factor: 0.5 })
        );
    }

    #[test]
    fn click_in_path_mode_places_point() {
        let mut p = processor();
        let path = InputContext {
            has_selection: true,
            edit_mode: EditMode::Path,
        };
        let _ = p.handle_event(&down(MouseButton::Left, 5.0, 6.0), path);
        assert_eq!(
            p.handle_event(&up(MouseButton::Left), path),
            Some(OrreryCommand::PlacePathPoint {
                position: Vec2::new(5.0, 6.0)
            })
        );
    }

    #[test]
    fn mode_key_interrupts_drag() {
        let mut p = processor();
        let _ = p.handle_event(&down(MouseButton::Left, 0.0, 0.0), SELECTED);
        assert!(p.handle_event(&to(10.0, 0.0), SELECTED).is_some());
        assert_eq!(
            p.handle_event(&key("s"), SELECTED),
            Some(OrreryCommand::SetEditMode(EditMode::Scale))
        );
        assert_eq!(p.handle_event(&to(20.0, 0.0), SELECTED), None);
        assert_eq!(p.handle_event(&up(MouseButton::Left), SELECTED), None);

        // The next press works normally again.
        let _ = p.handle_event(&down(MouseButton::Left, 0.0, 0.0), SELECTED);
        assert!(p.handle_event(&to(10.0, 0.0), SELECTED).is_some());
    }

    #[test]
    fn axis_keys_do_not_interrupt_drag() {
        let mut p = processor();
        let ctx = InputContext::default();
        let _ = p.handle_event(&down(MouseButton::Left, 0.0, 0.0), ctx);
        let _ = p.handle_event(&to(10.0, 0.0), ctx);
        assert_eq!(
            p.handle_event(&key("X"), ctx),
            Some(OrreryCommand::SetRotationAxis(RotationAxis::X))
        );
        assert!(p.handle_event(&to(20.0, 0.0), ctx).is_some());
    }

    #[test]
    fn speed_keys_are_reciprocal() {
        let mut p = processor();
        let ctx = InputContext::default();
        assert_eq!(
            p.handle_event(&key("+"), ctx),
            Some(OrreryCommand::AdjustMotionSpeed { factor: 1.25 })
        );
        assert_eq!(
            p.handle_event(&key("-"), ctx),
            Some(OrreryCommand::AdjustMotionSpeed { factor: 0.8 })
        );
    }

    #[test]
    fn unbound_key_and_scroll() {
        let mut p = processor();
        let ctx = InputContext::default();
        assert_eq!(p.handle_event(&key("q"), ctx), None);
        assert_eq!(
            p.handle_event(&InputEvent::Scroll { delta: 1.5 }, ctx),
            Some(OrreryCommand::Zoom { delta: 1.5 })
        );
    }
}
