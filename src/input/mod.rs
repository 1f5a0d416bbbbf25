//! Input handling: event types, pointer state and the input processor
//! that converts raw window events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Click-versus-drag pointer tracking.
pub(crate) mod mouse;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::{InputContext, InputProcessor};
