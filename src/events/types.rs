//! Event records passed from the input hooks to the UI thread.
//!
//! Records are plain immutable values stamped when the hook saw them, so
//! they can be queued and replayed later on the UI thread.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use std::time::Instant;

use crate::model::Point;

/// Which mouse button an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// X1/X2 and anything else the OS reports.
    Other,
}

/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Press(MouseButton),
    Release(MouseButton),
    Move,
}

/// One global mouse event in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub position: Point,
    pub at: Instant,
}

impl InputEvent {
    pub fn new(kind: InputKind, position: Point, at: Instant) -> Self {
        Self { kind, position, at }
    }

    pub fn press(button: MouseButton, position: Point, at: Instant) -> Self {
        Self::new(InputKind::Press(button), position, at)
    }

    pub fn release(button: MouseButton, position: Point, at: Instant) -> Self {
        Self::new(InputKind::Release(button), position, at)
    }

    pub fn moved(position: Point, at: Instant) -> Self {
        Self::new(InputKind::Move, position, at)
    }
}

/// Everything the UI thread may receive from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// A global mouse event.
    Mouse(InputEvent),

    /// Escape was pressed: close the overlay and exit.
    Quit,
}

impl OverlayEvent {
    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            OverlayEvent::Mouse(e) => match e.kind {
                InputKind::Press(_) => "Mouse button pressed",
                InputKind::Release(_) => "Mouse button released",
                InputKind::Move => "Mouse moved",
            },
            OverlayEvent::Quit => "Quit requested",
        }
    }
}
