//! Global mouse and keyboard event monitors.
//!
//! Monitors run on the main thread but outside the overlay timer, so they
//! only publish records to the event bus; the timer applies them.

use std::time::Instant;

use block2::RcBlock;

use crate::error::{OverlayError, Result};
use crate::events::{self, InputEvent, InputKind, MouseButton, OverlayEvent};
use crate::model::Point;
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, NSPoint};
use crate::platform::macos::ffi::cocoa::flip_y;

// NSEventType values
const LEFT_MOUSE_DOWN: usize = 1;
const LEFT_MOUSE_UP: usize = 2;
const RIGHT_MOUSE_DOWN: usize = 3;
const RIGHT_MOUSE_UP: usize = 4;
const MOUSE_MOVED: usize = 5;
const LEFT_MOUSE_DRAGGED: usize = 6;
const RIGHT_MOUSE_DRAGGED: usize = 7;
const OTHER_MOUSE_DOWN: usize = 25;
const OTHER_MOUSE_UP: usize = 26;
const OTHER_MOUSE_DRAGGED: usize = 27;

const KEY_DOWN_MASK: u64 = 1 << 10;
const KEYCODE_ESCAPE: u16 = 53;

/// Mask of every mouse event type mapped by [`mouse_event_kind`].
pub const MOUSE_EVENT_MASK: u64 = (1 << LEFT_MOUSE_DOWN)
    | (1 << LEFT_MOUSE_UP)
    | (1 << RIGHT_MOUSE_DOWN)
    | (1 << RIGHT_MOUSE_UP)
    | (1 << MOUSE_MOVED)
    | (1 << LEFT_MOUSE_DRAGGED)
    | (1 << RIGHT_MOUSE_DRAGGED)
    | (1 << OTHER_MOUSE_DOWN)
    | (1 << OTHER_MOUSE_UP)
    | (1 << OTHER_MOUSE_DRAGGED);

fn other_button(button_number: isize) -> MouseButton {
    if button_number == 2 {
        MouseButton::Middle
    } else {
        MouseButton::Other
    }
}

/// Maps an `NSEventType` to the event it represents. Drags count as moves.
pub fn mouse_event_kind(event_type: usize, button_number: isize) -> Option<InputKind> {
    match event_type {
        LEFT_MOUSE_DOWN => Some(InputKind::Press(MouseButton::Left)),
        RIGHT_MOUSE_DOWN => Some(InputKind::Press(MouseButton::Right)),
        OTHER_MOUSE_DOWN => Some(InputKind::Press(other_button(button_number))),
        LEFT_MOUSE_UP => Some(InputKind::Release(MouseButton::Left)),
        RIGHT_MOUSE_UP => Some(InputKind::Release(MouseButton::Right)),
        OTHER_MOUSE_UP => Some(InputKind::Release(other_button(button_number))),
        MOUSE_MOVED | LEFT_MOUSE_DRAGGED | RIGHT_MOUSE_DRAGGED | OTHER_MOUSE_DRAGGED => {
            Some(InputKind::Move)
        }
        _ => None,
    }
}

/// Install a global monitor publishing every mouse press, release and move.
///
/// Returns the monitor token for `removeMonitor:`.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_mouse_monitors(screen_height: f64) -> Result<id> {
    let cls = get_class(c"NSEvent")?;

    let handler = RcBlock::new(move |event: id| unsafe {
        let event_type: usize = msg_send![event, r#type];
        let button_number: isize = msg_send![event, buttonNumber];
        let Some(kind) = mouse_event_kind(event_type, button_number) else {
            return;
        };
        // Global events have no window, so this is in screen coordinates.
        let p: NSPoint = msg_send![event, locationInWindow];
        let position = Point::new(p.x.round() as i32, flip_y(p.y, screen_height).round() as i32);
        events::publish(OverlayEvent::Mouse(InputEvent::new(
            kind,
            position,
            Instant::now(),
        )));
    });

    let monitor: id =
        msg_send![cls, addGlobalMonitorForEventsMatchingMask: MOUSE_EVENT_MASK, handler: &*handler];
    if monitor == nil {
        return Err(OverlayError::HookInstall("global mouse monitor".into()));
    }
    Ok(monitor)
}

/// Install a global monitor that publishes `Quit` when Escape is pressed.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_escape_monitor() -> Result<id> {
    let cls = get_class(c"NSEvent")?;

    let handler = RcBlock::new(move |event: id| unsafe {
        let keycode: u16 = msg_send![event, keyCode];
        if keycode == KEYCODE_ESCAPE {
            events::publish(OverlayEvent::Quit);
        }
    });

    let monitor: id =
        msg_send![cls, addGlobalMonitorForEventsMatchingMask: KEY_DOWN_MASK, handler: &*handler];
    if monitor == nil {
        return Err(OverlayError::HookInstall("global key monitor".into()));
    }
    Ok(monitor)
}

/// Remove monitors installed above.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn remove_monitors(monitors: &[id]) {
    let Ok(cls) = get_class(c"NSEvent") else {
        return;
    };
    for &monitor in monitors {
        let _: () = msg_send![cls, removeMonitor: monitor];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_map_to_presses_and_releases() {
        assert_eq!(
            mouse_event_kind(LEFT_MOUSE_DOWN, 0),
            Some(InputKind::Press(MouseButton::Left))
        );
        assert_eq!(
            mouse_event_kind(RIGHT_MOUSE_UP, 1),
            Some(InputKind::Release(MouseButton::Right))
        );
        assert_eq!(
            mouse_event_kind(OTHER_MOUSE_DOWN, 2),
            Some(InputKind::Press(MouseButton::Middle))
        );
        assert_eq!(
            mouse_event_kind(OTHER_MOUSE_UP, 4),
            Some(InputKind::Release(MouseButton::Other))
        );
    }

    #[test]
    fn test_drags_are_moves() {
        for ty in [MOUSE_MOVED, LEFT_MOUSE_DRAGGED, RIGHT_MOUSE_DRAGGED, OTHER_MOUSE_DRAGGED] {
            assert_eq!(mouse_event_kind(ty, 0), Some(InputKind::Move));
        }
    }

    #[test]
    fn test_scroll_is_ignored() {
        // NSEventTypeScrollWheel
        assert_eq!(mouse_event_kind(22, 0), None);
    }
}
