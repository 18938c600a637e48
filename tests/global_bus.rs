//! Tests for the process-wide event bus.
//!
//! The bus is a set of statics, so everything lives in one test to keep the
//! order of initialization fixed.

use std::time::Instant;

use pointer_marks::events::{self, InputEvent, MouseButton, OverlayEvent};
use pointer_marks::{OverlayError, Point};

#[test]
fn global_bus_lifecycle() {
    // Nothing to drain before init; publishing is a no-op.
    events::publish(OverlayEvent::Quit);
    assert!(events::drain_events().is_empty());

    events::init_event_bus().expect("first init succeeds");

    // The event published before init was dropped.
    assert!(events::drain_events().is_empty());

    let press = OverlayEvent::Mouse(InputEvent::press(
        MouseButton::Left,
        Point::new(5, 6),
        Instant::now(),
    ));
    events::publish(press);
    std::thread::spawn(|| events::publish(OverlayEvent::Quit))
        .join()
        .unwrap();

    assert_eq!(events::drain_events(), vec![press, OverlayEvent::Quit]);
    assert!(events::drain_events().is_empty());

    assert!(matches!(
        events::init_event_bus(),
        Err(OverlayError::EventBusAlreadyInitialized)
    ));
}
