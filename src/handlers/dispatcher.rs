//! Event dispatcher feeding queued input into the active controller.
//!
//! The dispatcher receives events drained from the event bus and applies
//! them in arrival order. It's called from the UI thread's timer and
//! processes all pending events in batch before the tick advances timers.
//!
//! # Architecture
//!
//! ```text
//! drain_events() → dispatch_events() → OverlayController::on_input()
//!                   → OverlayController::on_tick()
//! ```
//!
//! Window commands are collected, not executed: the backend applies them
//! once the controller borrow has ended.

use std::time::Instant;

use crate::events::OverlayEvent;
use crate::model::{Point, WindowCommand};
use crate::overlay::OverlayController;

/// What a batch of events asks the backend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Last visibility change requested in the batch.
    pub window: Option<WindowCommand>,
    /// Escape was seen; tear down and exit.
    pub quit: bool,
}

/// Apply a batch of events, oldest first.
///
/// Events after a `Quit` are still applied; the backend exits at the end of
/// the tick either way.
pub fn dispatch_events<I>(events: I, controller: &mut dyn OverlayController) -> DispatchOutcome
where
    I: IntoIterator<Item = OverlayEvent>,
{
    let mut outcome = DispatchOutcome::default();

    for event in events {
        log::trace!("{}: {}", controller.name(), event.description());
        match event {
            OverlayEvent::Mouse(input) => {
                if let Some(cmd) = controller.on_input(&input) {
                    outcome.window = Some(cmd);
                }
            }
            OverlayEvent::Quit => {
                log::info!("{}: escape pressed, quitting", controller.name());
                outcome.quit = true;
            }
        }
    }

    outcome
}

/// One full timer tick: dispatch queued events, then advance timers.
pub fn run_tick<I>(
    events: I,
    controller: &mut dyn OverlayController,
    now: Instant,
    cursor: Point,
) -> DispatchOutcome
where
    I: IntoIterator<Item = OverlayEvent>,
{
    let outcome = dispatch_events(events, controller);
    controller.on_tick(now, cursor);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{InputEvent, MouseButton};
    use crate::model::{LineConfig, Phase};
    use crate::overlay::LineOverlay;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn line() -> LineOverlay {
        LineOverlay::with_rng(LineConfig::default(), StdRng::seed_from_u64(3))
    }

    fn mouse(event: InputEvent) -> OverlayEvent {
        OverlayEvent::Mouse(event)
    }

    #[test]
    fn test_empty_batch_does_nothing() {
        let mut overlay = line();
        let outcome = dispatch_events(Vec::new(), &mut overlay);
        assert_eq!(outcome, DispatchOutcome::default());
    }

    #[test]
    fn test_quit_is_reported() {
        let mut overlay = line();
        let outcome = dispatch_events([OverlayEvent::Quit], &mut overlay);
        assert!(outcome.quit);
        assert_eq!(outcome.window, None);
    }

    #[test]
    fn test_last_window_command_wins() {
        let mut overlay = line();
        let t0 = Instant::now();
        let p = Point::new(10, 10);
        let outcome = dispatch_events(
            [
                mouse(InputEvent::press(MouseButton::Left, p, t0)),
                mouse(InputEvent::release(MouseButton::Left, p, t0 + Duration::from_millis(50))),
            ],
            &mut overlay,
        );
        assert_eq!(outcome.window, Some(WindowCommand::Hide));
        assert_eq!(overlay.gesture().phase(), Phase::Idle);
    }

    #[test]
    fn test_run_tick_dispatches_before_advancing() {
        let mut overlay = line();
        let t0 = Instant::now();
        let p = Point::new(10, 10);

        let outcome = run_tick(
            [mouse(InputEvent::press(MouseButton::Left, p, t0))],
            &mut overlay,
            t0 + Duration::from_millis(200),
            p,
        );

        assert_eq!(outcome.window, Some(WindowCommand::Show));
        assert_eq!(overlay.gesture().phase(), Phase::PressingDrawing);
        assert_eq!(overlay.gesture().line_length(), 15);
    }
}
