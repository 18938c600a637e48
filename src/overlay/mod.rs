//! Platform-independent overlay controllers.
//!
//! A controller owns the model state of one program and answers three
//! questions for the backend on every timer tick: what changed because of
//! the queued input, what to draw ([`Scene`]), and where the window goes
//! ([`Placement`]). Backends never look inside the model.

pub mod arrow;
pub mod line;

use std::time::{Duration, Instant};

use crate::events::InputEvent;
use crate::model::{ArrowIcon, LineSegment, Point, Size, WindowCommand};

pub use arrow::ArrowOverlay;
pub use line::LineOverlay;

/// A line to stroke, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStroke {
    pub segment: LineSegment,
    pub width: f64,
    /// (R, G, B, A) in [0.0, 1.0].
    pub color: (f64, f64, f64, f64),
}

/// What the window should contain right now.
#[derive(Debug, Clone, Copy)]
pub enum Scene<'a> {
    /// Fully transparent.
    Empty,
    Line(LineStroke),
    /// The icon drawn at the window's top-left corner.
    Icon(&'a ArrowIcon),
}

impl Scene<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Scene::Empty)
    }
}

/// Where the overlay window sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Covers the primary screen; segments are in screen coordinates.
    FullScreen,
    /// A small window whose top-left corner is `origin`.
    FollowCursor { origin: Point, size: Size },
}

impl Placement {
    /// Window rectangle in top-left screen coordinates.
    pub fn rect(self, screen: Size) -> (Point, Size) {
        match self {
            Placement::FullScreen => (Point::new(0, 0), screen),
            Placement::FollowCursor { origin, size } => (origin, size),
        }
    }
}

/// The behaviour of one overlay program, driven by a platform backend.
pub trait OverlayController {
    /// Short program name for log output.
    fn name(&self) -> &'static str;

    /// Ticker period the backend should schedule.
    fn tick_interval(&self) -> Duration;

    /// Applies one queued input event.
    fn on_input(&mut self, event: &InputEvent) -> Option<WindowCommand>;

    /// Advances timers to `now`. `cursor` is the polled pointer position.
    fn on_tick(&mut self, now: Instant, cursor: Point);

    fn scene(&self) -> Scene<'_>;

    fn placement(&self) -> Placement;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_covers_the_screen() {
        let screen = Size::new(1920, 1080);
        assert_eq!(
            Placement::FullScreen.rect(screen),
            (Point::new(0, 0), screen)
        );
    }

    #[test]
    fn follow_cursor_ignores_screen_size() {
        let placement = Placement::FollowCursor {
            origin: Point::new(-5, 40),
            size: Size::square(80),
        };
        assert_eq!(
            placement.rect(Size::new(1920, 1080)),
            (Point::new(-5, 40), Size::square(80))
        );
    }

    #[test]
    fn controllers_are_object_safe() {
        fn takes(_: &dyn OverlayController) {}
        let line = LineOverlay::new(crate::model::LineConfig::default());
        takes(&line);
    }
}
