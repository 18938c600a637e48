//! Press-and-hold line overlay.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{LineStroke, OverlayController, Placement, Scene};
use crate::events::{InputEvent, InputKind};
use crate::model::{GestureState, LineConfig, Point, WindowCommand};

/// Drives a [`GestureState`] from mouse input and timer ticks.
///
/// Every button is treated alike; the line is drawn in screen coordinates
/// on a window that covers the primary screen.
pub struct LineOverlay {
    config: LineConfig,
    gesture: GestureState,
    rng: StdRng,
}

impl LineOverlay {
    /// Validates `config` and seeds the length generator from the OS.
    pub fn new(config: LineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Uses a caller-supplied generator, so tests get repeatable lengths.
    pub fn with_rng(mut config: LineConfig, rng: StdRng) -> Self {
        config.validate();
        Self {
            config,
            gesture: GestureState::new(),
            rng,
        }
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }
}

impl OverlayController for LineOverlay {
    fn name(&self) -> &'static str {
        "drawline"
    }

    fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }

    fn on_input(&mut self, event: &InputEvent) -> Option<WindowCommand> {
        self.gesture.advance_to(event.at, &self.config);
        match event.kind {
            InputKind::Press(_) => {
                self.gesture
                    .press(event.at, event.position, &self.config, &mut self.rng)
            }
            InputKind::Release(_) => self.gesture.release(event.at, &self.config),
            InputKind::Move => self.gesture.on_move(event.position, &self.config),
        }
    }

    fn on_tick(&mut self, now: Instant, _cursor: Point) {
        self.gesture.tick(now, &self.config);
    }

    fn scene(&self) -> Scene<'_> {
        match self.gesture.visible_segment() {
            Some(segment) => Scene::Line(LineStroke {
                segment,
                width: self.config.stroke_width,
                color: self.config.stroke_color,
            }),
            None => Scene::Empty,
        }
    }

    fn placement(&self) -> Placement {
        Placement::FullScreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MouseButton;
    use crate::model::Phase;

    fn overlay() -> LineOverlay {
        LineOverlay::with_rng(LineConfig::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn any_button_starts_a_gesture() {
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            let mut line = overlay();
            let cmd = line.on_input(&InputEvent::press(button, Point::new(10, 10), Instant::now()));
            assert_eq!(cmd, Some(WindowCommand::Show));
            assert_eq!(line.gesture().phase(), Phase::PressingBelowThreshold);
        }
    }

    #[test]
    fn scene_is_empty_before_threshold() {
        let mut line = overlay();
        let t0 = Instant::now();
        line.on_input(&InputEvent::press(MouseButton::Left, Point::new(10, 10), t0));
        line.on_tick(t0 + Duration::from_millis(30), Point::new(10, 10));
        assert!(line.scene().is_empty());
    }

    #[test]
    fn scene_strokes_with_configured_pen() {
        let mut line = overlay();
        let t0 = Instant::now();
        line.on_input(&InputEvent::press(MouseButton::Left, Point::new(100, 50), t0));
        line.on_tick(t0 + Duration::from_millis(210), Point::new(100, 50));

        match line.scene() {
            Scene::Line(stroke) => {
                assert_eq!(stroke.segment.start, Point::new(93, 50));
                assert_eq!(stroke.segment.end, Point::new(107, 50));
                assert_eq!(stroke.width, 5.0);
                assert_eq!(stroke.color, (1.0, 0.0, 0.0, 1.0));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn placement_is_full_screen() {
        assert_eq!(overlay().placement(), Placement::FullScreen);
    }

    #[test]
    fn constructor_validates_config() {
        let config = LineConfig {
            growth_step: 0,
            ..LineConfig::default()
        };
        let line = LineOverlay::with_rng(config, StdRng::seed_from_u64(1));
        assert_eq!(line.config().growth_step, 1);
    }
}
