//! Blinking arrow that follows the cursor while a button is held.

use std::time::{Duration, Instant};

use super::{OverlayController, Placement, Scene};
use crate::events::{InputEvent, InputKind};
use crate::model::{ArrowConfig, ArrowIcon, ArrowState, Point, WindowCommand};

pub struct ArrowOverlay {
    config: ArrowConfig,
    state: ArrowState,
    icon: ArrowIcon,
}

impl ArrowOverlay {
    /// Loads the icon from `config.icon_path`, drawing a placeholder if that fails.
    pub fn new(mut config: ArrowConfig) -> Self {
        config.validate();
        let icon = ArrowIcon::load_or_placeholder(&config.icon_path, config.window_size);
        Self::with_icon(config, icon)
    }

    pub fn with_icon(mut config: ArrowConfig, icon: ArrowIcon) -> Self {
        config.validate();
        log::debug!(
            "arrow icon {}x{}{}",
            icon.width(),
            icon.height(),
            if icon.is_placeholder() { " (placeholder)" } else { "" }
        );
        Self {
            config,
            state: ArrowState::new(),
            icon,
        }
    }

    pub fn config(&self) -> &ArrowConfig {
        &self.config
    }

    pub fn state(&self) -> &ArrowState {
        &self.state
    }

    pub fn icon(&self) -> &ArrowIcon {
        &self.icon
    }
}

impl OverlayController for ArrowOverlay {
    fn name(&self) -> &'static str {
        "mouse-arrow"
    }

    fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }

    fn on_input(&mut self, event: &InputEvent) -> Option<WindowCommand> {
        match event.kind {
            InputKind::Press(_) => Some(self.state.press(event.at, event.position, &self.config)),
            InputKind::Release(_) => Some(self.state.release()),
            InputKind::Move => {
                self.state.on_move(event.position);
                None
            }
        }
    }

    fn on_tick(&mut self, now: Instant, cursor: Point) {
        self.state.tick(now, cursor, &self.config);
    }

    fn scene(&self) -> Scene<'_> {
        if self.state.shows_icon() {
            Scene::Icon(&self.icon)
        } else {
            Scene::Empty
        }
    }

    fn placement(&self) -> Placement {
        Placement::FollowCursor {
            origin: self.state.window_origin(&self.config),
            size: self.config.window_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MouseButton;
    use crate::model::Size;

    fn overlay() -> ArrowOverlay {
        let config = ArrowConfig::default();
        let icon = ArrowIcon::placeholder(config.window_size);
        ArrowOverlay::with_icon(config, icon)
    }

    #[test]
    fn hidden_until_pressed() {
        let arrow = overlay();
        assert!(arrow.scene().is_empty());
    }

    #[test]
    fn press_shows_icon_and_release_hides_it() {
        let mut arrow = overlay();
        let t0 = Instant::now();

        let cmd = arrow.on_input(&InputEvent::press(MouseButton::Right, Point::new(50, 200), t0));
        assert_eq!(cmd, Some(WindowCommand::Show));
        assert!(matches!(arrow.scene(), Scene::Icon(_)));

        let cmd = arrow.on_input(&InputEvent::release(MouseButton::Left, Point::new(50, 200), t0));
        assert_eq!(cmd, Some(WindowCommand::Hide));
        assert!(arrow.scene().is_empty());
    }

    #[test]
    fn moves_do_not_touch_visibility() {
        let mut arrow = overlay();
        let cmd = arrow.on_input(&InputEvent::moved(Point::new(1, 1), Instant::now()));
        assert_eq!(cmd, None);
    }

    #[test]
    fn window_sits_up_and_right_of_cursor() {
        let mut arrow = overlay();
        arrow.on_tick(Instant::now(), Point::new(400, 300));
        assert_eq!(
            arrow.placement(),
            Placement::FollowCursor {
                origin: Point::new(410, 220),
                size: Size::square(80),
            }
        );
    }

    #[test]
    fn move_events_update_placement_between_ticks() {
        let mut arrow = overlay();
        arrow.on_input(&InputEvent::moved(Point::new(20, 100), Instant::now()));
        assert!(matches!(
            arrow.placement(),
            Placement::FollowCursor { origin, .. } if origin == Point::new(30, 20)
        ));
    }

    #[test]
    fn missing_icon_file_uses_placeholder() {
        let config = ArrowConfig {
            icon_path: "no/such/dir/arrow.png".into(),
            ..ArrowConfig::default()
        };
        let arrow = ArrowOverlay::new(config);
        assert!(arrow.icon().is_placeholder());
    }
}
