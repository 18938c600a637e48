//! State of the blinking arrow overlay.

use std::time::Instant;

use super::config::ArrowConfig;
use super::geometry::Point;
use super::gesture::WindowCommand;

/// Arrow overlay state: shown while a button is held, blinking meanwhile.
#[derive(Debug, Clone)]
pub struct ArrowState {
    pressed: bool,
    icon_visible: bool,
    next_toggle: Option<Instant>,
    cursor: Point,
}

impl Default for ArrowState {
    fn default() -> Self {
        Self {
            pressed: false,
            icon_visible: true,
            next_toggle: None,
            cursor: Point::default(),
        }
    }
}

impl ArrowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the icon is in the visible half of its blink cycle.
    pub fn icon_visible(&self) -> bool {
        self.icon_visible
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Should the icon be painted right now?
    pub fn shows_icon(&self) -> bool {
        self.pressed && self.icon_visible
    }

    /// Top-left corner of the arrow window.
    pub fn window_origin(&self, config: &ArrowConfig) -> Point {
        self.cursor.offset(config.offset.0, config.offset.1)
    }

    /// Any button went down: show the arrow and start blinking.
    pub fn press(&mut self, at: Instant, position: Point, config: &ArrowConfig) -> WindowCommand {
        self.pressed = true;
        self.icon_visible = true;
        self.cursor = position;
        self.next_toggle = Some(at + config.blink_half_period);
        WindowCommand::Show
    }

    /// Any button went up: stop blinking and hide.
    pub fn release(&mut self) -> WindowCommand {
        self.pressed = false;
        self.next_toggle = None;
        WindowCommand::Hide
    }

    pub fn on_move(&mut self, position: Point) {
        self.cursor = position;
    }

    /// Follows the polled cursor and toggles the blink when due.
    pub fn tick(&mut self, now: Instant, cursor: Point, config: &ArrowConfig) {
        self.cursor = cursor;
        if !self.pressed {
            return;
        }
        if let Some(deadline) = self.next_toggle {
            if now >= deadline {
                self.icon_visible = !self.icon_visible;
                let mut next = deadline + config.blink_half_period;
                if next <= now {
                    next = now + config.blink_half_period;
                }
                self.next_toggle = Some(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_hidden() {
        let state = ArrowState::new();
        assert!(!state.is_pressed());
        assert!(!state.shows_icon());
    }

    #[test]
    fn press_shows_and_release_hides() {
        let config = ArrowConfig::default();
        let t0 = Instant::now();
        let mut state = ArrowState::new();

        assert_eq!(state.press(t0, Point::new(5, 5), &config), WindowCommand::Show);
        assert!(state.shows_icon());
        assert_eq!(state.release(), WindowCommand::Hide);
        assert!(!state.shows_icon());
    }

    #[test]
    fn blinks_every_half_period_while_pressed() {
        let config = ArrowConfig::default();
        let t0 = Instant::now();
        let mut state = ArrowState::new();
        state.press(t0, Point::new(0, 0), &config);

        state.tick(t0 + ms(490), Point::new(0, 0), &config);
        assert!(state.icon_visible());
        state.tick(t0 + ms(500), Point::new(0, 0), &config);
        assert!(!state.icon_visible());
        state.tick(t0 + ms(990), Point::new(0, 0), &config);
        assert!(!state.icon_visible());
        state.tick(t0 + ms(1000), Point::new(0, 0), &config);
        assert!(state.icon_visible());
    }

    #[test]
    fn no_blinking_after_release() {
        let config = ArrowConfig::default();
        let t0 = Instant::now();
        let mut state = ArrowState::new();
        state.press(t0, Point::new(0, 0), &config);
        state.release();

        state.tick(t0 + ms(600), Point::new(0, 0), &config);
        assert!(state.icon_visible());
        assert!(!state.shows_icon());
    }

    #[test]
    fn window_follows_cursor_with_offset() {
        let config = ArrowConfig::default();
        let mut state = ArrowState::new();
        state.tick(Instant::now(), Point::new(300, 200), &config);
        assert_eq!(state.window_origin(&config), Point::new(310, 120));
    }

    #[test]
    fn new_press_restarts_visible() {
        let config = ArrowConfig::default();
        let t0 = Instant::now();
        let mut state = ArrowState::new();
        state.press(t0, Point::new(0, 0), &config);
        state.tick(t0 + ms(500), Point::new(0, 0), &config);
        assert!(!state.icon_visible());
        state.release();

        state.press(t0 + ms(700), Point::new(0, 0), &config);
        assert!(state.icon_visible());
    }
}
