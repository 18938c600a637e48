//! Tunables for both overlays.
//!
//! Neither program reads a config file or command line; these structs exist
//! so the controllers take their numbers from one place and tests can swap
//! them. `Default` mirrors [`constants`](super::constants).

use std::path::PathBuf;
use std::time::Duration;

use super::constants::*;
use super::geometry::Size;
use crate::clamp;

/// Settings of the press-and-hold line overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct LineConfig {
    /// Ticker period.
    pub tick_interval: Duration,
    /// How long a press must last before the line starts drawing.
    pub hold_threshold: Duration,
    /// Time the released line spends in each half of its blink cycle.
    pub blink_half_period: Duration,
    /// Growth per tick in pixels.
    pub growth_step: i32,
    /// Inclusive range the per-gesture maximum length is drawn from.
    pub max_length_range: (i32, i32),
    /// Movement from the press point that invalidates the gesture.
    pub press_move_tolerance: f64,
    /// Jump between consecutive moves that cancels a blinking line.
    pub cancel_jump_distance: f64,
    /// Vertical reach of the near-line hit region.
    pub near_line_band: i32,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Stroke colour (R, G, B, A) in [0.0, 1.0].
    pub stroke_color: (f64, f64, f64, f64),
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            tick_interval: LINE_TICK_INTERVAL,
            hold_threshold: HOLD_THRESHOLD,
            blink_half_period: LINE_BLINK_HALF_PERIOD,
            growth_step: LINE_GROWTH_STEP,
            max_length_range: (MIN_MAX_LINE_LENGTH, MAX_MAX_LINE_LENGTH),
            press_move_tolerance: PRESS_MOVE_TOLERANCE,
            cancel_jump_distance: CANCEL_JUMP_DISTANCE,
            near_line_band: NEAR_LINE_BAND,
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: DEFAULT_STROKE_COLOR,
        }
    }
}

impl LineConfig {
    /// Clamps every field to a usable range.
    pub fn validate(&mut self) {
        self.tick_interval = self.tick_interval.max(MIN_PERIOD);
        self.blink_half_period = self.blink_half_period.max(MIN_PERIOD);
        self.growth_step = self.growth_step.max(1);

        let (lo, hi) = self.max_length_range;
        let lo = lo.max(0);
        let hi = hi.max(0);
        self.max_length_range = if lo <= hi { (lo, hi) } else { (hi, lo) };

        self.press_move_tolerance = self.press_move_tolerance.max(0.0);
        self.cancel_jump_distance = self.cancel_jump_distance.max(0.0);
        self.near_line_band = self.near_line_band.max(0);
        self.stroke_width = clamp(self.stroke_width, MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);

        let (r, g, b, a) = self.stroke_color;
        self.stroke_color = (
            clamp(r, 0.0, 1.0),
            clamp(g, 0.0, 1.0),
            clamp(b, 0.0, 1.0),
            clamp(a, 0.0, 1.0),
        );
    }
}

/// Settings of the blinking arrow overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowConfig {
    /// Cursor-follow ticker period.
    pub tick_interval: Duration,
    /// Time the arrow spends in each half of its blink cycle.
    pub blink_half_period: Duration,
    /// Offset of the window's top-left corner from the cursor.
    pub offset: (i32, i32),
    /// Window size; the icon is drawn at its top-left corner.
    pub window_size: Size,
    /// Where the arrow image is read from.
    pub icon_path: PathBuf,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            tick_interval: ARROW_TICK_INTERVAL,
            blink_half_period: ARROW_BLINK_HALF_PERIOD,
            offset: ARROW_OFFSET,
            window_size: Size::square(ARROW_WINDOW_SIZE),
            icon_path: PathBuf::from(ARROW_ICON_PATH),
        }
    }
}

impl ArrowConfig {
    /// Clamps every field to a usable range.
    pub fn validate(&mut self) {
        self.tick_interval = self.tick_interval.max(MIN_PERIOD);
        self.blink_half_period = self.blink_half_period.max(MIN_PERIOD);
        self.window_size = Size::new(
            self.window_size
                .width
                .clamp(MIN_ARROW_WINDOW_SIZE, MAX_ARROW_WINDOW_SIZE),
            self.window_size
                .height
                .clamp(MIN_ARROW_WINDOW_SIZE, MAX_ARROW_WINDOW_SIZE),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_defaults_match_constants() {
        let config = LineConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(30));
        assert_eq!(config.hold_threshold, Duration::from_millis(200));
        assert_eq!(config.blink_half_period, Duration::from_millis(450));
        assert_eq!(config.growth_step, 15);
        assert_eq!(config.max_length_range, (250, 500));
        assert_eq!(config.near_line_band, 20);
    }

    #[test]
    fn blink_half_period_is_fifteen_ticks() {
        let config = LineConfig::default();
        assert_eq!(config.blink_half_period, config.tick_interval * 15);
    }

    #[test]
    fn line_validate_keeps_defaults() {
        let mut config = LineConfig::default();
        config.validate();
        assert_eq!(config, LineConfig::default());
    }

    #[test]
    fn line_validate_orders_length_range() {
        let mut config = LineConfig {
            max_length_range: (500, 250),
            ..LineConfig::default()
        };
        config.validate();
        assert_eq!(config.max_length_range, (250, 500));
    }

    #[test]
    fn line_validate_clamps_stroke() {
        let mut config = LineConfig {
            stroke_width: 0.0,
            stroke_color: (1.5, -0.2, 0.5, 2.0),
            growth_step: 0,
            tick_interval: Duration::ZERO,
            ..LineConfig::default()
        };
        config.validate();
        assert_eq!(config.stroke_width, MIN_STROKE_WIDTH);
        assert_eq!(config.stroke_color, (1.0, 0.0, 0.5, 1.0));
        assert_eq!(config.growth_step, 1);
        assert_eq!(config.tick_interval, MIN_PERIOD);
    }

    #[test]
    fn arrow_defaults_match_constants() {
        let config = ArrowConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(10));
        assert_eq!(config.blink_half_period, Duration::from_millis(500));
        assert_eq!(config.offset, (10, -80));
        assert_eq!(config.window_size, Size::square(80));
        assert_eq!(config.icon_path, PathBuf::from("arrow.png"));
    }

    #[test]
    fn arrow_validate_clamps_window_size() {
        let mut config = ArrowConfig {
            window_size: Size::new(0, 10_000),
            ..ArrowConfig::default()
        };
        config.validate();
        assert_eq!(
            config.window_size,
            Size::new(MIN_ARROW_WINDOW_SIZE, MAX_ARROW_WINDOW_SIZE)
        );
    }
}
