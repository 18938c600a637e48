//! Timing, geometry and colour constants.
//!
//! These are the defaults behind [`LineConfig`](super::LineConfig) and
//! [`ArrowConfig`](super::ArrowConfig), plus the limits `validate()` clamps to.

use std::time::Duration;

// === Line overlay: timing ===

/// Line overlay tick period.
pub const LINE_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Minimum press duration before a line starts drawing.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(200);

/// Half of the blink cycle of a released line (15 ticks of 30ms).
pub const LINE_BLINK_HALF_PERIOD: Duration = Duration::from_millis(450);

// === Line overlay: geometry ===

/// Growth of the line per tick while the button is held, in pixels.
pub const LINE_GROWTH_STEP: i32 = 15;

/// Lower bound of the per-gesture maximum line length.
pub const MIN_MAX_LINE_LENGTH: i32 = 250;

/// Upper bound of the per-gesture maximum line length.
pub const MAX_MAX_LINE_LENGTH: i32 = 500;

/// Movement from the press point (px) that invalidates a gesture.
pub const PRESS_MOVE_TOLERANCE: f64 = 5.0;

/// Jump between two moves (px) that cancels a blinking line.
pub const CANCEL_JUMP_DISTANCE: f64 = 20.0;

/// Vertical half-height of the band around a line that counts as "on" it.
pub const NEAR_LINE_BAND: i32 = 20;

// === Line overlay: appearance ===

/// Stroke width of the line in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Stroke colour (R, G, B, A) - opaque red.
pub const DEFAULT_STROKE_COLOR: (f64, f64, f64, f64) = (1.0, 0.0, 0.0, 1.0);

// === Arrow overlay ===

/// Cursor-follow tick period.
pub const ARROW_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Half of the arrow blink cycle.
pub const ARROW_BLINK_HALF_PERIOD: Duration = Duration::from_millis(500);

/// Offset of the arrow window's top-left corner from the cursor.
pub const ARROW_OFFSET: (i32, i32) = (10, -80);

/// Side of the square arrow window in pixels.
pub const ARROW_WINDOW_SIZE: i32 = 80;

/// Icon file looked up relative to the working directory.
pub const ARROW_ICON_PATH: &str = "arrow.png";

/// Vertices of the placeholder arrow drawn when the icon cannot be loaded.
pub const PLACEHOLDER_ARROW: [(i32, i32); 3] = [(60, 60), (20, 60), (0, 20)];

/// Fill of the placeholder arrow (R, G, B, A) as bytes.
pub const PLACEHOLDER_COLOR: [u8; 4] = [255, 0, 0, 255];

// === Validation Limits ===

/// Shortest tick or blink period accepted by `validate()`.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Minimum stroke width in pixels.
pub const MIN_STROKE_WIDTH: f64 = 1.0;

/// Maximum stroke width in pixels.
pub const MAX_STROKE_WIDTH: f64 = 40.0;

/// Smallest arrow window side in pixels.
pub const MIN_ARROW_WINDOW_SIZE: i32 = 8;

/// Largest arrow window side in pixels.
pub const MAX_ARROW_WINDOW_SIZE: i32 = 512;
