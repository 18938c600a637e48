//! Press/hold/drag/blink state machine of the line overlay.
//!
//! ```text
//!                 press (fresh)                tick, held >= threshold
//!   Idle ───────────────────────▶ BelowThreshold ─────────────────▶ Drawing
//!    ▲                               │   move > tolerance: sticky      │ tick: grow
//!    │ release before threshold      │   "moved" flag                  │ move: anchor follows
//!    │ or after moving  ◀────────────┘                                 │
//!    │                                                                 │ release
//!    │ jump > cancel distance                                          ▼
//!    └──────────────────────────────────────────────────────── ReleasedBlinking
//!                                                      press on line │  ▲ release
//!                                                                    ▼  │
//!                                                             DraggingBlinkingLine
//! ```
//!
//! Time-based transitions compare monotonic instants against deadlines
//! rather than counting ticks, so a late tick cannot stretch a period.

use std::time::{Duration, Instant};

use rand::Rng;

use super::config::LineConfig;
use super::geometry::{LineSegment, Point};

/// Which part of a gesture the overlay is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No gesture; window hidden.
    Idle,
    /// Button down, hold threshold not reached yet.
    PressingBelowThreshold,
    /// Button held long enough without moving; the line grows.
    PressingDrawing,
    /// Button released after a valid hold; the line blinks in place.
    ReleasedBlinking,
    /// A press landed on the blinking line and is moving it.
    DraggingBlinkingLine,
}

impl Phase {
    /// Short lowercase name for log output.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::PressingBelowThreshold => "pressing",
            Phase::PressingDrawing => "drawing",
            Phase::ReleasedBlinking => "blinking",
            Phase::DraggingBlinkingLine => "dragging",
        }
    }
}

/// Visibility change a transition asks the window layer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Show,
    Hide,
}

/// Complete state of the current line gesture.
#[derive(Debug, Clone)]
pub struct GestureState {
    phase: Phase,
    anchor: Point,
    press_position: Point,
    last_position: Point,
    line_length: i32,
    max_line_length: i32,
    moved_during_press: bool,
    line_visible: bool,
    press_started: Option<Instant>,
    /// Next blink toggle while `ReleasedBlinking`.
    next_blink: Option<Instant>,
    /// Time left to the next toggle, frozen while dragging.
    blink_remaining: Option<Duration>,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            anchor: Point::default(),
            press_position: Point::default(),
            last_position: Point::default(),
            line_length: 0,
            max_line_length: 0,
            moved_during_press: false,
            line_visible: true,
            press_started: None,
            next_blink: None,
            blink_remaining: None,
        }
    }
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    // === Queries ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Centre of the drawn line.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn press_position(&self) -> Point {
        self.press_position
    }

    pub fn last_position(&self) -> Point {
        self.last_position
    }

    pub fn line_length(&self) -> i32 {
        self.line_length
    }

    pub fn max_line_length(&self) -> i32 {
        self.max_line_length
    }

    pub fn press_started(&self) -> Option<Instant> {
        self.press_started
    }

    pub fn moved_during_press(&self) -> bool {
        self.moved_during_press
    }

    /// Whether the released line is in the visible half of its blink cycle.
    pub fn line_visible(&self) -> bool {
        self.line_visible
    }

    pub fn is_pressed(&self) -> bool {
        matches!(
            self.phase,
            Phase::PressingBelowThreshold | Phase::PressingDrawing | Phase::DraggingBlinkingLine
        )
    }

    pub fn held_long_enough(&self) -> bool {
        self.phase == Phase::PressingDrawing
    }

    pub fn after_release(&self) -> bool {
        matches!(
            self.phase,
            Phase::ReleasedBlinking | Phase::DraggingBlinkingLine
        )
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::DraggingBlinkingLine
    }

    /// A released line keeps its blink state while it is dragged.
    pub fn is_blinking(&self) -> bool {
        self.after_release()
    }

    /// Whether the overlay window should currently be on screen.
    pub fn window_visible(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether `point` lies on the band around the current line.
    ///
    /// The band reaches `near_line_band` pixels (exclusive) above and below
    /// the anchor and spans the line's horizontal extent (inclusive).
    pub fn is_near_line(&self, point: Point, config: &LineConfig) -> bool {
        let half = self.line_length / 2;
        (point.y - self.anchor.y).abs() < config.near_line_band
            && point.x >= self.anchor.x - half
            && point.x <= self.anchor.x + half
    }

    /// The segment to draw, or `None` when nothing should be on screen.
    pub fn visible_segment(&self) -> Option<LineSegment> {
        let draw = match self.phase {
            Phase::Idle | Phase::PressingBelowThreshold => false,
            Phase::PressingDrawing => !self.moved_during_press,
            Phase::ReleasedBlinking => self.line_visible,
            Phase::DraggingBlinkingLine => true,
        };
        draw.then(|| LineSegment::horizontal(self.anchor, self.line_length))
    }

    // === Transitions ===

    /// A mouse button went down at `position`.
    pub fn press<R: Rng + ?Sized>(
        &mut self,
        at: Instant,
        position: Point,
        config: &LineConfig,
        rng: &mut R,
    ) -> Option<WindowCommand> {
        match self.phase {
            Phase::ReleasedBlinking if self.is_near_line(position, config) => {
                self.blink_remaining = self
                    .next_blink
                    .take()
                    .map(|deadline| deadline.saturating_duration_since(at));
                self.set_phase(Phase::DraggingBlinkingLine);
                None
            }
            // Second button while dragging: the line is already in hand.
            Phase::DraggingBlinkingLine => None,
            _ => {
                let (lo, hi) = config.max_length_range;
                *self = GestureState {
                    phase: self.phase,
                    anchor: position,
                    press_position: position,
                    last_position: position,
                    line_length: 0,
                    max_line_length: rng.gen_range(lo..=hi),
                    moved_during_press: false,
                    line_visible: true,
                    press_started: Some(at),
                    next_blink: None,
                    blink_remaining: None,
                };
                self.set_phase(Phase::PressingBelowThreshold);
                log::debug!(
                    "press at ({}, {}), max length {}",
                    position.x,
                    position.y,
                    self.max_line_length
                );
                Some(WindowCommand::Show)
            }
        }
    }

    /// A mouse button went up.
    pub fn release(&mut self, at: Instant, config: &LineConfig) -> Option<WindowCommand> {
        match self.phase {
            Phase::DraggingBlinkingLine => {
                let remaining = self
                    .blink_remaining
                    .take()
                    .unwrap_or(config.blink_half_period);
                self.next_blink = Some(at + remaining);
                self.set_phase(Phase::ReleasedBlinking);
                None
            }
            Phase::PressingDrawing if !self.moved_during_press => {
                self.line_visible = true;
                self.next_blink = Some(at + config.blink_half_period);
                self.press_started = None;
                self.set_phase(Phase::ReleasedBlinking);
                None
            }
            Phase::PressingDrawing | Phase::PressingBelowThreshold => {
                self.discard();
                Some(WindowCommand::Hide)
            }
            Phase::Idle | Phase::ReleasedBlinking => None,
        }
    }

    /// The cursor moved to `position`.
    pub fn on_move(&mut self, position: Point, config: &LineConfig) -> Option<WindowCommand> {
        match self.phase {
            Phase::Idle => return None,
            Phase::PressingBelowThreshold => {
                if !self.moved_during_press
                    && position.distance_to(self.press_position) > config.press_move_tolerance
                {
                    self.moved_during_press = true;
                    log::debug!("moved during press; gesture will not draw");
                }
            }
            Phase::PressingDrawing | Phase::DraggingBlinkingLine => {
                self.anchor = position;
            }
            Phase::ReleasedBlinking => {
                if !self.is_near_line(position, config)
                    && position.distance_to(self.last_position) > config.cancel_jump_distance
                {
                    self.discard();
                    return Some(WindowCommand::Hide);
                }
            }
        }
        self.last_position = position;
        None
    }

    /// Crosses a hold threshold that expired at or before `at`.
    ///
    /// Called with each event's timestamp before the event is applied, so a
    /// late tick cannot turn a long still hold into a click.
    pub fn advance_to(&mut self, at: Instant, config: &LineConfig) {
        if self.phase != Phase::PressingBelowThreshold || self.moved_during_press {
            return;
        }
        let held = self
            .press_started
            .is_some_and(|start| at.saturating_duration_since(start) >= config.hold_threshold);
        if held {
            self.set_phase(Phase::PressingDrawing);
            self.grow(config);
        }
    }

    /// Advances time-based state to `now`.
    pub fn tick(&mut self, now: Instant, config: &LineConfig) {
        match self.phase {
            Phase::PressingBelowThreshold => self.advance_to(now, config),
            Phase::PressingDrawing => self.grow(config),
            Phase::ReleasedBlinking => {
                if let Some(deadline) = self.next_blink {
                    if now >= deadline {
                        self.line_visible = !self.line_visible;
                        let mut next = deadline + config.blink_half_period;
                        if next <= now {
                            // A stalled ticker skips the missed toggles.
                            next = now + config.blink_half_period;
                        }
                        self.next_blink = Some(next);
                    }
                }
            }
            Phase::Idle | Phase::DraggingBlinkingLine => {}
        }
    }

    fn grow(&mut self, config: &LineConfig) {
        self.line_length = (self.line_length + config.growth_step).min(self.max_line_length);
    }

    fn discard(&mut self) {
        self.press_started = None;
        self.next_blink = None;
        self.blink_remaining = None;
        self.set_phase(Phase::Idle);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("gesture {} -> {}", self.phase.label(), phase.label());
            self.phase = phase;
        }
    }
}
