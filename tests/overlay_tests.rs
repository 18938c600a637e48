//! End-to-end tests driving both controllers through the tick dispatcher,
//! the way a backend timer does.

use std::time::{Duration, Instant};

use pointer_marks::handlers::run_tick;
use pointer_marks::model::{ArrowIcon, LineSegment, Phase, Size, WindowCommand};
use pointer_marks::overlay::LineStroke;
use pointer_marks::{
    ArrowConfig, ArrowOverlay, InputEvent, LineConfig, LineOverlay, MouseButton, OverlayController,
    OverlayEvent, Placement, Point, Scene,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const NO_EVENTS: [OverlayEvent; 0] = [];

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn press(x: i32, y: i32, at: Instant) -> OverlayEvent {
    OverlayEvent::Mouse(InputEvent::press(MouseButton::Left, Point::new(x, y), at))
}

fn release(x: i32, y: i32, at: Instant) -> OverlayEvent {
    OverlayEvent::Mouse(InputEvent::release(MouseButton::Left, Point::new(x, y), at))
}

fn moved(x: i32, y: i32, at: Instant) -> OverlayEvent {
    OverlayEvent::Mouse(InputEvent::moved(Point::new(x, y), at))
}

fn line_overlay(max: i32) -> LineOverlay {
    let config = LineConfig {
        max_length_range: (max, max),
        ..LineConfig::default()
    };
    LineOverlay::with_rng(config, StdRng::seed_from_u64(1))
}

fn arrow_overlay() -> ArrowOverlay {
    let config = ArrowConfig::default();
    let icon = ArrowIcon::placeholder(config.window_size);
    ArrowOverlay::with_icon(config, icon)
}

fn line_of(scene: Scene<'_>) -> Option<LineSegment> {
    match scene {
        Scene::Line(LineStroke { segment, .. }) => Some(segment),
        _ => None,
    }
}

// === drawline ===

#[test]
fn line_full_session() {
    let mut line = line_overlay(60);
    let cursor = Point::new(0, 0);
    let t0 = Instant::now();

    let out = run_tick([press(100, 100, t0)], &mut line, t0 + ms(10), cursor);
    assert_eq!(out.window, Some(WindowCommand::Show));
    assert!(line.scene().is_empty());

    // Hold until the line has grown to its maximum.
    let mut now = t0 + ms(10);
    while now < t0 + ms(400) {
        now += ms(30);
        let out = run_tick(NO_EVENTS, &mut line, now, cursor);
        assert_eq!(out.window, None);
    }
    assert_eq!(line.gesture().line_length(), 60);
    assert_eq!(
        line_of(line.scene()),
        Some(LineSegment::horizontal(Point::new(100, 100), 60))
    );

    let out = run_tick([release(100, 100, now)], &mut line, now, cursor);
    assert_eq!(out.window, None);
    assert_eq!(line.gesture().phase(), Phase::ReleasedBlinking);

    // Grab the line and carry it elsewhere.
    let out = run_tick(
        [
            press(110, 105, now + ms(30)),
            moved(300, 250, now + ms(40)),
            release(300, 250, now + ms(50)),
        ],
        &mut line,
        now + ms(60),
        cursor,
    );
    assert_eq!(out.window, None);
    assert_eq!(line.gesture().phase(), Phase::ReleasedBlinking);
    assert_eq!(line.gesture().anchor(), Point::new(300, 250));

    // A big jump away from the line ends the session.
    let out = run_tick(
        [moved(300, 280, now + ms(70))],
        &mut line,
        now + ms(90),
        cursor,
    );
    assert_eq!(out.window, Some(WindowCommand::Hide));
    assert_eq!(line.gesture().phase(), Phase::Idle);
    assert!(line.scene().is_empty());
}

#[test]
fn line_stroke_is_red_and_five_pixels_wide() {
    let mut line = line_overlay(60);
    let t0 = Instant::now();
    run_tick([press(100, 50, t0)], &mut line, t0 + ms(210), Point::new(0, 0));

    match line.scene() {
        Scene::Line(stroke) => {
            assert_eq!(stroke.width, 5.0);
            assert_eq!(stroke.color, (1.0, 0.0, 0.0, 1.0));
        }
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn line_covers_the_screen() {
    let line = line_overlay(60);
    let screen = Size::new(1920, 1080);

    assert_eq!(line.placement(), Placement::FullScreen);
    assert_eq!(line.placement().rect(screen), (Point::new(0, 0), screen));
    assert_eq!(line.tick_interval(), ms(30));
    assert_eq!(line.name(), "drawline");
}

#[test]
fn line_ignores_polled_cursor() {
    let mut line = line_overlay(60);
    let t0 = Instant::now();
    run_tick([press(100, 50, t0)], &mut line, t0 + ms(210), Point::new(900, 900));

    assert_eq!(line.gesture().anchor(), Point::new(100, 50));
}

#[test]
fn click_and_release_in_one_batch_ends_hidden() {
    let mut line = line_overlay(60);
    let t0 = Instant::now();

    let out = run_tick(
        [press(10, 10, t0), release(10, 10, t0 + ms(5))],
        &mut line,
        t0 + ms(30),
        Point::new(0, 0),
    );

    assert_eq!(out.window, Some(WindowCommand::Hide));
    assert_eq!(line.gesture().phase(), Phase::Idle);
}

#[test]
fn long_hold_released_before_a_late_tick_still_blinks() {
    let mut line = line_overlay(60);
    let t0 = Instant::now();

    // The ticker stalled: press and release arrive in the same batch.
    let out = run_tick(
        [press(100, 100, t0), release(100, 100, t0 + ms(300))],
        &mut line,
        t0 + ms(310),
        Point::new(0, 0),
    );

    assert_eq!(out.window, Some(WindowCommand::Show));
    assert_eq!(line.gesture().phase(), Phase::ReleasedBlinking);
    assert_eq!(line.gesture().line_length(), 15);
    assert_eq!(
        line_of(line.scene()),
        Some(LineSegment::horizontal(Point::new(100, 100), 15))
    );
}

#[test]
fn move_after_threshold_in_a_late_batch_moves_the_anchor() {
    let mut line = line_overlay(60);
    let t0 = Instant::now();

    run_tick(
        [
            press(100, 100, t0),
            moved(140, 100, t0 + ms(250)),
            release(140, 100, t0 + ms(260)),
        ],
        &mut line,
        t0 + ms(270),
        Point::new(0, 0),
    );

    assert!(!line.gesture().moved_during_press());
    assert_eq!(line.gesture().phase(), Phase::ReleasedBlinking);
    assert_eq!(line.gesture().anchor(), Point::new(140, 100));
}

#[test]
fn move_before_threshold_in_a_late_batch_still_cancels() {
    let mut line = line_overlay(60);
    let t0 = Instant::now();

    let out = run_tick(
        [
            press(100, 100, t0),
            moved(140, 100, t0 + ms(150)),
            release(140, 100, t0 + ms(400)),
        ],
        &mut line,
        t0 + ms(410),
        Point::new(0, 0),
    );

    assert_eq!(out.window, Some(WindowCommand::Hide));
    assert_eq!(line.gesture().phase(), Phase::Idle);
}

#[test]
fn escape_quits_line_overlay() {
    let mut line = line_overlay(60);
    let t0 = Instant::now();

    let out = run_tick(
        [press(10, 10, t0), OverlayEvent::Quit],
        &mut line,
        t0,
        Point::new(0, 0),
    );

    assert!(out.quit);
    assert_eq!(out.window, Some(WindowCommand::Show));
}

// === mouse-arrow ===

#[test]
fn arrow_full_session() {
    let mut arrow = arrow_overlay();
    let t0 = Instant::now();

    let out = run_tick(NO_EVENTS, &mut arrow, t0, Point::new(50, 200));
    assert_eq!(out.window, None);
    assert!(arrow.scene().is_empty());

    let out = run_tick([press(50, 200, t0)], &mut arrow, t0 + ms(10), Point::new(50, 200));
    assert_eq!(out.window, Some(WindowCommand::Show));
    assert!(matches!(arrow.scene(), Scene::Icon(_)));

    // Blinks while held.
    run_tick(NO_EVENTS, &mut arrow, t0 + ms(500), Point::new(60, 210));
    assert!(arrow.scene().is_empty());
    run_tick(NO_EVENTS, &mut arrow, t0 + ms(1000), Point::new(70, 220));
    assert!(matches!(arrow.scene(), Scene::Icon(_)));

    let out = run_tick(
        [release(70, 220, t0 + ms(1010))],
        &mut arrow,
        t0 + ms(1020),
        Point::new(70, 220),
    );
    assert_eq!(out.window, Some(WindowCommand::Hide));
    assert!(arrow.scene().is_empty());
}

#[test]
fn arrow_window_tracks_polled_cursor() {
    let mut arrow = arrow_overlay();
    let t0 = Instant::now();

    run_tick([press(0, 0, t0)], &mut arrow, t0, Point::new(300, 200));

    assert_eq!(
        arrow.placement(),
        Placement::FollowCursor {
            origin: Point::new(310, 120),
            size: Size::square(80),
        }
    );
    assert_eq!(
        arrow.placement().rect(Size::new(1920, 1080)),
        (Point::new(310, 120), Size::square(80))
    );
}

#[test]
fn arrow_reacts_to_every_button() {
    let mut arrow = arrow_overlay();
    let t0 = Instant::now();
    let right = OverlayEvent::Mouse(InputEvent::press(MouseButton::Right, Point::new(1, 1), t0));

    let out = run_tick([right], &mut arrow, t0, Point::new(1, 1));

    assert_eq!(out.window, Some(WindowCommand::Show));
    assert!(arrow.state().is_pressed());
}

#[test]
fn arrow_timings() {
    let arrow = arrow_overlay();
    assert_eq!(arrow.tick_interval(), ms(10));
    assert_eq!(arrow.name(), "mouse-arrow");
}
