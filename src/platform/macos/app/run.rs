//! macOS entry point and the overlay timer.

use std::time::Instant;

use objc2::rc::autoreleasepool;

use crate::error::{OverlayError, Result};
use crate::events;
use crate::handlers::run_tick;
use crate::model::{Point, Size, WindowCommand};
use crate::overlay::{OverlayController, Placement};
use crate::platform::macos::app::state::STATE;
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, sel, NSApp, NSPoint, NSRect, NSSize, NSString, NO, YES,
};
use crate::platform::macos::ffi::{
    cocoa_origin, ensure_accessibility_prompt, mouse_position, OVERLAY_WINDOW_LEVEL,
};
use crate::platform::macos::input::{
    install_escape_monitor, install_mouse_monitors, remove_monitors,
};
use crate::platform::macos::ui::create_view;

/// NSApplicationActivationPolicyAccessory
const ACTIVATION_POLICY_ACCESSORY: isize = 1;

/// NSEventTypeApplicationDefined
const APPLICATION_DEFINED_EVENT: usize = 15;

/// Runs `controller` until Escape is pressed.
pub fn run(controller: Box<dyn OverlayController>) -> Result<()> {
    autoreleasepool(|_| unsafe { run_app(controller) })
}

unsafe fn run_app(controller: Box<dyn OverlayController>) -> Result<()> {
    let name = controller.name();
    let interval = controller.tick_interval().as_secs_f64();

    if !ensure_accessibility_prompt() {
        log::warn!(
            "{name}: Accessibility access not granted; global mouse and key events \
             will not arrive until it is"
        );
    }

    let app = NSApp();
    let _: bool = msg_send![app, setActivationPolicy: ACTIVATION_POLICY_ACCESSORY];

    let screens: id = msg_send![get_class(c"NSScreen")?, screens];
    let count: usize = msg_send![screens, count];
    if count == 0 {
        return Err(OverlayError::WindowCreation("no screens available".into()));
    }
    // The first screen holds the menu bar and the coordinate origin.
    let primary: id = msg_send![screens, objectAtIndex: 0usize];
    let primary_frame: NSRect = msg_send![primary, frame];
    let screen_height = primary_frame.size.height;
    let screen = Size::new(
        primary_frame.size.width.round() as i32,
        screen_height.round() as i32,
    );

    let (origin, size) = controller.placement().rect(screen);
    let window = make_overlay_window(origin, size, screen_height)?;
    let view = create_view(window, size)?;

    STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.window = window;
        state.view = view;
        state.screen = screen;
        state.screen_height = screen_height;
        state.shown = false;
        state.controller = Some(controller);
    });

    events::init_event_bus()?;
    let monitors = vec![
        install_mouse_monitors(screen_height)?,
        install_escape_monitor()?,
    ];
    STATE.with(|s| s.borrow_mut().monitors = monitors);

    let timer = create_timer(view, interval)?;
    STATE.with(|s| s.borrow_mut().timer = timer);

    log::info!(
        "{name}: overlay running ({}x{} screen, {:.0} ms tick); press Esc to quit",
        screen.width,
        screen.height,
        interval * 1000.0
    );

    let _: () = msg_send![app, run];

    let (timer, monitors, window, icon_image) = STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.controller = None;
        (
            state.timer,
            std::mem::take(&mut state.monitors),
            state.window,
            state.icon_image,
        )
    });
    let _: () = msg_send![timer, invalidate];
    remove_monitors(&monitors);
    let _: () = msg_send![window, orderOut: nil];
    let _: () = msg_send![window, release];
    if icon_image != nil {
        let _: () = msg_send![icon_image, release];
    }

    log::info!("{name}: overlay closed");
    Ok(())
}

/// Create a transparent, click-through overlay window, initially hidden.
///
/// # Safety
/// Must be called from the main thread.
unsafe fn make_overlay_window(origin: Point, size: Size, screen_height: f64) -> Result<id> {
    let (x, y) = cocoa_origin(origin, size, screen_height);
    let frame = NSRect::new(
        NSPoint::new(x, y),
        NSSize::new(f64::from(size.width), f64::from(size.height)),
    );

    // NSBorderlessWindowMask = 0
    let style_mask: usize = 0;
    // NSBackingStoreBuffered = 2
    let backing: usize = 2;

    let window: id = msg_send![get_class(c"NSWindow")?, alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: frame,
        styleMask: style_mask,
        backing: backing,
        defer: NO
    ];
    if window == nil {
        return Err(OverlayError::WindowCreation("NSWindow init".into()));
    }

    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setOpaque: NO];
    let _: () = msg_send![window, setHasShadow: NO];

    let clear_color: id = msg_send![get_class(c"NSColor")?, clearColor];
    let _: () = msg_send![window, setBackgroundColor: clear_color];

    let _: () = msg_send![window, setIgnoresMouseEvents: YES];
    let _: () = msg_send![window, setLevel: OVERLAY_WINDOW_LEVEL];

    // CanJoinAllSpaces | Stationary | FullScreenAuxiliary
    let collection_behavior: usize = 1 | 16 | 256;
    let _: () = msg_send![window, setCollectionBehavior: collection_behavior];

    Ok(window)
}

/// Create an AppKit timer that fires even during modal menus.
///
/// # Safety
/// The target must be a valid PointerMarksView.
unsafe fn create_timer(target: id, interval: f64) -> Result<id> {
    let timer: id = msg_send![
        get_class(c"NSTimer")?,
        timerWithTimeInterval: interval,
        target: target,
        selector: sel!(overlayTick),
        userInfo: nil,
        repeats: YES
    ];
    if timer == nil {
        return Err(OverlayError::WindowCreation("NSTimer".into()));
    }
    // Add to run loop with CommonModes (keeps running during menus)
    let run_loop: id = msg_send![get_class(c"NSRunLoop")?, currentRunLoop];
    let common_modes = NSString::from_str("kCFRunLoopCommonModes");
    let _: () = msg_send![run_loop, addTimer: timer, forMode: &*common_modes];
    Ok(timer)
}

/// One timer tick: dispatch queued input, advance timers, redraw.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn on_timer() {
    let queued = events::drain_events();
    let now = Instant::now();

    let ticked = STATE.with(|s| {
        let Ok(mut guard) = s.try_borrow_mut() else {
            return None;
        };
        let state = &mut *guard;
        let cursor = mouse_position(state.screen_height);
        let shown = state.shown;
        let controller = state.controller.as_mut()?;
        let outcome = run_tick(queued, controller.as_mut(), now, cursor);
        Some((outcome, shown, controller.placement(), state.window, state.view, state.screen_height))
    });
    let Some((outcome, shown, placement, window, view, screen_height)) = ticked else {
        return;
    };

    if outcome.quit {
        request_stop();
        return;
    }

    let show_next = match outcome.window {
        Some(WindowCommand::Show) => true,
        Some(WindowCommand::Hide) => false,
        None => shown,
    };

    if show_next {
        if let Placement::FollowCursor { origin, size } = placement {
            let (x, y) = cocoa_origin(origin, size, screen_height);
            let _: () = msg_send![window, setFrameOrigin: NSPoint::new(x, y)];
        }
        let _: () = msg_send![view, setNeedsDisplay: YES];
    }

    if show_next != shown {
        if show_next {
            let _: () = msg_send![window, orderFrontRegardless];
        } else {
            let _: () = msg_send![window, orderOut: nil];
        }
        STATE.with(|s| s.borrow_mut().shown = show_next);
        log::debug!("overlay window {}", if show_next { "shown" } else { "hidden" });
    }
}

/// Stop `[NSApp run]`; a dummy event wakes the loop so it notices.
unsafe fn request_stop() {
    let app = NSApp();
    let _: () = msg_send![app, stop: nil];

    let Ok(ns_event) = get_class(c"NSEvent") else {
        return;
    };
    let event: id = msg_send![
        ns_event,
        otherEventWithType: APPLICATION_DEFINED_EVENT,
        location: NSPoint::new(0.0, 0.0),
        modifierFlags: 0usize,
        timestamp: 0.0f64,
        windowNumber: 0isize,
        context: nil,
        subtype: 0i16,
        data1: 0isize,
        data2: 0isize
    ];
    if event != nil {
        let _: () = msg_send![app, postEvent: event, atStart: YES];
    }
}
