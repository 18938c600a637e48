//! Small AppKit utilities: window level, pointer position, rect fills.

use objc2_app_kit::NSEvent;

use super::bridge::NSRect;
use crate::model::{Point, Size};

/// `NSCompositingOperationCopy`.
pub const COMPOSITE_COPY: usize = 1;

/// `NSCompositingOperationSourceOver`.
pub const COMPOSITE_SOURCE_OVER: usize = 2;

#[link(name = "AppKit", kind = "framework")]
extern "C" {
    pub fn NSRectFillUsingOperation(rect: NSRect, op: usize);
}

/// `NSPopUpMenuWindowLevel`, above context menus and the Dock.
pub const POP_UP_MENU_WINDOW_LEVEL: isize = 101;

/// Window level for overlays, above pop-up menus and the status bar.
pub const OVERLAY_WINDOW_LEVEL: isize = POP_UP_MENU_WINDOW_LEVEL + 101;

/// Cocoa y (bottom-left origin) to top-left screen y, or back.
pub fn flip_y(y: f64, screen_height: f64) -> f64 {
    screen_height - y
}

/// Global pointer position in top-left screen coordinates.
pub fn mouse_position(screen_height: f64) -> Point {
    let p = NSEvent::mouseLocation();
    Point::new(p.x.round() as i32, flip_y(p.y, screen_height).round() as i32)
}

/// Cocoa frame origin of a window whose top-left corner is `origin`.
pub fn cocoa_origin(origin: Point, size: Size, screen_height: f64) -> (f64, f64) {
    (
        f64::from(origin.x),
        flip_y(f64::from(origin.y), screen_height) - f64::from(size.height),
    )
}
