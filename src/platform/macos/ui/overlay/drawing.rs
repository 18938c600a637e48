//! Drawing functions for the overlay view.
//!
//! Called from `drawRect:` on a flipped view, so coordinates are top-left
//! based like the rest of the crate.

use crate::error::{OverlayError, Result};
use crate::model::{ArrowIcon, Point};
use crate::overlay::LineStroke;
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, NSPoint, NSRect, NSSize, NSString, NO, YES,
};
use crate::platform::macos::ffi::cocoa::{
    NSRectFillUsingOperation, COMPOSITE_COPY, COMPOSITE_SOURCE_OVER,
};

/// `NSLineCapStyleRound`.
const ROUND_LINE_CAP: usize = 1;

/// Erase `rect` to fully transparent.
///
/// # Safety
///
/// Must be called from the main thread within a valid drawing context.
pub unsafe fn clear(rect: NSRect) {
    let Ok(ns_color) = get_class(c"NSColor") else {
        return;
    };
    let clear: id = msg_send![ns_color, clearColor];
    let _: () = msg_send![clear, set];
    NSRectFillUsingOperation(rect, COMPOSITE_COPY);
}

/// Stroke a line whose segment is given relative to `origin`.
///
/// # Safety
///
/// Must be called from the main thread within a valid drawing context.
pub unsafe fn draw_line_stroke(stroke: &LineStroke, origin: Point) {
    let (Ok(ns_color), Ok(ns_bezier)) = (get_class(c"NSColor"), get_class(c"NSBezierPath")) else {
        return;
    };

    let segment = stroke.segment.relative_to(origin);
    let (r, g, b, a) = stroke.color;

    let path: id = msg_send![ns_bezier, bezierPath];
    let start = NSPoint::new(f64::from(segment.start.x), f64::from(segment.start.y));
    let end = NSPoint::new(f64::from(segment.end.x), f64::from(segment.end.y));
    let _: () = msg_send![path, moveToPoint: start];
    let _: () = msg_send![path, lineToPoint: end];
    let _: () = msg_send![path, setLineWidth: stroke.width];
    let _: () = msg_send![path, setLineCapStyle: ROUND_LINE_CAP];

    let color: id = msg_send![
        ns_color,
        colorWithCalibratedRed: r,
        green: g,
        blue: b,
        alpha: a
    ];
    let _: () = msg_send![color, set];
    let _: () = msg_send![path, stroke];
}

/// Build a retained `NSImage` holding `icon`'s pixels.
///
/// # Safety
///
/// Must be called from the main thread.
pub unsafe fn icon_image(icon: &ArrowIcon) -> Result<id> {
    let rep_class = get_class(c"NSBitmapImageRep")?;
    let image_class = get_class(c"NSImage")?;

    let width = icon.width() as isize;
    let height = icon.height() as isize;
    let color_space = NSString::from_str("NSDeviceRGBColorSpace");

    // Null planes: the rep allocates its own buffer.
    let rep: id = msg_send![rep_class, alloc];
    let rep: id = msg_send![
        rep,
        initWithBitmapDataPlanes: std::ptr::null_mut::<*mut u8>(),
        pixelsWide: width,
        pixelsHigh: height,
        bitsPerSample: 8isize,
        samplesPerPixel: 4isize,
        hasAlpha: YES,
        isPlanar: NO,
        colorSpaceName: &*color_space,
        bitmapFormat: 0usize,
        bytesPerRow: width * 4,
        bitsPerPixel: 32isize
    ];
    if rep == nil {
        return Err(OverlayError::WindowCreation(
            "NSBitmapImageRep for arrow icon".into(),
        ));
    }

    let data: *mut u8 = msg_send![rep, bitmapData];
    if data.is_null() {
        let _: () = msg_send![rep, release];
        return Err(OverlayError::WindowCreation(
            "arrow icon bitmap has no storage".into(),
        ));
    }
    // Premultiplied RGBA with alpha last is the rep's native layout here.
    let pixels = icon.pixels();
    std::ptr::copy_nonoverlapping(pixels.as_ptr(), data, pixels.len());

    let size = NSSize::new(f64::from(icon.width()), f64::from(icon.height()));
    let image: id = msg_send![image_class, alloc];
    let image: id = msg_send![image, initWithSize: size];
    let _: () = msg_send![image, addRepresentation: rep];
    let _: () = msg_send![rep, release];

    Ok(image)
}

/// Draw a cached icon image at the view's top-left corner.
///
/// # Safety
///
/// Must be called from the main thread within a valid drawing context.
pub unsafe fn draw_icon_image(image: id, icon: &ArrowIcon) {
    let dest = NSRect::new(
        NSPoint::new(0.0, 0.0),
        NSSize::new(f64::from(icon.width()), f64::from(icon.height())),
    );
    let _: () = msg_send![
        image,
        drawInRect: dest,
        fromRect: NSRect::ZERO,
        operation: COMPOSITE_SOURCE_OVER,
        fraction: 1.0f64,
        respectFlipped: YES,
        hints: nil
    ];
}
