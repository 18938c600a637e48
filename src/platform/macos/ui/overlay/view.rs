//! PointerMarksView class for the overlay.
//!
//! An NSView subclass that paints the active controller's scene and hosts
//! the overlay timer.

use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
use objc2::sel;

use crate::error::{OverlayError, Result};
use crate::model::{Point, Size};
use crate::overlay::Scene;
use crate::platform::macos::app::run::on_timer;
use crate::platform::macos::app::state::STATE;
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, NSPoint, NSRect, NSSize, YES};
use crate::platform::macos::ui::overlay::drawing;

/// Register the PointerMarksView class (once) and return it.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn register_view_class() -> Result<&'static AnyClass> {
    let class_name = c"PointerMarksView";
    if let Some(cls) = AnyClass::get(class_name) {
        return Ok(cls);
    }

    let superclass = get_class(c"NSView")?;
    let mut builder = ClassBuilder::new(class_name, superclass).ok_or_else(|| {
        OverlayError::WindowCreation("could not declare PointerMarksView".into())
    })?;

    builder.add_method(
        sel!(drawRect:),
        draw_rect as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(isFlipped),
        is_flipped as unsafe extern "C-unwind" fn(_, _) -> _,
    );
    builder.add_method(
        sel!(overlayTick),
        overlay_tick as unsafe extern "C-unwind" fn(_, _),
    );

    Ok(builder.register())
}

/// Create a view of `size` and install it as `window`'s content view.
///
/// # Safety
/// Must be called from the main thread. The window must be a valid NSWindow.
pub unsafe fn create_view(window: id, size: Size) -> Result<id> {
    let cls = register_view_class()?;

    let view: id = msg_send![cls, alloc];
    let frame = NSRect::new(
        NSPoint::new(0.0, 0.0),
        NSSize::new(f64::from(size.width), f64::from(size.height)),
    );
    let view: id = msg_send![view, initWithFrame: frame];
    if view == nil {
        return Err(OverlayError::WindowCreation("PointerMarksView init".into()));
    }

    let _: () = msg_send![window, setContentView: view];
    Ok(view)
}

/// Top-left based coordinates.
unsafe extern "C-unwind" fn is_flipped(_this: &AnyObject, _cmd: Sel) -> Bool {
    YES
}

unsafe extern "C-unwind" fn overlay_tick(_this: &AnyObject, _cmd: Sel) {
    on_timer();
}

unsafe extern "C-unwind" fn draw_rect(_this: &AnyObject, _cmd: Sel, dirty: NSRect) {
    drawing::clear(dirty);

    STATE.with(|s| {
        let Ok(mut guard) = s.try_borrow_mut() else {
            return;
        };
        let state = &mut *guard;
        let Some(controller) = state.controller.as_ref() else {
            return;
        };

        match controller.scene() {
            Scene::Empty => {}
            // The line window sits at the screen origin.
            Scene::Line(stroke) => drawing::draw_line_stroke(&stroke, Point::new(0, 0)),
            Scene::Icon(icon) => {
                if state.icon_image == nil {
                    match drawing::icon_image(icon) {
                        Ok(image) => state.icon_image = image,
                        Err(e) => {
                            log::error!("{e}");
                            return;
                        }
                    }
                }
                drawing::draw_icon_image(state.icon_image, icon);
            }
        }
    });
}
