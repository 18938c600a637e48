//! macOS runtime state, owned by the main thread.

use std::cell::RefCell;

use crate::model::Size;
use crate::overlay::OverlayController;
use crate::platform::macos::ffi::bridge::{id, nil};

pub struct MacRuntimeState {
    pub window: id,
    pub view: id,
    /// Primary screen size in points.
    pub screen: Size,
    pub screen_height: f64,
    pub shown: bool,
    pub timer: id,
    /// Tokens returned by `addGlobalMonitorForEventsMatchingMask:handler:`.
    pub monitors: Vec<id>,
    /// Cached `NSImage` of the arrow icon, built on first draw.
    pub icon_image: id,
    pub controller: Option<Box<dyn OverlayController>>,
}

impl Default for MacRuntimeState {
    fn default() -> Self {
        Self {
            window: nil,
            view: nil,
            screen: Size::default(),
            screen_height: 0.0,
            shown: false,
            timer: nil,
            monitors: Vec::new(),
            icon_image: nil,
            controller: None,
        }
    }
}

thread_local! {
    pub static STATE: RefCell<MacRuntimeState> = RefCell::new(MacRuntimeState::default());
}
