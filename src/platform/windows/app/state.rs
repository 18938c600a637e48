//! Windows runtime state management.
//!
//! Contains the UI-thread state struct and its thread-local storage.

use std::cell::RefCell;

use windows::Win32::Foundation::HWND;

use crate::model::Size;
use crate::overlay::OverlayController;

/// State owned by the UI thread.
///
/// Hooks never touch this; they publish to the event bus and the timer
/// applies the queued events here.
pub struct WindowsRuntimeState {
    pub hwnd: HWND,
    /// Primary screen size, the extent of a full-screen overlay.
    pub screen: Size,
    /// Whether the window is currently shown.
    pub shown: bool,
    pub controller: Option<Box<dyn OverlayController>>,
}

impl Default for WindowsRuntimeState {
    fn default() -> Self {
        Self {
            hwnd: HWND::default(),
            screen: Size::default(),
            shown: false,
            controller: None,
        }
    }
}

thread_local! {
    /// Overlay state of the UI thread.
    pub static STATE: RefCell<WindowsRuntimeState> = RefCell::new(WindowsRuntimeState::default());
}
