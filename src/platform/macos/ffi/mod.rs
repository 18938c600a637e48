//! FFI bindings and objc2 helpers for macOS.

pub mod accessibility;
pub mod bridge;
pub mod cocoa;

pub use accessibility::ensure_accessibility_prompt;
pub use cocoa::{cocoa_origin, mouse_position, OVERLAY_WINDOW_LEVEL};
