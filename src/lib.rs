//! Pointer marks: two tiny always-on-top overlays for screen recordings.
//!
//! - `drawline` grows a red horizontal line under the cursor while a mouse
//!   button is held, blinks it after release and lets it be dragged.
//! - `mouse-arrow` shows a blinking arrow next to the cursor while a button
//!   is held.
//!
//! Everything outside [`platform`] is free of FFI so the behaviour can be
//! tested as ordinary Rust on any host.

pub mod error;
pub mod events;
pub mod handlers;
pub mod model;
pub mod overlay;

#[cfg(any(target_os = "macos", target_os = "windows"))]
pub mod platform;

pub use error::{OverlayError, Result};
pub use events::{EventBus, EventPublisher, InputEvent, InputKind, MouseButton, OverlayEvent};
pub use model::{ArrowConfig, LineConfig, Point};
pub use overlay::{ArrowOverlay, LineOverlay, OverlayController, Placement, Scene};

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Runs `controller` in an overlay window until Escape is pressed.
///
/// Blocks the calling thread, which must be the process's main thread.
#[cfg(any(target_os = "macos", target_os = "windows"))]
pub fn run_overlay(controller: Box<dyn OverlayController>) -> Result<()> {
    platform::run(controller)
}

/// Runs `controller` in an overlay window until Escape is pressed.
///
/// There is no backend for this operating system, so this always fails.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn run_overlay(controller: Box<dyn OverlayController>) -> Result<()> {
    log::error!("{}: no overlay backend for {}", controller.name(), std::env::consts::OS);
    Err(OverlayError::UnsupportedPlatform(std::env::consts::OS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }
}
