//! Platform-specific implementations.
//!
//! Each platform provides `run`, which opens the overlay window, installs
//! global input hooks and drives an [`OverlayController`](crate::overlay::OverlayController)
//! from a timer until Escape is pressed.

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub use macos::run;

#[cfg(target_os = "windows")]
pub use windows::run;
