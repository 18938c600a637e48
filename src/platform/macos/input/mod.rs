//! Input handling module.
//!
//! - mouse_monitors.rs: global mouse monitor and the Escape key monitor

pub mod mouse_monitors;

pub use mouse_monitors::{install_escape_monitor, install_mouse_monitors, remove_monitors};
