//! Windows-specific implementation using Win32 API and Direct2D.
//!
//! This module contains all Windows-specific code:
//! - App: layered window setup, message loop, timer tick
//! - Input: low-level mouse and keyboard hooks on their own thread
//! - UI: DIB + Direct2D rendering pushed via UpdateLayeredWindow

pub mod app;
pub mod input;
pub mod ui;

pub use app::run;
