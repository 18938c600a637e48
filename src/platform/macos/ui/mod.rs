//! UI components for macOS.

pub mod overlay;

pub use overlay::*;
