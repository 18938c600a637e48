//! UI components for Windows.

pub mod overlay;

pub use overlay::*;
