//! Overlay rendering module.

pub mod renderer;

pub use renderer::{update_overlay, D2D_FACTORY};
