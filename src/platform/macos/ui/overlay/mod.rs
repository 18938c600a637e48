//! Overlay view module.
//!
//! Contains the PointerMarksView class and drawing logic for the overlays.

pub mod drawing;
pub mod view;

pub use view::create_view;
