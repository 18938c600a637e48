//! Application domain model.
//!
//! This module contains pure logic (no FFI dependencies): the line gesture
//! state machine, the arrow state, icon loading, geometry, configuration
//! and constants.
//!
//! Window and input plumbing lives in `platform::{macos,windows}`.

pub mod arrow;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod gesture;
pub mod icon;

pub use arrow::ArrowState;
pub use config::{ArrowConfig, LineConfig};
pub use constants::*;
pub use geometry::{LineSegment, Point, Size};
pub use gesture::{GestureState, Phase, WindowCommand};
pub use icon::{ArrowIcon, IconSource};
