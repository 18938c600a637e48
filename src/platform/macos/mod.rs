//! macOS-specific implementation using Cocoa/AppKit via objc2.
//!
//! This module contains all macOS-specific code:
//! - FFI bindings to AppKit, CoreFoundation and Accessibility
//! - App: borderless click-through NSWindow, run loop, NSTimer tick
//! - Input: global NSEvent monitors for the mouse and Escape
//! - UI: the PointerMarksView class and its drawing

pub mod app;
pub mod ffi;
pub mod input;
pub mod ui;

pub use app::run;
