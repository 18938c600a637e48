//! Thin helpers over objc2 for message-sending style AppKit code.
//!
//! Most of the backend talks to AppKit through `msg_send!` on untyped
//! object pointers, mirroring the Objective-C it replaces. This module
//! gathers the aliases and lookups that style needs.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::ffi::CStr;

pub use objc2::runtime::{AnyClass, AnyObject, Bool, Sel};
pub use objc2::{msg_send, sel, ClassType};

pub use objc2_app_kit::NSApplication;
pub use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

use crate::error::{OverlayError, Result};

/// Objective-C object pointer.
pub type id = *mut AnyObject;

/// Null object pointer.
pub const nil: id = std::ptr::null_mut();

/// Objective-C `YES`.
pub const YES: Bool = Bool::YES;

/// Objective-C `NO`.
pub const NO: Bool = Bool::NO;

/// Get the shared NSApplication instance.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![NSApplication::class(), sharedApplication] }
}

/// Look up an Objective-C class by name.
pub fn get_class(name: &CStr) -> Result<&'static AnyClass> {
    AnyClass::get(name)
        .ok_or_else(|| OverlayError::WindowCreation(format!("class {name:?} not found")))
}
