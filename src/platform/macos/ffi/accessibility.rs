//! FFI bindings for ApplicationServices (Accessibility).
//!
//! Global event monitors only see other applications' input once the
//! process is trusted for Accessibility.

use std::ffi::c_void;

/// Opaque `CFDictionaryKeyCallBacks` / `CFDictionaryValueCallBacks`.
#[repr(C)]
pub struct CFDictionaryCallBacks {
    _private: [u8; 0],
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    pub fn CFRelease(obj: *const c_void);

    pub fn CFDictionaryCreate(
        allocator: *const c_void,
        keys: *const *const c_void,
        values: *const *const c_void,
        num_values: isize,
        key_callbacks: *const CFDictionaryCallBacks,
        value_callbacks: *const CFDictionaryCallBacks,
    ) -> *const c_void;

    pub static kCFBooleanTrue: *const c_void;
    pub static kCFTypeDictionaryKeyCallBacks: CFDictionaryCallBacks;
    pub static kCFTypeDictionaryValueCallBacks: CFDictionaryCallBacks;
}

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    pub fn AXIsProcessTrustedWithOptions(options: *const c_void) -> bool;

    pub static kAXTrustedCheckOptionPrompt: *const c_void;
}

/// Check Accessibility trust, showing the system prompt if it is missing.
///
/// Returns whether the process is trusted right now. The prompt is
/// asynchronous, so a first run returns `false` even if the user agrees.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn ensure_accessibility_prompt() -> bool {
    let keys = [kAXTrustedCheckOptionPrompt];
    let values = [kCFBooleanTrue];

    let dict = CFDictionaryCreate(
        std::ptr::null(),
        keys.as_ptr(),
        values.as_ptr(),
        1,
        std::ptr::addr_of!(kCFTypeDictionaryKeyCallBacks),
        std::ptr::addr_of!(kCFTypeDictionaryValueCallBacks),
    );

    let trusted = AXIsProcessTrustedWithOptions(dict);

    if !dict.is_null() {
        CFRelease(dict);
    }
    trusted
}
