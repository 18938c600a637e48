//! Input handling for Windows (global mouse and keyboard hooks).

pub mod hooks;

pub use hooks::{keyboard_hook_proc, mouse_hook_proc, spawn_hook_thread, HookThread};
