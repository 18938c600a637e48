//! Low-level mouse and keyboard hooks for Windows.
//!
//! `WH_MOUSE_LL` and `WH_KEYBOARD_LL` callbacks run on the thread that
//! installed them and only while that thread pumps messages. They live on a
//! dedicated thread so a busy UI thread cannot stall system-wide input, and
//! they do nothing but publish records to the event bus.

use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::VK_ESCAPE;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT,
    MSG, MSLLHOOKSTRUCT, PM_NOREMOVE, WH_KEYBOARD_LL, WH_MOUSE_LL, WM_KEYDOWN, WM_LBUTTONDOWN,
    WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSEMOVE, WM_QUIT, WM_RBUTTONDOWN,
    WM_RBUTTONUP, WM_SYSKEYDOWN, WM_USER, WM_XBUTTONDOWN, WM_XBUTTONUP,
};

use crate::error::{OverlayError, Result};
use crate::events::{self, InputEvent, InputKind, MouseButton, OverlayEvent};
use crate::model::Point;

/// Global hook handles (must be static for the hook callbacks).
pub static MOUSE_HOOK: AtomicIsize = AtomicIsize::new(0);
pub static KEYBOARD_HOOK: AtomicIsize = AtomicIsize::new(0);

/// Maps a low-level mouse message to the event it represents.
pub fn mouse_message_kind(msg: u32) -> Option<InputKind> {
    match msg {
        WM_LBUTTONDOWN => Some(InputKind::Press(MouseButton::Left)),
        WM_RBUTTONDOWN => Some(InputKind::Press(MouseButton::Right)),
        WM_MBUTTONDOWN => Some(InputKind::Press(MouseButton::Middle)),
        WM_XBUTTONDOWN => Some(InputKind::Press(MouseButton::Other)),
        WM_LBUTTONUP => Some(InputKind::Release(MouseButton::Left)),
        WM_RBUTTONUP => Some(InputKind::Release(MouseButton::Right)),
        WM_MBUTTONUP => Some(InputKind::Release(MouseButton::Middle)),
        WM_XBUTTONUP => Some(InputKind::Release(MouseButton::Other)),
        WM_MOUSEMOVE => Some(InputKind::Move),
        // Wheel and anything else.
        _ => None,
    }
}

/// Low-level mouse hook procedure.
pub extern "system" fn mouse_hook_proc(ncode: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        if ncode == HC_ACTION as i32 {
            if let Some(kind) = mouse_message_kind(wparam.0 as u32) {
                let info = &*(lparam.0 as *const MSLLHOOKSTRUCT);
                let position = Point::new(info.pt.x, info.pt.y);
                events::publish(OverlayEvent::Mouse(InputEvent::new(
                    kind,
                    position,
                    Instant::now(),
                )));
            }
        }

        let hook = MOUSE_HOOK.load(Ordering::SeqCst);
        CallNextHookEx(Some(HHOOK(hook as *mut _)), ncode, wparam, lparam)
    }
}

/// Low-level keyboard hook procedure; only Escape is of interest.
pub extern "system" fn keyboard_hook_proc(ncode: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        if ncode == HC_ACTION as i32 {
            let msg = wparam.0 as u32;
            if msg == WM_KEYDOWN || msg == WM_SYSKEYDOWN {
                let info = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
                if info.vkCode == u32::from(VK_ESCAPE.0) {
                    events::publish(OverlayEvent::Quit);
                }
            }
        }

        let hook = KEYBOARD_HOOK.load(Ordering::SeqCst);
        CallNextHookEx(Some(HHOOK(hook as *mut _)), ncode, wparam, lparam)
    }
}

/// The thread that owns the hooks.
pub struct HookThread {
    handle: JoinHandle<()>,
    thread_id: u32,
}

/// Starts the hook thread and waits until both hooks are installed.
pub fn spawn_hook_thread() -> Result<HookThread> {
    let (ready_tx, ready_rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("input-hooks".into())
        .spawn(move || unsafe { hook_thread_main(ready_tx) })?;

    match ready_rx.recv() {
        Ok(Ok(thread_id)) => {
            log::debug!("input hooks installed on thread {thread_id}");
            Ok(HookThread { handle, thread_id })
        }
        Ok(Err(message)) => {
            let _ = handle.join();
            Err(OverlayError::HookInstall(message))
        }
        Err(_) => {
            let _ = handle.join();
            Err(OverlayError::HookInstall(
                "hook thread exited before installing hooks".into(),
            ))
        }
    }
}

impl HookThread {
    /// Ends the hook thread's message loop, which removes the hooks.
    pub fn stop(self) {
        unsafe {
            if let Err(e) = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) {
                log::error!("failed to stop input hook thread: {e}");
                return;
            }
        }
        if self.handle.join().is_err() {
            log::error!("input hook thread panicked");
        }
    }
}

unsafe fn hook_thread_main(ready: Sender<std::result::Result<u32, String>>) {
    let mut msg = MSG::default();
    // Create this thread's message queue so WM_QUIT can be posted to it.
    let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);

    let mouse = match SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), None, 0) {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready.send(Err(format!("mouse hook: {e}")));
            return;
        }
    };
    MOUSE_HOOK.store(mouse.0 as isize, Ordering::SeqCst);

    let keyboard = match SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) {
        Ok(hook) => hook,
        Err(e) => {
            let _ = UnhookWindowsHookEx(mouse);
            MOUSE_HOOK.store(0, Ordering::SeqCst);
            let _ = ready.send(Err(format!("keyboard hook: {e}")));
            return;
        }
    };
    KEYBOARD_HOOK.store(keyboard.0 as isize, Ordering::SeqCst);

    let _ = ready.send(Ok(GetCurrentThreadId()));

    while GetMessageW(&mut msg, None, 0, 0).as_bool() {
        let _ = TranslateMessage(&msg);
        DispatchMessageW(&msg);
    }

    let _ = UnhookWindowsHookEx(keyboard);
    let _ = UnhookWindowsHookEx(mouse);
    KEYBOARD_HOOK.store(0, Ordering::SeqCst);
    MOUSE_HOOK.store(0, Ordering::SeqCst);
    log::debug!("input hooks removed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::WM_MOUSEWHEEL;

    #[test]
    fn test_button_messages_map_to_presses_and_releases() {
        assert_eq!(
            mouse_message_kind(WM_LBUTTONDOWN),
            Some(InputKind::Press(MouseButton::Left))
        );
        assert_eq!(
            mouse_message_kind(WM_RBUTTONUP),
            Some(InputKind::Release(MouseButton::Right))
        );
        assert_eq!(
            mouse_message_kind(WM_XBUTTONDOWN),
            Some(InputKind::Press(MouseButton::Other))
        );
        assert_eq!(mouse_message_kind(WM_MOUSEMOVE), Some(InputKind::Move));
    }

    #[test]
    fn test_wheel_is_ignored() {
        assert_eq!(mouse_message_kind(WM_MOUSEWHEEL), None);
    }
}
