//! Windows entry point: window creation, message loop and timer tick.
//!
//! Uses Direct2D for anti-aliased lines with per-pixel alpha transparency
//! via UpdateLayeredWindow.

use std::time::Instant;

use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::Graphics::Direct2D::{D2D1CreateFactory, D2D1_FACTORY_TYPE_SINGLE_THREADED};
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetCursorPos, GetMessageW,
    GetSystemMetrics, KillTimer, LoadCursorW, PostQuitMessage, RegisterClassW, SetTimer,
    ShowWindow, TranslateMessage, CS_HREDRAW, CS_VREDRAW, IDC_ARROW, MSG, SM_CXSCREEN,
    SM_CYSCREEN, SW_HIDE, SW_SHOWNOACTIVATE, WM_CREATE, WM_DESTROY, WM_TIMER, WNDCLASSW,
    WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};

use crate::error::{OverlayError, Result};
use crate::events;
use crate::handlers::run_tick;
use crate::model::{Point, Size, WindowCommand};
use crate::overlay::OverlayController;
use crate::platform::windows::app::state::STATE;
use crate::platform::windows::input::spawn_hook_thread;
use crate::platform::windows::ui::overlay::{update_overlay, D2D_FACTORY};

/// Timer driving input dispatch, animation and redraw.
pub const TIMER_TICK: usize = 1;

/// Runs `controller` until Escape is pressed or the window is destroyed.
pub fn run(controller: Box<dyn OverlayController>) -> Result<()> {
    unsafe { run_app(controller) }
}

unsafe fn run_app(controller: Box<dyn OverlayController>) -> Result<()> {
    let name = controller.name();
    let interval_ms = u32::try_from(controller.tick_interval().as_millis())
        .unwrap_or(u32::MAX)
        .max(1);

    // Hook coordinates and window coordinates must both be physical pixels.
    if let Err(e) = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) {
        log::debug!("per-monitor DPI awareness unavailable: {e}");
    }

    CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;

    let factory = D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)?;
    D2D_FACTORY.with(|f| *f.borrow_mut() = Some(factory));

    let instance = GetModuleHandleW(None)?;
    let class_name = w!("PointerMarksOverlay");

    let wc = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc),
        hInstance: instance.into(),
        hCursor: LoadCursorW(None, IDC_ARROW)?,
        lpszClassName: class_name,
        ..Default::default()
    };
    if RegisterClassW(&wc) == 0 {
        return Err(OverlayError::WindowCreation(
            "RegisterClassW failed".into(),
        ));
    }

    let screen = Size::new(GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN));
    let (origin, size) = controller.placement().rect(screen);

    // Layered, click-through, topmost, never activated, absent from the taskbar
    let ex_style =
        WS_EX_LAYERED | WS_EX_TRANSPARENT | WS_EX_TOPMOST | WS_EX_NOACTIVATE | WS_EX_TOOLWINDOW;

    let hwnd = CreateWindowExW(
        ex_style,
        class_name,
        w!("Pointer Marks"),
        WS_POPUP,
        origin.x,
        origin.y,
        size.width,
        size.height,
        None,
        None,
        Some(instance.into()),
        None,
    )
    .map_err(|e| OverlayError::WindowCreation(e.to_string()))?;

    STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.hwnd = hwnd;
        state.screen = screen;
        state.shown = false;
        state.controller = Some(controller);
    });

    events::init_event_bus()?;
    let hooks = match spawn_hook_thread() {
        Ok(hooks) => hooks,
        Err(e) => {
            let _ = DestroyWindow(hwnd);
            return Err(e);
        }
    };

    if SetTimer(Some(hwnd), TIMER_TICK, interval_ms, None) == 0 {
        hooks.stop();
        let _ = DestroyWindow(hwnd);
        return Err(OverlayError::WindowCreation("SetTimer failed".into()));
    }

    log::info!(
        "{name}: overlay running ({}x{} screen, {interval_ms} ms tick); press Esc to quit",
        screen.width,
        screen.height
    );

    let mut msg = MSG::default();
    while GetMessageW(&mut msg, None, 0, 0).as_bool() {
        let _ = TranslateMessage(&msg);
        DispatchMessageW(&msg);
    }

    hooks.stop();
    STATE.with(|s| s.borrow_mut().controller = None);
    D2D_FACTORY.with(|f| *f.borrow_mut() = None);
    CoUninitialize();

    log::info!("{name}: overlay closed");
    Ok(())
}

/// Current pointer position, or the origin if the query fails.
fn cursor_position() -> Point {
    let mut pt = POINT::default();
    unsafe {
        if GetCursorPos(&mut pt).is_err() {
            return Point::default();
        }
    }
    Point::new(pt.x, pt.y)
}

/// One timer tick: dispatch queued input, advance timers, redraw.
unsafe fn on_timer(hwnd: HWND) {
    let queued = events::drain_events();
    let now = Instant::now();
    let cursor = cursor_position();

    let ticked = STATE.with(|s| {
        let mut state = s.borrow_mut();
        let shown = state.shown;
        state
            .controller
            .as_mut()
            .map(|controller| (run_tick(queued, controller.as_mut(), now, cursor), shown))
    });
    let Some((outcome, shown)) = ticked else {
        return;
    };

    if outcome.quit {
        let _ = KillTimer(Some(hwnd), TIMER_TICK);
        let _ = DestroyWindow(hwnd);
        return;
    }

    let show_next = match outcome.window {
        Some(WindowCommand::Show) => true,
        Some(WindowCommand::Hide) => false,
        None => shown,
    };
    // Paint before showing so a stale frame never flashes.
    if show_next {
        update_overlay();
    }
    if let Some(cmd) = outcome.window {
        apply_window_command(hwnd, cmd, shown);
    }
}

unsafe fn apply_window_command(hwnd: HWND, cmd: WindowCommand, shown: bool) {
    let show = cmd == WindowCommand::Show;
    if show == shown {
        return;
    }
    let _ = ShowWindow(hwnd, if show { SW_SHOWNOACTIVATE } else { SW_HIDE });
    STATE.with(|s| s.borrow_mut().shown = show);
    log::debug!("overlay window {}", if show { "shown" } else { "hidden" });
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_CREATE => LRESULT(0),

            WM_TIMER => {
                if wparam.0 == TIMER_TICK {
                    on_timer(hwnd);
                }
                LRESULT(0)
            }

            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
