//! Layered-window rendering.
//!
//! Each frame is drawn into a top-down 32-bit DIB with premultiplied alpha
//! and pushed with `UpdateLayeredWindow`. Lines go through a Direct2D DC
//! render target for anti-aliasing; icons are copied straight into the bits.

use std::cell::RefCell;

use windows::Win32::Foundation::{COLORREF, POINT, RECT, SIZE};
use windows::Win32::Graphics::Direct2D::Common::{
    D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT,
};
use windows::Win32::Graphics::Direct2D::{
    ID2D1DCRenderTarget, ID2D1Factory, ID2D1RenderTarget, ID2D1StrokeStyle,
    D2D1_ANTIALIAS_MODE_PER_PRIMITIVE, D2D1_CAP_STYLE_ROUND, D2D1_DASH_STYLE_SOLID,
    D2D1_LINE_JOIN_ROUND, D2D1_RENDER_TARGET_PROPERTIES, D2D1_RENDER_TARGET_TYPE_DEFAULT,
    D2D1_RENDER_TARGET_USAGE_NONE, D2D1_STROKE_STYLE_PROPERTIES,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    BITMAPINFO, BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION, DIB_RGB_COLORS, HDC,
};
use windows::Win32::UI::WindowsAndMessaging::{
    SetWindowPos, UpdateLayeredWindow, HWND_TOPMOST, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    ULW_ALPHA,
};
use windows_numerics::Vector2;

use crate::model::{ArrowIcon, Point, Size};
use crate::overlay::{LineStroke, Scene};
use crate::platform::windows::app::state::STATE;

thread_local! {
    pub static D2D_FACTORY: RefCell<Option<ID2D1Factory>> = const { RefCell::new(None) };
}

/// Redraw the overlay window from the controller's current scene.
pub fn update_overlay() {
    STATE.with(|s| {
        let state = s.borrow();
        let Some(controller) = state.controller.as_ref() else {
            return;
        };
        let (origin, size) = controller.placement().rect(state.screen);
        D2D_FACTORY.with(|f| {
            if let Some(factory) = f.borrow().as_ref() {
                unsafe {
                    update_layered_window(state.hwnd, factory, controller.scene(), origin, size);
                }
            }
        });
    });
}

/// Draw `scene` and apply it with UpdateLayeredWindow at `origin`.
unsafe fn update_layered_window(
    hwnd: windows::Win32::Foundation::HWND,
    factory: &ID2D1Factory,
    scene: Scene<'_>,
    origin: Point,
    size: Size,
) {
    let width = size.width;
    let height = size.height;

    let screen_dc = GetDC(None);
    let mem_dc = CreateCompatibleDC(Some(screen_dc));

    let bmi = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, // Top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
    let bitmap = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
        Ok(bitmap) if !bits.is_null() => bitmap,
        Ok(bitmap) => {
            let _ = DeleteObject(bitmap.into());
            ReleaseDC(None, screen_dc);
            let _ = DeleteDC(mem_dc);
            return;
        }
        Err(e) => {
            log::error!("CreateDIBSection {width}x{height} failed: {e}");
            ReleaseDC(None, screen_dc);
            let _ = DeleteDC(mem_dc);
            return;
        }
    };
    let old_bitmap = SelectObject(mem_dc, bitmap.into());

    // A fresh DIB section is zeroed, i.e. fully transparent.
    match scene {
        Scene::Empty => {}
        Scene::Line(stroke) => draw_line(factory, mem_dc, &stroke, origin, size),
        Scene::Icon(icon) => {
            let len = (width.max(0) * height.max(0) * 4) as usize;
            let dst = std::slice::from_raw_parts_mut(bits as *mut u8, len);
            blit_icon(icon, dst, size);
        }
    }

    let pt_src = POINT { x: 0, y: 0 };
    let wnd_size = SIZE {
        cx: width,
        cy: height,
    };
    let pt_dst = POINT {
        x: origin.x,
        y: origin.y,
    };

    let blend = BLENDFUNCTION {
        BlendOp: 0,
        BlendFlags: 0,
        SourceConstantAlpha: 255,
        AlphaFormat: 1,
    };

    if let Err(e) = UpdateLayeredWindow(
        hwnd,
        Some(screen_dc),
        Some(&pt_dst),
        Some(&wnd_size),
        Some(mem_dc),
        Some(&pt_src),
        COLORREF(0),
        Some(&blend),
        ULW_ALPHA,
    ) {
        log::error!("UpdateLayeredWindow failed: {e}");
    }

    // Keep window above taskbar (re-assert topmost position each frame)
    let _ = SetWindowPos(
        hwnd,
        Some(HWND_TOPMOST),
        0,
        0,
        0,
        0,
        SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
    );

    SelectObject(mem_dc, old_bitmap);
    let _ = DeleteObject(bitmap.into());
    let _ = DeleteDC(mem_dc);
    ReleaseDC(None, screen_dc);
}

/// Stroke `stroke` into the bitmap selected in `mem_dc`.
unsafe fn draw_line(factory: &ID2D1Factory, mem_dc: HDC, stroke: &LineStroke, origin: Point, size: Size) {
    let rt_props = D2D1_RENDER_TARGET_PROPERTIES {
        r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
        pixelFormat: D2D1_PIXEL_FORMAT {
            format: DXGI_FORMAT_B8G8R8A8_UNORM,
            alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
        },
        dpiX: 96.0,
        dpiY: 96.0,
        usage: D2D1_RENDER_TARGET_USAGE_NONE,
        minLevel: Default::default(),
    };

    let stroke_props = D2D1_STROKE_STYLE_PROPERTIES {
        startCap: D2D1_CAP_STYLE_ROUND,
        endCap: D2D1_CAP_STYLE_ROUND,
        dashCap: D2D1_CAP_STYLE_ROUND,
        lineJoin: D2D1_LINE_JOIN_ROUND,
        miterLimit: 1.0,
        dashStyle: D2D1_DASH_STYLE_SOLID,
        dashOffset: 0.0,
    };
    let stroke_style: Option<ID2D1StrokeStyle> =
        factory.CreateStrokeStyle(&stroke_props, None).ok();

    let dc_rt: ID2D1DCRenderTarget = match factory.CreateDCRenderTarget(&rt_props) {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("CreateDCRenderTarget failed: {e}");
            return;
        }
    };

    let rect = RECT {
        left: 0,
        top: 0,
        right: size.width,
        bottom: size.height,
    };
    if let Err(e) = dc_rt.BindDC(mem_dc, &rect) {
        log::error!("BindDC failed: {e}");
        return;
    }

    let rt: ID2D1RenderTarget = dc_rt.into();
    rt.BeginDraw();
    rt.Clear(Some(&D2D1_COLOR_F {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    }));
    rt.SetAntialiasMode(D2D1_ANTIALIAS_MODE_PER_PRIMITIVE);

    let (r, g, b, a) = stroke.color;
    let color = D2D1_COLOR_F {
        r: r as f32,
        g: g as f32,
        b: b as f32,
        a: a as f32,
    };
    if let Ok(brush) = rt.CreateSolidColorBrush(&color, None) {
        let segment = stroke.segment.relative_to(origin);
        rt.DrawLine(
            Vector2::new(segment.start.x as f32, segment.start.y as f32),
            Vector2::new(segment.end.x as f32, segment.end.y as f32),
            &brush,
            stroke.width as f32,
            stroke_style.as_ref(),
        );
    }

    if let Err(e) = rt.EndDraw(None, None) {
        log::error!("EndDraw failed: {e}");
    }
}

/// Copy `icon` to the top-left of a BGRA buffer of `size`, clipping.
pub fn blit_icon(icon: &ArrowIcon, dst: &mut [u8], size: Size) {
    let width = size.width.max(0) as u32;
    let height = size.height.max(0) as u32;
    let cols = icon.width().min(width);
    let rows = icon.height().min(height);

    for y in 0..rows {
        for x in 0..cols {
            let Some([r, g, b, a]) = icon.pixel(x, y) else {
                continue;
            };
            let i = ((y * width + x) * 4) as usize;
            if let Some(px) = dst.get_mut(i..i + 4) {
                px.copy_from_slice(&[b, g, r, a]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IconSource;

    #[test]
    fn test_blit_swaps_channels_and_clips() {
        let icon = ArrowIcon::from_straight_rgba(
            3,
            1,
            vec![10, 20, 30, 255, 40, 50, 60, 255, 70, 80, 90, 255],
            IconSource::Placeholder,
        );
        let mut dst = vec![0u8; 2 * 2 * 4];
        blit_icon(&icon, &mut dst, Size::new(2, 2));

        assert_eq!(&dst[0..4], &[30, 20, 10, 255]);
        assert_eq!(&dst[4..8], &[60, 50, 40, 255]);
        assert!(dst[8..].iter().all(|&b| b == 0));
    }
}
