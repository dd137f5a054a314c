/*
 * Win32 binding. Everything that touches the native API lives here: window
 * class registration, window and button creation, the window procedure
 * router, label drawing over a paint device context, and the blocking
 * message loop. The rest of the crate only sees `NativeHandle` values and
 * the `WindowProcedure` outcomes.
 */

use crate::app::AppContext;
use crate::dispatch::{self, Dispatch, WindowProcedure};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::painting::Surface;
use crate::types::{ButtonOptions, ControlId, NativeHandle, WindowConfig};

use std::ffi::c_void;
use std::rc::Rc;

use windows::Win32::{
    Foundation::{
        ERROR_INVALID_WINDOW_HANDLE, GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM,
    },
    Graphics::Gdi::{
        BeginPaint, COLOR_WINDOW, DT_SINGLELINE, DT_VCENTER, DrawTextW, EndPaint, HBRUSH, HDC,
        InvalidateRect, PAINTSTRUCT,
    },
    System::LibraryLoader::GetModuleHandleW,
    UI::WindowsAndMessaging::{
        BS_PUSHBUTTON, CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW,
        DefWindowProcW, DestroyWindow, DispatchMessageW, GWLP_USERDATA, GetClassInfoExW,
        GetMessageW, GetWindowLongPtrW, HMENU, IDC_ARROW, IDI_APPLICATION, LoadCursorW, LoadIconW,
        MSG, PostQuitMessage, RegisterClassExW, SetWindowLongPtrW, TranslateMessage,
        WINDOW_EX_STYLE, WINDOW_STYLE, WM_COMMAND, WM_DESTROY, WM_NCCREATE, WM_NCDESTROY,
        WM_PAINT, WNDCLASSEXW, WS_CHILD, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
    },
};
use windows::core::{HSTRING, PCWSTR, w};

use log::{debug, error, trace};

const WINDOW_CLASS_NAME: PCWSTR = w!("GuisherWindowClass");
const WC_BUTTON: PCWSTR = w!("BUTTON");

const SUCCESS_CODE: LRESULT = LRESULT(0);

// Each label is drawn into a fixed cell anchored at its (x, y); text longer
// than the cell is clipped by DrawTextW.
const LABEL_CELL_WIDTH: i32 = 200;
const LABEL_CELL_HEIGHT: i32 = 30;

/*
 * Boxed into the window's user-data slot at WM_NCCREATE so the window
 * procedure can reach the application context; owned by the native window
 * until WM_NCDESTROY frees it.
 */
struct WndprocContext {
    context: Rc<AppContext>,
}

fn hwnd_from(handle: NativeHandle) -> HWND {
    HWND(handle.raw() as *mut c_void)
}

fn handle_from(hwnd: HWND) -> NativeHandle {
    NativeHandle::new(hwnd.0 as isize)
}

fn module_instance() -> PlatformResult<HINSTANCE> {
    let module = unsafe { GetModuleHandleW(None)? };
    Ok(HINSTANCE(module.0))
}

/*
 * Registers the window class shared by every top-level window of this
 * crate, if not already registered. Registration is probed first so that
 * creating several windows stays idempotent.
 */
fn register_window_class(h_instance: HINSTANCE) -> PlatformResult<()> {
    unsafe {
        let mut wc_probe = WNDCLASSEXW::default();
        if GetClassInfoExW(Some(h_instance), WINDOW_CLASS_NAME, &mut wc_probe).is_ok() {
            trace!("Platform: window class already registered.");
            return Ok(());
        }

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(guisher_wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: h_instance,
            hIcon: LoadIconW(None, IDI_APPLICATION)?,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as *mut c_void),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: WINDOW_CLASS_NAME,
            hIconSm: LoadIconW(None, IDI_APPLICATION)?,
        };

        if RegisterClassExW(&wc) == 0 {
            let error = GetLastError();
            error!("Platform: RegisterClassExW failed: {error:?}");
            Err(PlatformError::InitializationFailed(format!(
                "RegisterClassExW failed: {error:?}"
            )))
        } else {
            debug!("Platform: window class registered.");
            Ok(())
        }
    }
}

/*
 * Creates a native top-level window, visible immediately. The application
 * context travels to the window procedure via `lpCreateParams`.
 */
pub(crate) fn create_native_window(
    context: &Rc<AppContext>,
    config: &WindowConfig,
) -> PlatformResult<NativeHandle> {
    let h_instance = module_instance()?;
    register_window_class(h_instance)?;

    let creation_context = Box::new(WndprocContext {
        context: Rc::clone(context),
    });

    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            WINDOW_CLASS_NAME,
            &HSTRING::from(config.title.as_str()),
            WS_OVERLAPPEDWINDOW | WS_VISIBLE,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            config.width,
            config.height,
            None,
            None,
            Some(h_instance),
            Some(Box::into_raw(creation_context) as *mut c_void),
        )?;

        Ok(handle_from(hwnd))
    }
}

/// Creates a native push button as a child of `parent`. The control id is
/// carried in the menu-handle slot, which is how command messages report it
/// back in their wParam low word.
pub(crate) fn create_button(
    parent: NativeHandle,
    control_id: ControlId,
    text: &str,
    x: i32,
    y: i32,
    options: ButtonOptions,
) -> PlatformResult<NativeHandle> {
    let h_instance = module_instance()?;

    let hwnd_button = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            WC_BUTTON,
            &HSTRING::from(text),
            WS_CHILD | WS_VISIBLE | WINDOW_STYLE(BS_PUSHBUTTON as u32),
            x,
            y,
            options.width,
            options.height,
            Some(hwnd_from(parent)),
            Some(HMENU(control_id.raw() as usize as *mut c_void)),
            Some(h_instance),
            None,
        )?
    };

    debug!(
        "Platform: created button (id {}) with HWND {hwnd_button:?}.",
        control_id.raw()
    );
    Ok(handle_from(hwnd_button))
}

/// Invalidates the whole client area, with background erase, so the next
/// paint pass redraws every label.
pub(crate) fn request_repaint(window: NativeHandle) {
    trace!("Platform: repaint requested for {window:?}.");
    unsafe {
        _ = InvalidateRect(Some(hwnd_from(window)), None, true);
    }
}

/*
 * Destroys the native window. An already-destroyed handle is tolerated;
 * any other failure surfaces as an error.
 */
pub(crate) fn destroy_native_window(window: NativeHandle) -> PlatformResult<()> {
    debug!("Platform: DestroyWindow requested for {window:?}.");
    unsafe {
        if DestroyWindow(hwnd_from(window)).is_err() {
            let last_error = GetLastError();
            if last_error.0 != ERROR_INVALID_WINDOW_HANDLE.0 {
                error!("Platform: DestroyWindow for {window:?} failed: {last_error:?}");
                return Err(PlatformError::OperationFailed(format!(
                    "DestroyWindow failed: {last_error:?}"
                )));
            }
            debug!("Platform: window {window:?} was already destroyed.");
        }
    }
    Ok(())
}

/*
 * Blocking message pump for the calling thread. Returns when the quit
 * signal posted during destroy handling is retrieved; a retrieval failure
 * surfaces as an error instead of spinning on -1.
 */
pub(crate) fn run_message_loop() -> PlatformResult<()> {
    debug!("Platform: entering message loop.");
    let mut msg = MSG::default();
    loop {
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match ret.0 {
            -1 => {
                let error = unsafe { GetLastError() };
                error!("Platform: GetMessageW failed: {error:?}");
                return Err(PlatformError::OperationFailed(format!(
                    "GetMessageW failed: {error:?}"
                )));
            }
            0 => break,
            _ => unsafe {
                _ = TranslateMessage(&msg);
                _ = DispatchMessageW(&msg);
            },
        }
    }
    debug!("Platform: message loop finished.");
    Ok(())
}

/*
 * Window procedure router. Recovers the boxed context stashed at
 * WM_NCCREATE, reduces the raw message to a `WindowProcedure` call, and
 * frees the box when the final teardown message arrives.
 */
unsafe extern "system" fn guisher_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let context_ptr = if msg == WM_NCCREATE {
        let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
        let context_raw_ptr = create_struct.lpCreateParams as *mut WndprocContext;
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, context_raw_ptr as isize) };
        context_raw_ptr
    } else {
        unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WndprocContext }
    };

    if context_ptr.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    let app = unsafe { &(*context_ptr).context };
    let result = handle_window_message(app, hwnd, msg, wparam, lparam);

    if msg == WM_NCDESTROY {
        let _ = unsafe { Box::from_raw(context_ptr) };
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
    }
    result
}

/*
 * Message demultiplexer, checked in priority order: terminate, command,
 * paint, then the OS default. WM_NCDESTROY additionally retires the handle
 * from the context map, exactly once per window.
 */
fn handle_window_message(
    app: &Rc<AppContext>,
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let window = handle_from(hwnd);
    match msg {
        WM_DESTROY => lresult_for(app.handle_destroy(window), hwnd, msg, wparam, lparam),
        WM_COMMAND => {
            let control = dispatch::control_id_from_wparam(wparam.0);
            lresult_for(app.handle_command(window, control), hwnd, msg, wparam, lparam)
        }
        WM_PAINT => handle_wm_paint(app, hwnd, wparam, lparam),
        WM_NCDESTROY => {
            app.remove_window(window);
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

fn lresult_for(outcome: Dispatch, hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match outcome {
        Dispatch::Quit => {
            unsafe { PostQuitMessage(0) };
            SUCCESS_CODE
        }
        Dispatch::Handled => SUCCESS_CODE,
        Dispatch::Forward => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/*
 * WM_PAINT: resolve the owning window via the handle map before any
 * per-instance work; unknown handles (teardown races) take the default
 * path. Known windows get the portable renderer over a device-context
 * surface.
 */
fn handle_wm_paint(app: &Rc<AppContext>, hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let window = handle_from(hwnd);
    if !app.window_registered(window) {
        return unsafe { DefWindowProcW(hwnd, WM_PAINT, wparam, lparam) };
    }

    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        if hdc.is_invalid() {
            return SUCCESS_CODE;
        }
        let mut surface = GdiSurface { hdc };
        let outcome = app.handle_paint(window, &mut surface);
        _ = EndPaint(hwnd, &ps);
        lresult_for(outcome, hwnd, WM_PAINT, wparam, lparam)
    }
}

/*
 * `Surface` over the paint device context. Each label is drawn single-line
 * and vertically centered into its fixed cell anchored at the label's
 * client coordinates.
 */
struct GdiSurface {
    hdc: HDC,
}

impl Surface for GdiSurface {
    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let mut wide: Vec<u16> = text.encode_utf16().collect();
        let mut rect = RECT {
            left: x,
            top: y,
            right: x + LABEL_CELL_WIDTH,
            bottom: y + LABEL_CELL_HEIGHT,
        };
        unsafe {
            DrawTextW(self.hdc, &mut wide, &mut rect, DT_SINGLELINE | DT_VCENTER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_handles_roundtrip_through_hwnd() {
        let hwnd = HWND(0x1234 as *mut std::ffi::c_void);
        let handle = handle_from(hwnd);
        assert_eq!(hwnd_from(handle), hwnd);
        assert_eq!(handle.raw(), 0x1234);
    }
}
