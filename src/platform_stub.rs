/*
 * Non-Windows stand-in for the platform binding. Window construction fails
 * fast with `UnsupportedPlatform` instead of degrading silently; the other
 * operations exist so the portable facade compiles unchanged, and are
 * unreachable without a window to call them on.
 */

use crate::app::AppContext;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{ButtonOptions, ControlId, NativeHandle, WindowConfig};

use std::rc::Rc;

use log::debug;

pub(crate) fn create_native_window(
    _context: &Rc<AppContext>,
    config: &WindowConfig,
) -> PlatformResult<NativeHandle> {
    debug!(
        "Platform: refusing to create window '{}'; this host has no Win32 support.",
        config.title
    );
    Err(PlatformError::UnsupportedPlatform)
}

pub(crate) fn create_button(
    _parent: NativeHandle,
    _control_id: ControlId,
    _text: &str,
    _x: i32,
    _y: i32,
    _options: ButtonOptions,
) -> PlatformResult<NativeHandle> {
    Err(PlatformError::UnsupportedPlatform)
}

pub(crate) fn request_repaint(_window: NativeHandle) {}

pub(crate) fn destroy_native_window(_window: NativeHandle) -> PlatformResult<()> {
    Ok(())
}

pub(crate) fn run_message_loop() -> PlatformResult<()> {
    Err(PlatformError::UnsupportedPlatform)
}
