/*
 * Typed window-procedure dispatch. The Win32 router demultiplexes raw
 * messages and calls into the `WindowProcedure` capability set, implemented
 * once by the application context; the `Dispatch` outcome tells the router
 * what to report back to the OS. Keeping the seam free of Win32 types lets
 * the dispatch behavior be exercised with plain values in unit tests.
 */

use crate::painting::Surface;
use crate::types::{ControlId, NativeHandle};

/// Outcome of dispatching one message to the application context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dispatch {
    /// Message consumed; the router reports success (LRESULT 0).
    Handled,
    /// Message consumed and the event loop must shut down.
    Quit,
    /// Not handled here; the router falls back to the OS default.
    Forward,
}

/*
 * The three message classes the windowing layer reacts to, in the order the
 * router checks them: terminate-request, command invocation, repaint-request.
 * Everything else goes straight to the OS default procedure.
 */
pub(crate) trait WindowProcedure {
    /// The native window received its destroy notification.
    fn handle_destroy(&self, window: NativeHandle) -> Dispatch;

    /// A command (button click) arrived for `control`.
    fn handle_command(&self, window: NativeHandle, control: ControlId) -> Dispatch;

    /// The window needs repainting onto `surface`.
    fn handle_paint(&self, window: NativeHandle, surface: &mut dyn Surface) -> Dispatch;
}

/// Extracts the control id a command message carries in the low-order
/// 16 bits of its wParam.
#[inline]
pub(crate) fn control_id_from_wparam(wparam: usize) -> ControlId {
    ControlId::new((wparam & 0xFFFF) as i32)
}
