/*
 * Platform-agnostic types shared across the crate: opaque native handles,
 * control identifiers, label data, and the configuration structs consumed by
 * window and button construction. Nothing here touches the Win32 API, so the
 * whole module compiles and tests on every platform.
 */

use std::rc::Rc;

/// Opaque identity of a native window or control.
///
/// Wraps the pointer-sized handle value the OS hands back (an `HWND` on
/// Windows) without exposing the raw type, so portable code can key maps and
/// compare identities while only the platform binding reinterprets the bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(isize);

impl NativeHandle {
    pub(crate) fn new(raw: isize) -> Self {
        Self(raw)
    }

    /// The raw handle bits. Meaningful only to the platform binding.
    pub fn raw(&self) -> isize {
        self.0
    }
}

/// Identifier assigned to a child control at creation time.
///
/// Ids come from a context-wide monotonic counter and are never reused for
/// the lifetime of that context, even after the owning window is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(i32);

impl ControlId {
    pub(crate) fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i32 {
        self.0
    }
}

/// A piece of text drawn at a fixed position inside a window's client area.
///
/// The text may be replaced later through `Window::update_label`; the anchor
/// coordinates are fixed at creation and labels cannot be repositioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Callback invoked when a bound button is clicked.
///
/// Handlers run synchronously on the thread driving the event loop; a
/// long-running handler stalls all windows until it returns.
pub type ClickHandler = Rc<dyn Fn()>;

/// Configuration for a top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            title: "Guisher Window".to_string(),
        }
    }
}

/// Sizing options for a push button; position is always caller-supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonOptions {
    pub width: i32,
    pub height: i32,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 30,
        }
    }
}
