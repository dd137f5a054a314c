/*
 * Public window facade. A `Window` owns one native top-level window plus the
 * child controls created through it; all bookkeeping lives in the shared
 * application context, and all native calls go through the platform alias so
 * this module stays portable.
 */

use crate::app::AppContext;
use crate::error::Result;
use crate::platform;
use crate::types::{ButtonOptions, ClickHandler, ControlId, Label, NativeHandle, WindowConfig};

use std::rc::Rc;

use log::debug;

/// One native top-level window.
///
/// Created through [`App::create_window`](crate::App::create_window); the
/// window is visible as soon as construction returns. Dropping the facade
/// does not destroy the native window; call [`Window::close`] for that.
pub struct Window {
    context: Rc<AppContext>,
    handle: NativeHandle,
    width: i32,
    height: i32,
    title: String,
}

impl Window {
    pub(crate) fn create(context: Rc<AppContext>, config: WindowConfig) -> Result<Self> {
        let handle = platform::create_native_window(&context, &config)?;
        context.insert_window(handle);
        debug!(
            "Window: created '{}' ({}x{}) with handle {handle:?}.",
            config.title, config.width, config.height
        );
        Ok(Self {
            context,
            handle,
            width: config.width,
            height: config.height,
            title: config.title,
        })
    }

    /// The opaque native handle backing this window.
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// The title the window was created with; titles are immutable.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Handles of the child controls created on this window, in creation
    /// order.
    pub fn controls(&self) -> Vec<NativeHandle> {
        self.context.controls_of(self.handle)
    }

    /*
     * Creates a native push button at client coordinates (`x`, `y`) and
     * returns its freshly allocated control id. When `handler` is given it
     * is bound to that id and fires on every click; without one the button
     * is inert. Ids are unique per context and never reused, so overlapping
     * or identically labeled buttons are all individually addressable.
     */
    pub fn add_button(
        &self,
        text: &str,
        x: i32,
        y: i32,
        options: ButtonOptions,
        handler: Option<ClickHandler>,
    ) -> Result<ControlId> {
        let control_id = self.context.allocate_control_id();
        let control = platform::create_button(self.handle, control_id, text, x, y, options)?;
        if let Some(handler) = handler {
            self.context.register_handler(control_id, handler);
        }
        self.context.track_control(self.handle, control);
        debug!(
            "Window: created button '{text}' (id {}) on window {:?}.",
            control_id.raw(),
            self.handle
        );
        Ok(control_id)
    }

    /// Appends a text label anchored at (`x`, `y`) and requests a repaint.
    /// The label's position is fixed; only its text can change later, via
    /// [`Window::update_label`] and the index implied by insertion order.
    pub fn add_label(&self, text: &str, x: i32, y: i32) {
        self.context.append_label(
            self.handle,
            Label {
                text: text.to_string(),
                x,
                y,
            },
        );
        platform::request_repaint(self.handle);
    }

    /// Replaces the text of the label at `index` (insertion order) and
    /// requests a repaint. An out-of-range index is a silent no-op and
    /// triggers no repaint.
    pub fn update_label(&self, index: usize, new_text: &str) {
        if self.context.set_label_text(self.handle, index, new_text) {
            platform::request_repaint(self.handle);
        }
    }

    /// Runs the blocking event loop until a window on this thread is
    /// destroyed and the quit signal is posted. All windows created on the
    /// thread are serviced by the same loop.
    pub fn show(&self) -> Result<()> {
        debug!("Window: entering event loop on behalf of {:?}.", self.handle);
        platform::run_message_loop()
    }

    /// Destroys the native window. Tolerant of a handle that has already
    /// been destroyed. Registered handlers and labels are not cleaned up;
    /// ids are context-scoped and remain valid bindings.
    pub fn close(&self) -> Result<()> {
        platform::destroy_native_window(self.handle)
    }
}
