/*
 * Application context and public entry point. `AppContext` is the explicit
 * owner of all process-wide mutable state: the control registry, the map
 * from native handle to per-window bookkeeping, and the monotonic control-id
 * counter. Windows hold an `Rc` to the context, and the platform binding
 * smuggles another one into the window procedure through the creation
 * parameter, so no ambient globals exist and two contexts never share state.
 *
 * The context is single-threaded on purpose. `Rc` plus interior mutability
 * makes it `!Send`, which pins every window and handler to the thread that
 * created the context, matching the native windowing affinity rules without
 * any locking.
 */

#[cfg(any(target_os = "windows", test))]
use crate::dispatch::{Dispatch, WindowProcedure};
#[cfg(any(target_os = "windows", test))]
use crate::painting::{self, Surface};

use crate::error::Result;
use crate::registry::ControlRegistry;
use crate::types::{ClickHandler, ControlId, Label, NativeHandle, WindowConfig};
use crate::window::Window;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};

// First id handed to a child control; every later control gets the next
// integer, with no reuse for the lifetime of the context.
const CONTROL_ID_BASE: i32 = 1000;

/// Owner of the windowing state for one application.
///
/// Create one `App`, then create windows from it. Dropping the `App` does
/// not tear down live native windows; they keep the shared context alive.
pub struct App {
    context: Rc<AppContext>,
}

impl App {
    pub fn new() -> Self {
        Self {
            context: Rc::new(AppContext::new()),
        }
    }

    /// Creates a native top-level window, visible immediately.
    ///
    /// Fails with `PlatformError::UnsupportedPlatform` on hosts without
    /// Win32 support.
    pub fn create_window(&self, config: WindowConfig) -> Result<Window> {
        Window::create(Rc::clone(&self.context), config)
    }

    /// Removes the click-handler binding for `control_id`, if any.
    /// Returns whether a binding existed. Bindings are otherwise kept for
    /// the lifetime of the context, even after their window is destroyed.
    pub fn unregister_handler(&self, control_id: ControlId) -> bool {
        self.context.unregister_handler(control_id)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// Per-window bookkeeping kept alongside the handle map entry.
#[derive(Default)]
struct WindowState {
    // Child control handles, in creation order. The window owns these; the
    // OS destroys them together with their parent.
    controls: Vec<NativeHandle>,
}

pub(crate) struct AppContext {
    registry: RefCell<ControlRegistry>,
    windows: RefCell<HashMap<NativeHandle, WindowState>>,
    next_control_id: Cell<i32>,
}

impl AppContext {
    fn new() -> Self {
        Self {
            registry: RefCell::new(ControlRegistry::new()),
            windows: RefCell::new(HashMap::new()),
            next_control_id: Cell::new(CONTROL_ID_BASE),
        }
    }

    /// Hands out the next control id. Ids are unique per context and are
    /// never reclaimed, so a destroyed window cannot alias a live binding.
    pub(crate) fn allocate_control_id(&self) -> ControlId {
        let id = self.next_control_id.get();
        self.next_control_id.set(id + 1);
        ControlId::new(id)
    }

    /*
     * Registers a freshly created native window in the handle map. Exactly
     * one insert per construction; the matching removal happens once, when
     * the platform binding sees the window's final teardown message.
     */
    pub(crate) fn insert_window(&self, window: NativeHandle) {
        if self
            .windows
            .borrow_mut()
            .insert(window, WindowState::default())
            .is_some()
        {
            warn!("App: window {window:?} was already present in the handle map.");
        } else {
            debug!("App: window {window:?} registered.");
        }
    }

    #[cfg(any(target_os = "windows", test))]
    pub(crate) fn remove_window(&self, window: NativeHandle) -> bool {
        let removed = self.windows.borrow_mut().remove(&window).is_some();
        if removed {
            debug!("App: window {window:?} removed from the handle map.");
        } else {
            warn!("App: removal requested for unknown window {window:?}.");
        }
        removed
    }

    #[cfg(any(target_os = "windows", test))]
    pub(crate) fn window_registered(&self, window: NativeHandle) -> bool {
        self.windows.borrow().contains_key(&window)
    }

    /// Records a child control handle under its owning window.
    pub(crate) fn track_control(&self, window: NativeHandle, control: NativeHandle) {
        match self.windows.borrow_mut().get_mut(&window) {
            Some(state) => state.controls.push(control),
            None => warn!("App: cannot track control {control:?}; window {window:?} is unknown."),
        }
    }

    /// Snapshot of the child control handles of `window`, creation order.
    pub(crate) fn controls_of(&self, window: NativeHandle) -> Vec<NativeHandle> {
        self.windows
            .borrow()
            .get(&window)
            .map(|state| state.controls.clone())
            .unwrap_or_default()
    }

    pub(crate) fn register_handler(&self, control_id: ControlId, handler: ClickHandler) {
        self.registry.borrow_mut().register_handler(control_id, handler);
    }

    pub(crate) fn unregister_handler(&self, control_id: ControlId) -> bool {
        self.registry.borrow_mut().unregister_handler(control_id)
    }

    pub(crate) fn append_label(&self, window: NativeHandle, label: Label) -> usize {
        self.registry.borrow_mut().append_label(window, label)
    }

    pub(crate) fn set_label_text(&self, window: NativeHandle, index: usize, text: &str) -> bool {
        self.registry.borrow_mut().set_label_text(window, index, text)
    }
}

/*
 * The window procedure, in portable form. The Win32 router reduces each raw
 * message to one of these calls and translates the outcome back into an
 * LRESULT. Handlers are cloned out of the registry before they run, so a
 * handler may re-enter the context (add buttons, add labels) freely.
 */
#[cfg(any(target_os = "windows", test))]
impl WindowProcedure for AppContext {
    fn handle_destroy(&self, window: NativeHandle) -> Dispatch {
        debug!("Dispatcher: destroy notification for window {window:?}; requesting quit.");
        Dispatch::Quit
    }

    fn handle_command(&self, window: NativeHandle, control: ControlId) -> Dispatch {
        let handler = self.registry.borrow().lookup_handler(control);
        match handler {
            Some(handler) => {
                log::trace!(
                    "Dispatcher: invoking handler for control {} on window {window:?}.",
                    control.raw()
                );
                handler();
            }
            None => {
                log::trace!(
                    "Dispatcher: no handler bound to control {} on window {window:?}; ignoring.",
                    control.raw()
                );
            }
        }
        // Commands are always reported handled, bound or not, so the OS
        // never re-routes a recognized click to the default procedure.
        Dispatch::Handled
    }

    fn handle_paint(&self, window: NativeHandle, surface: &mut dyn Surface) -> Dispatch {
        if !self.window_registered(window) {
            return Dispatch::Forward;
        }
        let registry = self.registry.borrow();
        let labels = registry.labels(window);
        log::trace!("Dispatcher: painting {} label(s) for window {window:?}.", labels.len());
        painting::render_labels(labels, surface);
        Dispatch::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn window(raw: isize) -> NativeHandle {
        NativeHandle::new(raw)
    }

    fn counting_handler() -> (ClickHandler, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let count_in_handler = Rc::clone(&count);
        let handler: ClickHandler = Rc::new(move || {
            count_in_handler.set(count_in_handler.get() + 1);
        });
        (handler, count)
    }

    #[derive(Default)]
    struct RecordingSurface {
        draws: Vec<(String, i32, i32)>,
    }

    impl Surface for RecordingSurface {
        fn draw_text(&mut self, text: &str, x: i32, y: i32) {
            self.draws.push((text.to_string(), x, y));
        }
    }

    #[test]
    fn control_ids_start_at_1000_and_increase_without_reuse() {
        // Arrange
        let context = AppContext::new();
        // Act
        let first = context.allocate_control_id();
        let second = context.allocate_control_id();
        let third = context.allocate_control_id();
        // Assert
        assert_eq!(first, ControlId::new(1000));
        assert_eq!(second, ControlId::new(1001));
        assert_eq!(third, ControlId::new(1002));
    }

    #[test]
    fn separate_contexts_allocate_independently() {
        let first_context = AppContext::new();
        let second_context = AppContext::new();
        assert_eq!(first_context.allocate_control_id(), ControlId::new(1000));
        assert_eq!(second_context.allocate_control_id(), ControlId::new(1000));
    }

    #[test]
    fn window_map_insert_and_remove_happen_exactly_once() {
        let context = AppContext::new();
        context.insert_window(window(1));

        assert!(context.window_registered(window(1)));
        assert!(context.remove_window(window(1)));
        assert!(!context.window_registered(window(1)));
        assert!(!context.remove_window(window(1)));
    }

    #[test]
    fn tracked_controls_are_reported_in_creation_order() {
        let context = AppContext::new();
        context.insert_window(window(1));
        context.track_control(window(1), window(100));
        context.track_control(window(1), window(101));

        assert_eq!(context.controls_of(window(1)), vec![window(100), window(101)]);
        assert!(context.controls_of(window(2)).is_empty());
    }

    #[test]
    fn command_dispatch_invokes_the_bound_handler_exactly_once() {
        // Arrange: the two-button scenario; 1000 is bound, 1001 is not.
        let context = AppContext::new();
        let ok_id = context.allocate_control_id();
        let cancel_id = context.allocate_control_id();
        let (handler, count) = counting_handler();
        context.register_handler(ok_id, handler);
        // Act
        let bound = context.handle_command(window(1), ok_id);
        let unbound = context.handle_command(window(1), cancel_id);
        // Assert
        assert_eq!(bound, Dispatch::Handled);
        assert_eq!(unbound, Dispatch::Handled);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn handlers_may_reenter_the_context() {
        // A handler that mutates the registry while dispatch is running must
        // not conflict with the dispatch-time borrow.
        let context = Rc::new(AppContext::new());
        let id = context.allocate_control_id();
        let context_in_handler = Rc::clone(&context);
        context.register_handler(
            id,
            Rc::new(move || {
                context_in_handler.append_label(
                    window(1),
                    Label {
                        text: "from handler".to_string(),
                        x: 0,
                        y: 0,
                    },
                );
            }),
        );

        assert_eq!(context.handle_command(window(1), id), Dispatch::Handled);

        let mut surface = RecordingSurface::default();
        context.insert_window(window(1));
        context.handle_paint(window(1), &mut surface);
        assert_eq!(surface.draws, vec![("from handler".to_string(), 0, 0)]);
    }

    #[test]
    fn unregistered_handlers_no_longer_fire() {
        let context = AppContext::new();
        let id = context.allocate_control_id();
        let (handler, count) = counting_handler();
        context.register_handler(id, handler);

        assert!(context.unregister_handler(id));
        assert!(!context.unregister_handler(id));
        context.handle_command(window(1), id);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn app_unregister_without_binding_reports_false() {
        let app = App::new();
        assert!(!app.unregister_handler(ControlId::new(1000)));
    }

    #[test]
    fn destroy_dispatch_requests_quit() {
        let context = AppContext::new();
        assert_eq!(context.handle_destroy(window(1)), Dispatch::Quit);
    }

    #[test]
    fn paint_draws_the_window_labels_in_order() {
        // Arrange: the label scenario; add two labels, then retitle one.
        let context = AppContext::new();
        context.insert_window(window(1));
        context.append_label(
            window(1),
            Label {
                text: "Hello".to_string(),
                x: 5,
                y: 5,
            },
        );
        context.append_label(
            window(1),
            Label {
                text: "World".to_string(),
                x: 5,
                y: 40,
            },
        );
        assert!(context.set_label_text(window(1), 0, "Hi"));
        // Act
        let mut surface = RecordingSurface::default();
        let outcome = context.handle_paint(window(1), &mut surface);
        // Assert
        assert_eq!(outcome, Dispatch::Handled);
        assert_eq!(
            surface.draws,
            vec![
                ("Hi".to_string(), 5, 5),
                ("World".to_string(), 5, 40),
            ]
        );
    }

    #[test]
    fn paint_of_an_unknown_window_is_forwarded() {
        let context = AppContext::new();
        let mut surface = RecordingSurface::default();
        assert_eq!(context.handle_paint(window(7), &mut surface), Dispatch::Forward);
        assert!(surface.draws.is_empty());
    }

    #[test]
    fn out_of_range_label_update_changes_nothing() {
        let context = AppContext::new();
        context.insert_window(window(1));
        context.append_label(
            window(1),
            Label {
                text: "Hello".to_string(),
                x: 5,
                y: 5,
            },
        );

        assert!(!context.set_label_text(window(1), 3, "ignored"));

        let mut surface = RecordingSurface::default();
        context.handle_paint(window(1), &mut surface);
        assert_eq!(surface.draws, vec![("Hello".to_string(), 5, 5)]);
    }
}
