/*
 * Process-wide control bookkeeping, owned by the application context:
 * click-handler bindings keyed by control id and per-window label lists
 * keyed by the owning window's native handle. The registry owns no native
 * resources, so it compiles and tests on every platform.
 *
 * Labels are addressed by their index in the owner's list at call time.
 * There is no stable label id; removing or reordering labels is not
 * supported, which keeps index addressing valid for the window's lifetime.
 */

use crate::types::{ClickHandler, ControlId, Label, NativeHandle};

use std::collections::HashMap;

use log::debug;

#[derive(Default)]
pub(crate) struct ControlRegistry {
    // ControlId -> click callback. Entries persist until explicitly
    // unregistered; destroying the owning window does not remove them.
    handlers: HashMap<ControlId, ClickHandler>,
    // Window handle -> ordered labels, in creation order.
    labels: HashMap<NativeHandle, Vec<Label>>,
}

impl ControlRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /*
     * Binds `handler` to `control_id`, replacing any previous binding
     * (last write wins). Ids from the context counter are unique, so a
     * replacement only happens when a caller re-registers explicitly.
     */
    pub(crate) fn register_handler(&mut self, control_id: ControlId, handler: ClickHandler) {
        if self.handlers.insert(control_id, handler).is_some() {
            debug!(
                "Registry: replaced existing handler binding for control id {}.",
                control_id.raw()
            );
        }
    }

    /// Removes the binding for `control_id`; returns whether one existed.
    pub(crate) fn unregister_handler(&mut self, control_id: ControlId) -> bool {
        self.handlers.remove(&control_id).is_some()
    }

    /*
     * Looks up the handler bound to `control_id`, cloning the shared
     * callable out of the map. Cloning lets the caller drop its registry
     * borrow before invoking, so a handler may re-enter the API and mutate
     * the registry without aliasing a live borrow.
     */
    pub(crate) fn lookup_handler(&self, control_id: ControlId) -> Option<ClickHandler> {
        self.handlers.get(&control_id).cloned()
    }

    /// Appends `label` to `window`'s list, creating the list on first use.
    /// Returns the zero-based index the label was stored at.
    pub(crate) fn append_label(&mut self, window: NativeHandle, label: Label) -> usize {
        let list = self.labels.entry(window).or_default();
        list.push(label);
        list.len() - 1
    }

    /// The ordered labels of `window`; empty when none were ever added.
    pub(crate) fn labels(&self, window: NativeHandle) -> &[Label] {
        self.labels.get(&window).map(Vec::as_slice).unwrap_or(&[])
    }

    /*
     * Replaces the text of the label at `index` for `window`. Returns false
     * without touching any state when the window has no labels or the index
     * is out of bounds; the caller uses the return value to decide whether a
     * repaint is warranted.
     */
    pub(crate) fn set_label_text(&mut self, window: NativeHandle, index: usize, text: &str) -> bool {
        match self.labels.get_mut(&window).and_then(|list| list.get_mut(index)) {
            Some(label) => {
                label.text = text.to_string();
                true
            }
            None => {
                debug!(
                    "Registry: set_label_text ignored; window {window:?} has no label at index {index}."
                );
                false
            }
        }
    }
}
