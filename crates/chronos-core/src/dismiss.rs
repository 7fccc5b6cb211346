//! Dismiss listeners scoped to the popover's open lifetime.
//!
//! The host registers document-level pointer and key listeners while the
//! popover is open and removes them when it closes. This type records which
//! listeners are live so the widget can ignore dismiss input outside that
//! window.

use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerKind {
    /// Pointer-down anywhere outside the widget.
    OutsidePointer,
    /// Escape key-press.
    Escape,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DismissListeners {
    active: Vec<ListenerKind>,
}

impl DismissListeners {
    /// Register both listeners. Registering twice is a no-op.
    pub fn register(&mut self) {
        if self.active.is_empty() {
            self.active = vec![ListenerKind::OutsidePointer, ListenerKind::Escape];
            debug!("dismiss listeners registered");
        }
    }

    /// Drop every registered listener.
    pub fn cleanup(&mut self) {
        if !self.active.is_empty() {
            self.active.clear();
            debug!("dismiss listeners removed");
        }
    }

    pub fn is_active(&self, kind: ListenerKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn active(&self) -> &[ListenerKind] {
        &self.active
    }
}
