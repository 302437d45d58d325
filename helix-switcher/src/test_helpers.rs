//! Test helpers for switcher tests.
//!
//! Provides view builders and a ready-wired controller/host pair so scenario
//! tests can read as a sequence of host events.

use std::sync::Arc;

use crate::host::{GroupId, ListMode, SurfaceId, SurfaceInfo, ViewId, ViewInfo};
use crate::memory::MemoryHost;
use crate::registry::ViewRegistry;
use crate::{SwitcherController, SwitcherEvent};

/// Surface id the fake selection list reports when activated.
pub const PANEL: SurfaceId = SurfaceId(100);

/// A clean file-backed view in group 0.
pub fn file_view(id: u64, path: &str) -> ViewInfo {
    ViewInfo {
        id: ViewId(id),
        group: GroupId(0),
        path: Some(path.into()),
        name: None,
        is_dirty: false,
    }
}

/// A clean named buffer in group 0.
pub fn named_view(id: u64, name: &str) -> ViewInfo {
    ViewInfo {
        id: ViewId(id),
        group: GroupId(0),
        path: None,
        name: Some(name.to_string()),
        is_dirty: false,
    }
}

/// A clean, unnamed, unsaved view in group 0.
pub fn untitled_view(id: u64) -> ViewInfo {
    ViewInfo {
        id: ViewId(id),
        group: GroupId(0),
        path: None,
        name: None,
        is_dirty: false,
    }
}

/// Builder-style adjustments for test views.
pub trait ViewBuilder {
    #[must_use]
    fn dirty(self) -> Self;
    #[must_use]
    fn in_group(self, group: usize) -> Self;
}

impl ViewBuilder for ViewInfo {
    fn dirty(mut self) -> Self {
        self.is_dirty = true;
        self
    }

    fn in_group(mut self, group: usize) -> Self {
        self.group = GroupId(group);
        self
    }
}

/// A controller with its own registry.
pub fn controller() -> SwitcherController {
    SwitcherController::new(Arc::new(ViewRegistry::new()))
}

/// Run the switcher and simulate the host activating its selection list.
pub fn open(controller: &mut SwitcherController, host: &mut MemoryHost, mode: ListMode) {
    controller.run(host, mode);
    controller.handle(
        host,
        SwitcherEvent::SurfaceActivated(SurfaceInfo {
            id: PANEL,
            is_widget: true,
        }),
    );
}

/// Labels of the last selection request.
pub fn shown_labels(host: &MemoryHost) -> Vec<String> {
    host.last_request()
        .map(|request| request.entries.iter().map(|entry| entry.label.clone()).collect())
        .unwrap_or_default()
}

/// Id of the host's active view.
pub fn active_id(host: &MemoryHost) -> Option<u64> {
    use crate::host::HostEditor;

    host.active_view().map(|view| view.id.0)
}
