//! The switcher command.
//!
//! One [`SwitcherController::run`] opens the selection list; the host then
//! delivers highlight moves and the final pick as [`SwitcherEvent`]s, which
//! the controller turns back into focus requests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::candidates::{Candidate, CandidateList};
use crate::config::SwitcherConfig;
use crate::host::{
    GroupId, HostEditor, ListMode, SelectionRequest, SurfaceId, SurfaceInfo, ViewId, ViewInfo,
};
use crate::registry::ViewRegistry;

/// Host events routed to the switcher while its list is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherEvent {
    /// The highlighted entry changed. `None` when nothing is highlighted.
    Highlight(Option<usize>),
    /// The list closed. `None` when the user cancelled.
    Select(Option<usize>),
    /// Some surface gained focus.
    SurfaceActivated(SurfaceInfo),
}

/// State of one open switcher list.
#[derive(Debug)]
pub struct Invocation {
    list: CandidateList,
    origin_view: Option<ViewId>,
    origin_group: GroupId,
    initial_index: usize,
    config: SwitcherConfig,
    /// Surface of the selection list, once the host has activated it.
    panel: Arc<Mutex<Option<SurfaceId>>>,
}

impl Invocation {
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        self.list.candidates()
    }

    #[must_use]
    pub fn views(&self) -> &[ViewInfo] {
        self.list.views()
    }

    #[must_use]
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    #[must_use]
    pub fn origin_view(&self) -> Option<ViewId> {
        self.origin_view
    }

    #[must_use]
    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    #[must_use]
    pub fn panel(&self) -> Option<SurfaceId> {
        *self.panel.lock()
    }
}

/// Runs the switcher command against a host editor.
#[derive(Debug)]
pub struct SwitcherController {
    registry: Arc<ViewRegistry>,
    invocation: Option<Invocation>,
}

impl SwitcherController {
    #[must_use]
    pub fn new(registry: Arc<ViewRegistry>) -> Self {
        Self {
            registry,
            invocation: None,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ViewRegistry> {
        &self.registry
    }

    /// The open invocation, if the selection list is showing.
    #[must_use]
    pub fn invocation(&self) -> Option<&Invocation> {
        self.invocation.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.invocation.is_some()
    }

    /// Build the view list and ask the host to show it.
    pub fn run<H: HostEditor + ?Sized>(&mut self, host: &mut H, mode: ListMode) {
        if self.invocation.take().is_some() {
            log::debug!("Replacing open switcher list");
            self.registry.stop_listening();
        }

        let config = SwitcherConfig::from_settings(host.settings());
        let origin_view = host.active_view().map(|view| view.id);
        let origin_group = host.active_group();
        let folders = host.open_folders();
        let views = resolve_view_set(host, mode);

        let mut list = CandidateList::build(views, origin_view, &folders, &config);
        if list.is_empty() {
            log::info!("No views to switch to in {mode} mode");
            return;
        }

        let mut initial_index = list.initial_index();
        if config.sort {
            let highlighted = list.view(initial_index).map(|view| view.id);
            match list.sort_by_label(&config.mark_dirty_file_char, origin_view) {
                Ok(()) => {
                    initial_index = highlighted
                        .and_then(|id| list.position_of(id))
                        .unwrap_or(0);
                }
                Err(err) => log::warn!("Showing views unsorted: {err}"),
            }
        }

        let panel = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&panel);
        self.registry.start_listening(move |surface| {
            *slot.lock() = Some(surface.id);
        });

        let request = SelectionRequest {
            entries: list.candidates().to_vec(),
            initial_index,
            keep_open_on_blur: true,
        };
        log::debug!(
            "Switcher listing {} views in {mode} mode, highlighting {initial_index}",
            list.len()
        );

        self.invocation = Some(Invocation {
            list,
            origin_view,
            origin_group,
            initial_index,
            config,
            panel,
        });
        host.show_selection(request);
    }

    /// Route a host event.
    pub fn handle<H: HostEditor + ?Sized>(&mut self, host: &mut H, event: SwitcherEvent) {
        match event {
            SwitcherEvent::Highlight(index) => self.on_highlight_change(host, index),
            SwitcherEvent::Select(index) => self.on_final_selection(host, index),
            SwitcherEvent::SurfaceActivated(surface) => {
                self.registry.on_activated(surface);
            }
        }
    }

    /// Preview the highlighted view while keeping the list in front.
    pub fn on_highlight_change<H: HostEditor + ?Sized>(
        &mut self,
        host: &mut H,
        index: Option<usize>,
    ) {
        let Some(invocation) = &self.invocation else {
            log::debug!("Ignoring highlight without an open switcher list");
            return;
        };
        if !invocation.config.preview_on_highlight {
            return;
        }
        let Some(view) = index.and_then(|index| invocation.list.view(index)) else {
            if index.is_some() {
                log::warn!("Ignoring highlight of entry {index:?} outside the list");
            }
            return;
        };

        let current_group = host.active_group();
        let target_group = host.group_of(view.id).unwrap_or(view.group);
        if current_group == target_group {
            host.focus_view(view.id);
            return;
        }

        host.focus_group(target_group);
        host.focus_view(view.id);
        host.focus_group(current_group);
        if let Some(panel) = invocation.panel() {
            host.focus_surface(panel);
        }
    }

    /// Close the list: focus the picked view, or restore the original one.
    pub fn on_final_selection<H: HostEditor + ?Sized>(
        &mut self,
        host: &mut H,
        index: Option<usize>,
    ) {
        let Some(invocation) = self.invocation.take() else {
            log::debug!("Ignoring selection without an open switcher list");
            return;
        };
        self.registry.stop_listening();

        if let Some(view) = index.and_then(|index| invocation.list.view(index)) {
            let target_group = host.group_of(view.id).unwrap_or(view.group);
            if host.active_group() != target_group {
                host.focus_group(target_group);
            }
            host.focus_view(view.id);
            return;
        }

        if index.is_some() {
            log::warn!("Selection {index:?} is outside the list; restoring the original view");
        }
        match invocation.origin_view {
            Some(origin) => host.focus_view(origin),
            None => host.focus_group(invocation.origin_group),
        }
    }
}

/// Views to list for `mode`, last tab first.
///
/// Listing in reverse makes moving down the list walk the tabs leftwards.
fn resolve_view_set<H: HostEditor + ?Sized>(host: &H, mode: ListMode) -> Vec<ViewInfo> {
    let mut views = match mode {
        ListMode::ActiveGroup => host.views_in_group(host.active_group()),
        ListMode::Window => Vec::new(),
    };
    if views.is_empty() {
        views = host.views();
    }
    views.reverse();
    views
}
