//! In-memory host editor.
//!
//! `MemoryHost` keeps a flat list of views split across groups and records
//! every request the switcher makes, which is enough to drive the switcher
//! from the `hxs` binary and from tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::Table;

use crate::config::Settings;
use crate::error::{Result, SwitcherError};
use crate::host::{GroupId, HostEditor, SelectionRequest, SurfaceId, ViewId, ViewInfo};

/// A focus change requested through [`HostEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    View(ViewId),
    Group(GroupId),
    Surface(SurfaceId),
}

/// Session description loaded from TOML.
///
/// `active_group` only matters when `active_view` is absent; an active view
/// always brings its own group forward.
///
/// ```toml
/// folders = ["/home/me/project"]
/// active_view = 2
///
/// [[views]]
/// id = 1
/// path = "/home/me/project/src/main.rs"
///
/// [[views]]
/// id = 2
/// group = 1
/// name = "scratch"
/// dirty = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Session {
    pub folders: Vec<PathBuf>,
    pub active_view: Option<ViewId>,
    pub active_group: Option<GroupId>,
    pub views: Vec<SessionView>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionView {
    pub id: ViewId,
    #[serde(default)]
    pub group: GroupId,
    pub path: Option<PathBuf>,
    pub name: Option<String>,
    #[serde(default)]
    pub dirty: bool,
}

impl From<SessionView> for ViewInfo {
    fn from(view: SessionView) -> Self {
        Self {
            id: view.id,
            group: view.group,
            path: view.path,
            name: view.name,
            is_dirty: view.dirty,
        }
    }
}

impl Session {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SwitcherError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<Session>(&content).map_err(|source| SwitcherError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Host editor backed by plain collections.
#[derive(Debug, Default)]
pub struct MemoryHost {
    views: Vec<ViewInfo>,
    folders: Vec<PathBuf>,
    settings: Table,
    active_group: GroupId,
    /// Last focused view of each group.
    group_focus: HashMap<GroupId, ViewId>,
    focused_surface: Option<SurfaceId>,
    focus_log: Vec<FocusAction>,
    requests: Vec<SelectionRequest>,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_session(session: Session, settings: Table) -> Self {
        let mut host = Self {
            folders: session.folders,
            settings,
            ..Self::default()
        };
        for view in session.views {
            host.add_view(view.into());
        }
        let active_view = match session.active_view {
            Some(id) if host.view(id).is_some() => Some(id),
            Some(id) => {
                log::warn!("Session activates unknown {id}");
                None
            }
            None => None,
        };
        match (active_view, session.active_group) {
            (Some(id), Some(group)) => {
                host.activate(id);
                if host.active_group != group {
                    log::warn!("Session activates {id} outside {group}; using its group");
                }
            }
            (Some(id), None) => host.activate(id),
            (None, Some(group)) => host.active_group = group,
            (None, None) => {}
        }
        host
    }

    /// Add a view. The first view of a group becomes that group's focus.
    pub fn add_view(&mut self, view: ViewInfo) {
        self.group_focus.entry(view.group).or_insert(view.id);
        self.views.push(view);
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewInfo) -> Self {
        self.add_view(view);
        self
    }

    #[must_use]
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folders.push(folder.into());
        self
    }

    #[must_use]
    pub fn with_setting(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    /// Make a view active without recording a focus action.
    #[must_use]
    pub fn with_active(mut self, id: ViewId) -> Self {
        self.activate(id);
        self
    }

    fn activate(&mut self, id: ViewId) {
        if let Some(group) = self.view(id).map(|view| view.group) {
            self.active_group = group;
            self.group_focus.insert(group, id);
            self.focused_surface = None;
        }
    }

    #[must_use]
    pub fn view(&self, id: ViewId) -> Option<&ViewInfo> {
        self.views.iter().find(|view| view.id == id)
    }

    /// Surface holding keyboard focus, if it is not a view.
    #[must_use]
    pub fn focused_surface(&self) -> Option<SurfaceId> {
        self.focused_surface
    }

    #[must_use]
    pub fn focus_log(&self) -> &[FocusAction] {
        &self.focus_log
    }

    pub fn clear_focus_log(&mut self) {
        self.focus_log.clear();
    }

    /// Every selection request received so far.
    #[must_use]
    pub fn requests(&self) -> &[SelectionRequest] {
        &self.requests
    }

    #[must_use]
    pub fn last_request(&self) -> Option<&SelectionRequest> {
        self.requests.last()
    }
}

impl HostEditor for MemoryHost {
    fn views(&self) -> Vec<ViewInfo> {
        self.views.clone()
    }

    fn views_in_group(&self, group: GroupId) -> Vec<ViewInfo> {
        self.views
            .iter()
            .filter(|view| view.group == group)
            .cloned()
            .collect()
    }

    fn active_view(&self) -> Option<ViewInfo> {
        self.group_focus
            .get(&self.active_group)
            .and_then(|&id| self.view(id))
            .cloned()
    }

    fn active_group(&self) -> GroupId {
        self.active_group
    }

    fn group_of(&self, view: ViewId) -> Option<GroupId> {
        self.view(view).map(|view| view.group)
    }

    fn open_folders(&self) -> Vec<PathBuf> {
        self.folders.clone()
    }

    fn settings(&self) -> &dyn Settings {
        &self.settings
    }

    fn show_selection(&mut self, request: SelectionRequest) {
        log::debug!(
            "Showing {} entries, highlighting {}",
            request.entries.len(),
            request.initial_index
        );
        self.requests.push(request);
    }

    fn focus_view(&mut self, view: ViewId) {
        self.focus_log.push(FocusAction::View(view));
        if self.view(view).is_none() {
            log::warn!("Cannot focus unknown {view}");
            return;
        }
        self.activate(view);
    }

    fn focus_group(&mut self, group: GroupId) {
        self.focus_log.push(FocusAction::Group(group));
        self.active_group = group;
        self.focused_surface = None;
    }

    fn focus_surface(&mut self, surface: SurfaceId) {
        self.focus_log.push(FocusAction::Surface(surface));
        self.focused_surface = Some(surface);
    }
}
