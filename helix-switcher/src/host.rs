//! The capability surface the switcher needs from its host editor.
//!
//! The switcher never owns views, groups or UI surfaces. It reads plain
//! snapshots of them (`ViewInfo`, `SurfaceInfo`) and asks the host to act
//! through [`HostEditor`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::candidates::Candidate;
use crate::config::Settings;

/// Identity of one open view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

/// Identity of a group (a split region of a window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub usize);

/// Identity of any focusable UI surface, including transient widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Snapshot of one open view, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewInfo {
    pub id: ViewId,
    pub group: GroupId,
    /// Backing file, if the view has been saved to disk.
    pub path: Option<PathBuf>,
    /// Display name for buffers without a file (scratch, output panels).
    pub name: Option<String>,
    pub is_dirty: bool,
}

impl ViewInfo {
    /// Basename of the backing file.
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// The display name, treating an empty name as absent.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A UI surface that just gained focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub id: SurfaceId,
    /// Transient, non-document surface (quick panel, prompt, overlay).
    pub is_widget: bool,
}

/// Which views a switcher invocation lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    /// Every view in the active window.
    #[default]
    Window,
    /// Only views in the active group, falling back to the window when the
    /// group is empty.
    ActiveGroup,
}

impl FromStr for ListMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "window" => Ok(Self::Window),
            "active_group" => Ok(Self::ActiveGroup),
            other => Err(format!("unknown list mode: {other}")),
        }
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window => f.write_str("window"),
            Self::ActiveGroup => f.write_str("active_group"),
        }
    }
}

/// Everything the host needs to open its quick-select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub entries: Vec<Candidate>,
    pub initial_index: usize,
    /// Keep the list open when focus moves to another surface.
    pub keep_open_on_blur: bool,
}

/// Host editor capabilities consumed by the switcher.
///
/// Highlight and selection results are not delivered through this trait:
/// the host routes them back to
/// [`SwitcherController::handle`](crate::SwitcherController::handle) once
/// the user acts on the list.
pub trait HostEditor {
    /// All views of the active window, in tab order.
    fn views(&self) -> Vec<ViewInfo>;

    /// Views of one group, in tab order.
    fn views_in_group(&self, group: GroupId) -> Vec<ViewInfo>;

    fn active_view(&self) -> Option<ViewInfo>;

    fn active_group(&self) -> GroupId;

    fn group_of(&self, view: ViewId) -> Option<GroupId>;

    /// Project folders open in the active window.
    fn open_folders(&self) -> Vec<PathBuf>;

    fn settings(&self) -> &dyn Settings;

    fn show_selection(&mut self, request: SelectionRequest);

    fn focus_view(&mut self, view: ViewId);

    fn focus_group(&mut self, group: GroupId);

    fn focus_surface(&mut self, surface: SurfaceId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_mode_parses_command_arguments() {
        assert_eq!("window".parse::<ListMode>(), Ok(ListMode::Window));
        assert_eq!("active_group".parse::<ListMode>(), Ok(ListMode::ActiveGroup));
        assert!("group".parse::<ListMode>().is_err());
    }

    #[test]
    fn empty_display_name_counts_as_missing() {
        let view = ViewInfo {
            id: ViewId(1),
            group: GroupId(0),
            path: None,
            name: Some(String::new()),
            is_dirty: false,
        };
        assert_eq!(view.display_name(), None);
        assert_eq!(view.file_name(), None);
    }
}
