//! Candidate list construction.
//!
//! Everything here is pure: the controller feeds in view snapshots from the
//! host and gets back the labels to display together with the view list they
//! are index-aligned with.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::config::SwitcherConfig;
use crate::error::{Result, SwitcherError};
use crate::host::{ViewId, ViewInfo};

/// Appended to the label of the view that was active when the switcher opened.
pub const CURRENT_VIEW_SUFFIX: &str = " (Current View)";

/// Label for views with neither a file nor a name.
pub const UNTITLED: &str = "Untitled";

/// One row of the selection list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidate {
    pub label: String,
    /// Folder-relative path, empty when not shown.
    pub path_hint: String,
}

/// Candidates and the views they stand for, kept index-aligned.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    candidates: Vec<Candidate>,
    views: Vec<ViewInfo>,
    /// 1-based position of the active view, if it was listed.
    current_tab_index: Option<usize>,
}

impl CandidateList {
    /// Build the list from views in display order.
    pub fn build(
        views: impl IntoIterator<Item = ViewInfo>,
        active: Option<ViewId>,
        folders: &[PathBuf],
        config: &SwitcherConfig,
    ) -> Self {
        let mut list = Self::default();

        for (position, view) in (1..).zip(views) {
            let is_current = active == Some(view.id);
            if is_current && config.skip_current_file {
                continue;
            }
            if is_current {
                list.current_tab_index = Some(position);
            }

            let path_hint = match &view.path {
                Some(path) if config.show_full_file_path => path_hint(path, folders),
                _ => String::new(),
            };
            let label = label(&view, is_current, &config.mark_dirty_file_char);

            list.candidates.push(Candidate { label, path_hint });
            list.views.push(view);
        }

        list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn views(&self) -> &[ViewInfo] {
        &self.views
    }

    #[must_use]
    pub fn view(&self, index: usize) -> Option<&ViewInfo> {
        self.views.get(index)
    }

    #[must_use]
    pub fn position_of(&self, id: ViewId) -> Option<usize> {
        self.views.iter().position(|view| view.id == id)
    }

    #[must_use]
    pub fn current_tab_index(&self) -> Option<usize> {
        self.current_tab_index
    }

    /// Index to highlight when the list opens.
    ///
    /// The entry two places before the active one, counting 1-based, is
    /// picked so that invoking the switcher repeatedly toggles between the
    /// two most recent views. When the active view is first or not listed
    /// the first entry is highlighted.
    #[must_use]
    pub fn initial_index(&self) -> usize {
        let index = match self.current_tab_index {
            Some(position) if position >= 2 => position - 2,
            _ => 0,
        };
        index.min(self.len().saturating_sub(1))
    }

    /// Sort candidates by label and realign the views with them.
    ///
    /// The list is left untouched when a label cannot be paired back to a view.
    pub fn sort_by_label(&mut self, marker: &str, active: Option<ViewId>) -> Result<()> {
        let mut sorted = self.candidates.clone();
        sorted.sort_by(|a, b| a.label.cmp(&b.label));
        let views = reconcile_after_sort(&sorted, &self.views, marker, active)?;

        self.candidates = sorted;
        self.views = views;
        Ok(())
    }

    /// Split into the candidate and view lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Candidate>, Vec<ViewInfo>) {
        (self.candidates, self.views)
    }
}

/// Display label for a view.
#[must_use]
pub fn label(view: &ViewInfo, is_current: bool, marker: &str) -> String {
    let base = base_label(view);
    let mut label = decorated(&base, view.is_dirty, marker).into_owned();
    if is_current {
        label.push_str(CURRENT_VIEW_SUFFIX);
    }
    label
}

fn base_label(view: &ViewInfo) -> Cow<'_, str> {
    if let Some(file_name) = view.file_name() {
        Cow::Owned(file_name)
    } else if let Some(name) = view.display_name() {
        Cow::Borrowed(name)
    } else {
        Cow::Borrowed(UNTITLED)
    }
}

fn decorated<'a>(base: &'a str, is_dirty: bool, marker: &str) -> Cow<'a, str> {
    if is_dirty && !marker.is_empty() {
        Cow::Owned(format!("{base}{marker}"))
    } else {
        Cow::Borrowed(base)
    }
}

/// Path relative to the first open folder containing it.
///
/// Empty when no folder contains the path.
#[must_use]
pub fn path_hint(path: &Path, folders: &[PathBuf]) -> String {
    folders
        .iter()
        .find_map(|folder| path.strip_prefix(folder).ok())
        .map(|relative| relative.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pair label-sorted candidates back with the views they were built from.
///
/// Each label is matched against the not-yet-matched views in their original
/// order and the first match is taken, so views sharing a label keep their
/// relative order and no view is assigned twice.
pub fn reconcile_after_sort(
    candidates: &[Candidate],
    views: &[ViewInfo],
    marker: &str,
    active: Option<ViewId>,
) -> Result<Vec<ViewInfo>> {
    let mut pool: Vec<&ViewInfo> = views.iter().collect();
    let mut matched = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let position = pool
            .iter()
            .position(|view| candidate_matches(candidate, view, marker, active))
            .ok_or_else(|| SwitcherError::NoMatchingView {
                label: candidate.label.clone(),
            })?;
        matched.push(pool.remove(position).clone());
    }

    Ok(matched)
}

fn candidate_matches(
    candidate: &Candidate,
    view: &ViewInfo,
    marker: &str,
    active: Option<ViewId>,
) -> bool {
    let is_current = active == Some(view.id);
    // Non-active views can be named with the suffix themselves.
    let label = match candidate.label.strip_suffix(CURRENT_VIEW_SUFFIX) {
        Some(stripped) if is_current => stripped,
        _ if !is_current => candidate.label.as_str(),
        _ => return false,
    };

    match &view.path {
        Some(path) => {
            let label = strip_directory_fragment(label, path);
            let hint_matches =
                candidate.path_hint.is_empty() || path.ends_with(&candidate.path_hint);
            hint_matches && label == decorated(&base_label(view), view.is_dirty, marker)
        }
        None => label == decorated(&base_label(view), view.is_dirty, marker),
    }
}

/// Remove a `" - <parent dir>"` fragment some labels carry for disambiguation.
fn strip_directory_fragment<'a>(label: &'a str, path: &Path) -> Cow<'a, str> {
    let Some(parent) = path.parent() else {
        return Cow::Borrowed(label);
    };
    let fragment = format!(" - {}", parent.display());
    if label.contains(&fragment) {
        Cow::Owned(label.replace(&fragment, ""))
    } else {
        Cow::Borrowed(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{file_view, named_view, untitled_view, ViewBuilder};

    fn labels(list: &CandidateList) -> Vec<&str> {
        list.candidates().iter().map(|c| c.label.as_str()).collect()
    }

    fn ids(views: &[ViewInfo]) -> Vec<u64> {
        views.iter().map(|view| view.id.0).collect()
    }

    #[test]
    fn labels_cover_files_named_and_untitled_views() {
        let views = vec![
            file_view(1, "/proj/src/main.rs").dirty(),
            named_view(2, "scratch").dirty(),
            untitled_view(3),
            untitled_view(4).dirty(),
        ];
        let list = CandidateList::build(views, Some(ViewId(3)), &[], &SwitcherConfig::default());

        assert_eq!(
            labels(&list),
            ["main.rs*", "scratch*", "Untitled (Current View)", "Untitled*"]
        );
    }

    #[test]
    fn dirty_marker_precedes_current_suffix() {
        let views = vec![named_view(1, "notes").dirty()];
        let list = CandidateList::build(views, Some(ViewId(1)), &[], &SwitcherConfig::default());
        assert_eq!(labels(&list), ["notes* (Current View)"]);
    }

    #[test]
    fn empty_name_is_untitled() {
        let views = vec![named_view(1, "")];
        let list = CandidateList::build(views, None, &[], &SwitcherConfig::default());
        assert_eq!(labels(&list), [UNTITLED]);
    }

    #[test]
    fn skip_current_file_omits_active_view() {
        let config = SwitcherConfig {
            skip_current_file: true,
            ..SwitcherConfig::default()
        };
        let views = vec![
            file_view(1, "/a.txt"),
            file_view(2, "/b.txt"),
            file_view(3, "/c.txt"),
        ];
        let list = CandidateList::build(views, Some(ViewId(2)), &[], &config);

        assert_eq!(labels(&list), ["a.txt", "c.txt"]);
        assert_eq!(ids(list.views()), [1, 3]);
        assert_eq!(list.current_tab_index(), None);
        assert_eq!(list.initial_index(), 0);
    }

    #[test]
    fn path_hint_uses_first_matching_folder() {
        let folders = vec![PathBuf::from("/proj"), PathBuf::from("/proj/src")];
        assert_eq!(path_hint(Path::new("/proj/src/lib.rs"), &folders), "src/lib.rs");
        assert_eq!(path_hint(Path::new("/elsewhere/lib.rs"), &folders), "");
    }

    #[test]
    fn path_hint_matches_whole_components() {
        let folders = vec![PathBuf::from("/proj")];
        assert_eq!(path_hint(Path::new("/project/lib.rs"), &folders), "");
    }

    #[test]
    fn path_hint_only_when_enabled() {
        let folders = vec![PathBuf::from("/proj")];
        let views = || vec![file_view(1, "/proj/src/lib.rs"), named_view(2, "scratch")];

        let hidden = CandidateList::build(views(), None, &folders, &SwitcherConfig::default());
        assert!(hidden.candidates().iter().all(|c| c.path_hint.is_empty()));

        let config = SwitcherConfig {
            show_full_file_path: true,
            ..SwitcherConfig::default()
        };
        let shown = CandidateList::build(views(), None, &folders, &config);
        let hints: Vec<_> = shown.candidates().iter().map(|c| c.path_hint.as_str()).collect();
        assert_eq!(hints, ["src/lib.rs", ""]);
    }

    #[test]
    fn initial_index_jumps_back_from_current() {
        let views = vec![
            file_view(1, "/a"),
            file_view(2, "/b"),
            file_view(3, "/c"),
            file_view(4, "/d"),
        ];
        let list = CandidateList::build(views, Some(ViewId(4)), &[], &SwitcherConfig::default());
        assert_eq!(list.current_tab_index(), Some(4));
        assert_eq!(list.initial_index(), 2);
    }

    #[test]
    fn initial_index_is_first_entry_when_current_is_first() {
        let views = vec![file_view(1, "/a"), file_view(2, "/b")];
        let list = CandidateList::build(views, Some(ViewId(1)), &[], &SwitcherConfig::default());
        assert_eq!(list.current_tab_index(), Some(1));
        assert_eq!(list.initial_index(), 0);
    }

    #[test]
    fn initial_index_of_empty_list_is_zero() {
        let list = CandidateList::build(Vec::new(), None, &[], &SwitcherConfig::default());
        assert!(list.is_empty());
        assert_eq!(list.initial_index(), 0);
    }

    #[test]
    fn sort_keeps_views_aligned() {
        let views = vec![
            file_view(1, "/c.txt"),
            named_view(2, "b"),
            file_view(3, "/a.txt").dirty(),
        ];
        let mut list =
            CandidateList::build(views, Some(ViewId(1)), &[], &SwitcherConfig::default());
        list.sort_by_label("*", Some(ViewId(1))).expect("sort should reconcile");

        assert_eq!(labels(&list), ["a.txt*", "b", "c.txt (Current View)"]);
        assert_eq!(ids(list.views()), [3, 2, 1]);
    }

    #[test]
    fn sort_is_idempotent() {
        let views = vec![
            file_view(1, "/x/main.rs"),
            untitled_view(2),
            file_view(3, "/y/main.rs").dirty(),
            named_view(4, "Untitled"),
            file_view(5, "/z/alpha.rs"),
        ];
        let mut list =
            CandidateList::build(views, Some(ViewId(5)), &[], &SwitcherConfig::default());
        list.sort_by_label("*", Some(ViewId(5))).expect("first sort");
        let once = (labels(&list).join("|"), ids(list.views()));

        list.sort_by_label("*", Some(ViewId(5))).expect("second sort");
        let twice = (labels(&list).join("|"), ids(list.views()));

        assert_eq!(once, twice);
    }

    #[test]
    fn dirty_state_disambiguates_shared_basenames() {
        // "foo.txt" sorts before "foo.txt*": the clean view must not be
        // claimed by the dirty one's label.
        let views = vec![file_view(1, "/x/foo.txt").dirty(), file_view(2, "/y/foo.txt")];
        let mut list = CandidateList::build(views, None, &[], &SwitcherConfig::default());
        list.sort_by_label("*", None).expect("sort should reconcile");

        assert_eq!(labels(&list), ["foo.txt", "foo.txt*"]);
        assert_eq!(ids(list.views()), [2, 1]);
    }

    #[test]
    fn current_suffix_disambiguates_shared_basenames() {
        let views = vec![file_view(1, "/x/a.txt"), file_view(2, "/y/a.txt")];
        let mut list =
            CandidateList::build(views, Some(ViewId(1)), &[], &SwitcherConfig::default());
        list.sort_by_label("*", Some(ViewId(1))).expect("sort should reconcile");

        assert_eq!(labels(&list), ["a.txt", "a.txt (Current View)"]);
        assert_eq!(ids(list.views()), [2, 1]);
    }

    #[test]
    fn names_ending_in_current_suffix_still_sort() {
        let views = vec![
            named_view(1, "zeta"),
            named_view(2, "log (Current View)"),
            named_view(3, "alpha"),
        ];
        let mut list =
            CandidateList::build(views, Some(ViewId(3)), &[], &SwitcherConfig::default());
        list.sort_by_label("*", Some(ViewId(3))).expect("sort should reconcile");

        assert_eq!(labels(&list), ["alpha (Current View)", "log (Current View)", "zeta"]);
        assert_eq!(ids(list.views()), [3, 2, 1]);
    }

    #[test]
    fn reconcile_strips_directory_fragment() {
        let views = vec![file_view(1, "/proj/src/lib.rs")];
        let candidates = vec![Candidate {
            label: "lib.rs - /proj/src".to_string(),
            path_hint: String::new(),
        }];
        let matched = reconcile_after_sort(&candidates, &views, "*", None).expect("should match");
        assert_eq!(ids(&matched), [1]);
    }

    #[test]
    fn reconcile_fails_on_unknown_label() {
        let views = vec![file_view(1, "/a.txt")];
        let candidates = vec![Candidate {
            label: "b.txt".to_string(),
            path_hint: String::new(),
        }];
        let err = reconcile_after_sort(&candidates, &views, "*", None).expect_err("should fail");
        assert!(matches!(err, SwitcherError::NoMatchingView { ref label } if label == "b.txt"));
    }

    #[test]
    fn reconcile_assigns_each_view_once() {
        let views = vec![file_view(1, "/a.txt")];
        let candidate = Candidate {
            label: "a.txt".to_string(),
            path_hint: String::new(),
        };
        let result = reconcile_after_sort(&[candidate.clone(), candidate], &views, "*", None);
        assert!(result.is_err());
    }

    #[test]
    fn failed_sort_leaves_list_untouched() {
        let views = vec![file_view(2, "/b.txt"), file_view(1, "/a.txt")];
        let mut list = CandidateList::build(views, None, &[], &SwitcherConfig::default());
        // b.txt was built as a plain entry, so it cannot pair with a view
        // reported as active.
        let result = list.sort_by_label("*", Some(ViewId(2)));

        assert!(result.is_err());
        assert_eq!(labels(&list), ["b.txt", "a.txt"]);
        assert_eq!(ids(list.views()), [2, 1]);
    }
}
