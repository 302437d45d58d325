//! Helix Switcher - a quick-select list of open views.
//!
//! The switcher lists the views of the active window (or of its active
//! group), lets the user move through them while each highlighted view is
//! previewed, and focuses the one picked. Cancelling restores the view that
//! was active before.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use helix_switcher::memory::{MemoryHost, Session};
//! use helix_switcher::{ListMode, SwitcherController, SwitcherEvent, ViewRegistry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let session = Session::load_from("session.toml".as_ref())?;
//!     let mut host = MemoryHost::from_session(session, toml::Table::new());
//!     let mut switcher = SwitcherController::new(Arc::new(ViewRegistry::new()));
//!
//!     switcher.run(&mut host, ListMode::Window);
//!     switcher.handle(&mut host, SwitcherEvent::Select(Some(0)));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The switcher never owns editor state. Hosts implement [`HostEditor`] and
//! forward their UI events as [`SwitcherEvent`]s:
//!
//! 1. `run` snapshots the views, builds the labels and asks the host to show
//!    its selection list
//! 2. the host reports the list's surface activation, highlight moves and the
//!    final pick through `handle`
//! 3. the controller answers with `focus_*` calls on the host

pub mod candidates;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod memory;
pub mod registry;

#[cfg(test)]
mod test_helpers;

// Convenience re-exports
pub use candidates::{Candidate, CandidateList};
pub use config::{AppConfig, Settings, SwitcherConfig};
pub use controller::{Invocation, SwitcherController, SwitcherEvent};
pub use error::SwitcherError;
pub use host::{
    GroupId, HostEditor, ListMode, SelectionRequest, SurfaceId, SurfaceInfo, ViewId, ViewInfo,
};
pub use registry::ViewRegistry;
