//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use helix_switcher::ListMode;

/// Open the view switcher over a session file and replay list events.
#[derive(Debug, Parser)]
#[command(name = "hxs", version, about)]
pub struct Args {
    /// Session file describing the open views.
    pub session: PathBuf,

    /// Configuration file (defaults to `<config dir>/helix/switcher.toml`).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Which views to list: `window` or `active_group`.
    #[arg(long, default_value_t = ListMode::Window)]
    pub mode: ListMode,

    /// Move the highlight to an entry; may be repeated.
    #[arg(long = "highlight", value_name = "INDEX")]
    pub highlights: Vec<usize>,

    /// Confirm an entry and close the list.
    #[arg(long, value_name = "INDEX", conflicts_with = "cancel")]
    pub pick: Option<usize>,

    /// Dismiss the list without picking.
    #[arg(long)]
    pub cancel: bool,
}

impl Args {
    /// The final list event, if one was requested.
    pub fn selection(&self) -> Option<Option<usize>> {
        if self.cancel {
            Some(None)
        } else {
            self.pick.map(Some)
        }
    }
}
