//! Error type for switcher operations.

use std::path::PathBuf;

/// Errors raised by the switcher library.
///
/// Most failures during an invocation are local: they are logged and the
/// invocation either focuses a view or is cancelled. The variants below are
/// the ones a caller can observe directly.
#[derive(Debug, thiserror::Error)]
pub enum SwitcherError {
    /// A sorted label could not be paired back to any remaining view.
    #[error("no open view matches the label {label:?}")]
    NoMatchingView { label: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = SwitcherError> = std::result::Result<T, E>;
