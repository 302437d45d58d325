//! Switcher configuration.
//!
//! Two layers live here:
//! - [`Settings`], the flat key-value store the host exposes, and the
//!   [`SwitcherConfig`] snapshot resolved from it once per invocation.
//! - [`AppConfig`], loaded by the `hxs` driver from `~/.config/helix/switcher.toml`,
//!   which carries logging settings and a raw `[switcher]` table that is
//!   handed to the host as its settings store.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::{Table, Value};

use crate::error::{Result, SwitcherError};

/// Omit the active view from the list.
pub const SKIP_CURRENT_FILE: &str = "skip_current_file";
/// Suffix appended to labels of views with unsaved changes.
pub const MARK_DIRTY_FILE_CHAR: &str = "mark_dirty_file_char";
/// Show the folder-relative path next to the basename.
pub const SHOW_FULL_FILE_PATH: &str = "show_full_file_path";
/// Alphabetize the list.
pub const SORT: &str = "sort";
/// Focus views while the highlight moves, not only on the final pick.
pub const PREVIEW_ON_HIGHLIGHT: &str = "preview_on_highlight";

/// Read-only key-value settings store owned by the host.
pub trait Settings {
    fn get(&self, key: &str) -> Option<Value>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl Settings for Table {
    fn get(&self, key: &str) -> Option<Value> {
        Table::get(self, key).cloned()
    }

    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Settings resolved for one switcher invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherConfig {
    pub skip_current_file: bool,
    pub mark_dirty_file_char: String,
    pub show_full_file_path: bool,
    pub sort: bool,
    pub preview_on_highlight: bool,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            skip_current_file: false,
            mark_dirty_file_char: "*".to_string(),
            show_full_file_path: false,
            sort: false,
            preview_on_highlight: true,
        }
    }
}

impl SwitcherConfig {
    /// Resolve a snapshot from a settings store.
    ///
    /// Missing keys fall back to the defaults. Keys holding a value of the
    /// wrong type are reported and also fall back.
    pub fn from_settings(settings: &dyn Settings) -> Self {
        let defaults = Self::default();
        Self {
            skip_current_file: read_bool(settings, SKIP_CURRENT_FILE, defaults.skip_current_file),
            mark_dirty_file_char: read_string(
                settings,
                MARK_DIRTY_FILE_CHAR,
                defaults.mark_dirty_file_char,
            ),
            show_full_file_path: read_bool(
                settings,
                SHOW_FULL_FILE_PATH,
                defaults.show_full_file_path,
            ),
            sort: read_bool(settings, SORT, defaults.sort),
            preview_on_highlight: read_bool(
                settings,
                PREVIEW_ON_HIGHLIGHT,
                defaults.preview_on_highlight,
            ),
        }
    }
}

fn read_bool(settings: &dyn Settings, key: &str, default: bool) -> bool {
    match settings.get(key) {
        Some(Value::Boolean(value)) => value,
        Some(other) => {
            log::warn!(
                "Setting {key} expects a boolean, got {}; using {default}",
                other.type_str()
            );
            default
        }
        None => {
            log::debug!("Setting {key} is not configured; using {default}");
            default
        }
    }
}

fn read_string(settings: &dyn Settings, key: &str, default: String) -> String {
    match settings.get(key) {
        Some(Value::String(value)) => value,
        Some(other) => {
            log::warn!(
                "Setting {key} expects a string, got {}; using {default:?}",
                other.type_str()
            );
            default
        }
        None => {
            log::debug!("Setting {key} is not configured; using {default:?}");
            default
        }
    }
}

/// Configuration file of the `hxs` driver.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    /// Raw switcher settings, served to the host as its settings store.
    pub switcher: Table,
}

/// Log lines hidden unless the config lists its own patterns: one line per
/// unset key on every invocation.
pub const DEFAULT_SUPPRESSED_PATTERNS: &[&str] = &["is not configured; using"];

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub level: String,
    pub suppressed_patterns: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: Some(std::env::temp_dir().join("helix-switcher.log")),
            level: "info".to_string(),
            suppressed_patterns: DEFAULT_SUPPRESSED_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl AppConfig {
    /// Default location of the configuration file, if a home directory is known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        use etcetera::BaseStrategy;

        etcetera::choose_base_strategy()
            .ok()
            .map(|strategy| strategy.config_dir().join("helix").join("switcher.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Falls back to defaults if the file doesn't exist.
    /// Returns an error only if the file exists but is unreadable or malformed.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SwitcherError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<AppConfig>(&content).map_err(|source| SwitcherError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set one switcher setting.
    #[must_use]
    pub fn with_setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.switcher.insert(key.to_string(), value.into());
        self
    }

    /// Set the log file path.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.logging.log_file = Some(path.into());
        self
    }

    /// Set the log level (e.g., "info", "debug", "warn").
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}
