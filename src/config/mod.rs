//! Configuration system for linepick.
//!
//! Settings are read from `~/.config/linepick/config.toml`. Every field has a
//! default, so a missing file yields `Config::default()`. An unreadable or
//! invalid file is an error; the caller decides whether to fall back.
//! Command-line flags override the file.
//!
//! # Example
//!
//! ```
//! use linepick::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.theme, "default-dark");
//! assert_eq!(config.word_delimiters, " ");
//!
//! let custom: Config = toml::from_str(r#"
//!     limit = 50
//!
//!     [keys.down]
//!     "Control-L" = "clear-line"
//! "#).unwrap();
//! assert_eq!(custom.limit, Some(50));
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::input::dispatch::{Bindings, Command};

/// User key bindings, applied over the built-in tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Key-down chords (suppress text insertion)
    #[serde(default)]
    pub down: BTreeMap<String, Command>,

    /// Key-up chords (run after text insertion)
    #[serde(default)]
    pub up: BTreeMap<String, Command>,
}

/// Configuration for the linepick application.
///
/// # Fields
///
/// * `theme` - Color scheme name (default: "default-dark")
/// * `limit` - Maximum number of results shown (default: unlimited)
/// * `word_delimiters` - Characters separating words for word erase and pattern cycling (default: " ")
/// * `completion_sep` - Complete only up to the next occurrence of this separator (default: none)
/// * `accept_input` - Allow accepting the raw input (default: false)
/// * `history_dir` - Directory holding `history.json` (default: platform data dir)
/// * `log_file` - Write logs to this file (default: no logging)
/// * `log_level` - Log level when logging is enabled (default: "info")
/// * `keys` - Extra key bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Color scheme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Maximum number of results shown
    #[serde(default)]
    pub limit: Option<usize>,

    /// Characters treated as word delimiters
    #[serde(default = "default_word_delimiters")]
    pub word_delimiters: String,

    /// Completion separator
    #[serde(default)]
    pub completion_sep: Option<String>,

    /// Allow accepting the raw input
    #[serde(default)]
    pub accept_input: bool,

    /// Directory holding the history file
    #[serde(default)]
    pub history_dir: Option<PathBuf>,

    /// Log file path
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Log level: "error", "warn", "info", "debug" or "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Extra key bindings
    #[serde(default)]
    pub keys: KeyBindingsConfig,
}

/// Returns the default theme name.
fn default_theme() -> String {
    "default-dark".to_string()
}

/// Returns the default word delimiters.
fn default_word_delimiters() -> String {
    " ".to_string()
}

/// Returns the default log level.
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            limit: None,
            word_delimiters: default_word_delimiters(),
            completion_sep: None,
            accept_input: false,
            history_dir: None,
            log_file: None,
            log_level: default_log_level(),
            keys: KeyBindingsConfig::default(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/linepick/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("linepick");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if there is no home directory or
    /// the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but can't be read or isn't valid TOML for
    /// this configuration.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Word delimiters as characters.
    pub fn delimiters(&self) -> Vec<char> {
        self.word_delimiters.chars().collect()
    }

    /// Built-in bindings with this configuration's overrides applied.
    pub fn bindings(&self) -> Bindings {
        Bindings::default().with_overrides(&self.keys.down, &self.keys.up)
    }

    /// Location of the history file.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_dir {
            Some(dir) => Some(dir.join("history.json")),
            None => crate::menu::history::History::default_path(),
        }
    }
}
