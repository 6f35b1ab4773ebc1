//! Persistent input history.
//!
//! History is stored as a JSON object mapping a history key to its entries,
//! oldest first. Each key holds at most [`MAX_HISTORY_ENTRIES`] distinct
//! entries. Without a key, history is disabled and navigation returns
//! nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const MAX_HISTORY_ENTRIES: usize = 100;

/// History entries for one key, with a navigation cursor.
#[derive(Debug, Clone, Default)]
pub struct History {
    path: Option<PathBuf>,
    key: Option<String>,
    all_entries: BTreeMap<String, Vec<String>>,
    entries: Vec<String>,
    index: usize,
}

impl History {
    /// History that stores nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Default location of the history file: `<data dir>/linepick/history.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|mut path| {
            path.push("linepick");
            path.push("history.json");
            path
        })
    }

    /// Loads the entries stored under `key`.
    ///
    /// A missing file is treated as empty history. An empty key disables
    /// history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>, key: &str) -> Result<Self> {
        if key.is_empty() {
            return Ok(Self::disabled());
        }

        let path = path.into();
        let all_entries: BTreeMap<String, Vec<String>> = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read history file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid history file {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        let entries = all_entries.get(key).cloned().unwrap_or_default();
        let index = entries.len();

        Ok(Self {
            path: Some(path),
            key: Some(key.to_string()),
            all_entries,
            entries,
            index,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Steps back to the previous (older) entry, stopping at the oldest.
    pub fn prev(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        self.index = self.index.saturating_sub(1);
        self.entries.get(self.index).cloned()
    }

    /// Steps forward to the next (newer) entry. Returns `None` once past the
    /// newest entry.
    pub fn next(&mut self) -> Option<String> {
        self.index = (self.index + 1).min(self.entries.len());
        self.entries.get(self.index).cloned()
    }

    /// Records an entry as the newest and saves the file.
    ///
    /// Empty entries and disabled history are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be written.
    pub fn add(&mut self, entry: &str) -> Result<()> {
        let Some(key) = self.key.clone() else {
            return Ok(());
        };
        if entry.is_empty() {
            return Ok(());
        }

        self.entries.retain(|e| e != entry);
        self.entries.push(entry.to_string());
        if self.entries.len() > MAX_HISTORY_ENTRIES {
            let excess = self.entries.len() - MAX_HISTORY_ENTRIES;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len();

        self.all_entries.insert(key, self.entries.clone());
        self.save()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&self.all_entries)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write history file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_disabled_history() {
        let mut history = History::disabled();
        assert!(!history.is_enabled());
        assert_eq!(history.prev(), None);
        assert_eq!(history.next(), None);
        history.add("foo").unwrap();
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_empty_key_disables() {
        let dir = TempDir::new().unwrap();
        let history = History::open(dir.path().join("h.json"), "").unwrap();
        assert!(!history.is_enabled());
    }

    #[test]
    fn test_navigation() {
        let dir = TempDir::new().unwrap();
        let mut history = History::open(dir.path().join("h.json"), "k").unwrap();
        history.add("one").unwrap();
        history.add("two").unwrap();

        assert_eq!(history.prev().as_deref(), Some("two"));
        assert_eq!(history.prev().as_deref(), Some("one"));
        assert_eq!(history.prev().as_deref(), Some("one"));
        assert_eq!(history.next().as_deref(), Some("two"));
        assert_eq!(history.next(), None);
    }

    #[test]
    fn test_add_deduplicates_and_caps() {
        let dir = TempDir::new().unwrap();
        let mut history = History::open(dir.path().join("h.json"), "k").unwrap();
        for i in 0..(MAX_HISTORY_ENTRIES + 5) {
            history.add(&format!("entry {}", i)).unwrap();
        }
        history.add("entry 10").unwrap();

        assert_eq!(history.entries().len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries().last().map(String::as_str), Some("entry 10"));
        assert_eq!(
            history.entries().iter().filter(|e| *e == "entry 10").count(),
            1
        );
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        fs::write(&path, "not json").unwrap();
        assert!(History::open(&path, "k").is_err());
    }
}
