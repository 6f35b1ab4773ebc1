//! Chord to command dispatch tables.
//!
//! Bindings are split by key phase. Key-down commands replace the key's
//! default handling (text insertion); key-up commands run after it. A key-up
//! with no binding falls back to sending the current text to the backend.
//!
//! # Example
//!
//! ```
//! use linepick::input::dispatch::{Bindings, Command};
//! use linepick::input::keys::KeyPhase;
//!
//! let bindings = Bindings::default();
//! let chord = "Control-W".parse().unwrap();
//! assert_eq!(bindings.lookup(KeyPhase::Down, &chord), Some(Command::EraseWord));
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::keys::{KeyChord, KeyPhase};

/// Commands a chord can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Replace the input with the backend's completion
    Complete,
    /// Replace the input with the previous history entry
    HistoryPrev,
    /// Replace the input with the next history entry
    HistoryNext,
    /// Select the next result
    Next,
    /// Select the previous result
    Prev,
    /// Empty the input line
    ClearLine,
    /// Erase the word left of the cursor
    EraseWord,
    /// Replace the input with the selected result
    YankSelected,
    /// Cycle the pattern marker of the word under the cursor
    CyclePattern,
    /// Accept the selected result
    AcceptSelected,
    /// Accept the raw input
    AcceptInput,
    /// Quit without a result
    Dismiss,
    /// Swallow the key
    Noop,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::Complete => "complete",
            Command::HistoryPrev => "history-prev",
            Command::HistoryNext => "history-next",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::ClearLine => "clear-line",
            Command::EraseWord => "erase-word",
            Command::YankSelected => "yank-selected",
            Command::CyclePattern => "cycle-pattern",
            Command::AcceptSelected => "accept-selected",
            Command::AcceptInput => "accept-input",
            Command::Dismiss => "dismiss",
            Command::Noop => "noop",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of dispatching a key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A command ran; the key's default handling must be suppressed.
    Handled,
    /// No binding; the host applies its default handling.
    Default,
}

const DEFAULT_KEY_DOWN: &[(&str, Command)] = &[
    ("Tab", Command::Complete),
    ("Control-P", Command::HistoryPrev),
    ("Control-N", Command::HistoryNext),
    ("Control-J", Command::Next),
    ("Control-K", Command::Prev),
    ("Down", Command::Next),
    ("Up", Command::Prev),
    ("Control-U", Command::ClearLine),
    ("Control-W", Command::EraseWord),
    ("Control-Y", Command::YankSelected),
    ("Control-R", Command::CyclePattern),
];

const DEFAULT_KEY_UP: &[(&str, Command)] = &[
    ("Enter", Command::AcceptSelected),
    ("Escape", Command::Dismiss),
    ("Control-Enter", Command::AcceptInput),
    ("Alt-Enter", Command::AcceptInput),
    // History navigation must not be undone by the default `enter`
    ("Control-P", Command::Noop),
    ("Control-N", Command::Noop),
];

fn table(entries: &[(&str, Command)]) -> HashMap<KeyChord, Command> {
    entries
        .iter()
        .filter_map(|(chord, command)| chord.parse().ok().map(|c| (c, *command)))
        .collect()
}

/// Key-down and key-up binding tables.
///
/// Built once at startup and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    down: HashMap<KeyChord, Command>,
    up: HashMap<KeyChord, Command>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            down: table(DEFAULT_KEY_DOWN),
            up: table(DEFAULT_KEY_UP),
        }
    }
}

impl Bindings {
    /// Creates empty tables.
    pub fn empty() -> Self {
        Self {
            down: HashMap::new(),
            up: HashMap::new(),
        }
    }

    /// Adds or replaces a binding.
    pub fn bind(mut self, phase: KeyPhase, chord: KeyChord, command: Command) -> Self {
        match phase {
            KeyPhase::Down => self.down.insert(chord, command),
            KeyPhase::Up => self.up.insert(chord, command),
        };
        self
    }

    /// Applies user bindings, skipping (and logging) invalid chords.
    ///
    /// Overrides apply in key order. When two spellings name the same chord
    /// (`"Ctrl-W"` and `"Control-W"`), the first one wins and the other is
    /// ignored with a warning.
    pub fn with_overrides(
        mut self,
        down: &BTreeMap<String, Command>,
        up: &BTreeMap<String, Command>,
    ) -> Self {
        for (phase, overrides) in [(KeyPhase::Down, down), (KeyPhase::Up, up)] {
            let mut seen = HashSet::new();
            for (spelling, command) in overrides {
                let chord: KeyChord = match spelling.parse() {
                    Ok(chord) => chord,
                    Err(e) => {
                        warn!("Ignoring key binding for {}: {}", command, e);
                        continue;
                    }
                };
                if !seen.insert(chord.clone()) {
                    warn!("Ignoring duplicate key binding {:?} for {}", spelling, chord);
                    continue;
                }
                self = self.bind(phase, chord, *command);
            }
        }
        self
    }

    /// Looks up the command bound to a chord in one phase.
    pub fn lookup(&self, phase: KeyPhase, chord: &KeyChord) -> Option<Command> {
        match phase {
            KeyPhase::Down => self.down.get(chord).copied(),
            KeyPhase::Up => self.up.get(chord).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::Modifiers;

    fn chord(s: &str) -> KeyChord {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_tables_parse_completely() {
        let bindings = Bindings::default();
        assert_eq!(bindings.down.len(), DEFAULT_KEY_DOWN.len());
        assert_eq!(bindings.up.len(), DEFAULT_KEY_UP.len());
    }

    #[test]
    fn test_phases_are_separate() {
        let bindings = Bindings::default();
        assert_eq!(bindings.lookup(KeyPhase::Down, &chord("Enter")), None);
        assert_eq!(
            bindings.lookup(KeyPhase::Up, &chord("Enter")),
            Some(Command::AcceptSelected)
        );
        assert_eq!(
            bindings.lookup(KeyPhase::Down, &chord("Control-P")),
            Some(Command::HistoryPrev)
        );
        assert_eq!(
            bindings.lookup(KeyPhase::Up, &chord("Control-P")),
            Some(Command::Noop)
        );
    }

    #[test]
    fn test_lookup_by_normalized_code() {
        let bindings = Bindings::default();
        let normalized = KeyChord::from_code('r' as u32, Modifiers::CONTROL);
        assert_eq!(
            bindings.lookup(KeyPhase::Down, &normalized),
            Some(Command::CyclePattern)
        );
    }

    #[test]
    fn test_overrides_replace_and_add() {
        let mut down = BTreeMap::new();
        down.insert("Control-W".to_string(), Command::ClearLine);
        down.insert("Alt-B".to_string(), Command::EraseWord);
        let bindings = Bindings::default().with_overrides(&down, &BTreeMap::new());

        assert_eq!(
            bindings.lookup(KeyPhase::Down, &chord("Control-W")),
            Some(Command::ClearLine)
        );
        assert_eq!(
            bindings.lookup(KeyPhase::Down, &chord("Alt-B")),
            Some(Command::EraseWord)
        );
    }

    #[test]
    fn test_invalid_override_is_skipped() {
        let mut up = BTreeMap::new();
        up.insert("Control-".to_string(), Command::Dismiss);
        let bindings = Bindings::default().with_overrides(&BTreeMap::new(), &up);
        assert_eq!(bindings, Bindings::default());
    }

    #[test]
    fn test_duplicate_spelling_keeps_first_in_order() {
        let mut down = BTreeMap::new();
        down.insert("Control-W".to_string(), Command::ClearLine);
        down.insert("Ctrl-W".to_string(), Command::Complete);
        let bindings = Bindings::default().with_overrides(&down, &BTreeMap::new());

        assert_eq!(
            bindings.lookup(KeyPhase::Down, &chord("Ctrl-W")),
            Some(Command::ClearLine)
        );
    }

    #[test]
    fn test_duplicates_are_per_phase() {
        let mut down = BTreeMap::new();
        down.insert("Control-G".to_string(), Command::ClearLine);
        let mut up = BTreeMap::new();
        up.insert("Ctrl-G".to_string(), Command::Dismiss);
        let bindings = Bindings::default().with_overrides(&down, &up);

        assert_eq!(
            bindings.lookup(KeyPhase::Down, &chord("Control-G")),
            Some(Command::ClearLine)
        );
        assert_eq!(
            bindings.lookup(KeyPhase::Up, &chord("Control-G")),
            Some(Command::Dismiss)
        );
    }

    #[test]
    fn test_command_names_match_serde() {
        let json = serde_json::to_string(&Command::HistoryPrev).unwrap();
        assert_eq!(json, format!("\"{}\"", Command::HistoryPrev.name()));
    }
}
