//! Key normalization: raw key presses to canonical chords.
//!
//! A raw key press is a platform key code plus four modifier flags. It is
//! normalized into a [`KeyChord`] whose string form concatenates the modifier
//! prefixes in a fixed order (`Control-`, `Alt-`, `Shift-`, `Meta-`) followed
//! by the key name, e.g. `"Control-W"` or `"Control-Shift-J"`.
//!
//! # Example
//!
//! ```
//! use linepick::input::keys::{KeyChord, Modifiers};
//!
//! let chord = KeyChord::from_code(87, Modifiers::CONTROL);
//! assert_eq!(chord.to_string(), "Control-W");
//! ```

use std::fmt;
use std::str::FromStr;

/// Key code hosts use for printable keys that have no code of their own.
pub const UNIDENTIFIED: u32 = 0;
pub const BACKSPACE: u32 = 8;
pub const TAB: u32 = 9;
pub const ENTER: u32 = 13;
pub const SHIFT: u32 = 16;
pub const CONTROL: u32 = 17;
pub const ALT: u32 = 18;
pub const ESCAPE: u32 = 27;
pub const PAGE_UP: u32 = 33;
pub const PAGE_DOWN: u32 = 34;
pub const END: u32 = 35;
pub const HOME: u32 = 36;
pub const LEFT: u32 = 37;
pub const UP: u32 = 38;
pub const RIGHT: u32 = 39;
pub const DOWN: u32 = 40;
pub const DELETE: u32 = 46;
pub const META: u32 = 91;

/// Closed table of named (non-printable) keys.
const NAMED_KEYS: &[(u32, &str)] = &[
    (UNIDENTIFIED, "Unidentified"),
    (BACKSPACE, "Backspace"),
    (TAB, "Tab"),
    (ENTER, "Enter"),
    (SHIFT, "Shift"),
    (CONTROL, "Control"),
    (ALT, "Alt"),
    (ESCAPE, "Escape"),
    (PAGE_UP, "PageUp"),
    (PAGE_DOWN, "PageDown"),
    (END, "End"),
    (HOME, "Home"),
    (LEFT, "Left"),
    (UP, "Up"),
    (RIGHT, "Right"),
    (DOWN, "Down"),
    (DELETE, "Delete"),
    (META, "Meta"),
];

/// Modifier flags held down during a key press.
///
/// Order independent by construction: a chord with both `ctrl` and `shift`
/// set is the same chord no matter which flag was set first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };
    pub const CONTROL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    /// Creates modifiers from the four raw flags.
    pub fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }

    /// Returns the union of both modifier sets.
    pub fn with(self, other: Modifiers) -> Self {
        Self {
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            shift: self.shift || other.shift,
            meta: self.meta || other.meta,
        }
    }
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// A raw key event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Platform key code.
    pub key_code: u32,
    pub modifiers: Modifiers,
    pub phase: KeyPhase,
}

impl KeyEvent {
    pub fn new(key_code: u32, modifiers: Modifiers, phase: KeyPhase) -> Self {
        Self {
            key_code,
            modifiers,
            phase,
        }
    }

    /// Normalizes this event into its chord.
    pub fn chord(&self) -> KeyChord {
        KeyChord::from_code(self.key_code, self.modifiers)
    }
}

/// Resolves a key code into a key name.
///
/// Named keys come from a closed table; any other code falls back to the
/// upper-cased character with that code point. Codes that are not valid
/// characters resolve to `"Unidentified"`.
///
/// # Example
///
/// ```
/// use linepick::input::keys::key_name;
///
/// assert_eq!(key_name(13), "Enter");
/// assert_eq!(key_name(119), "W");
/// ```
pub fn key_name(code: u32) -> String {
    if let Some((_, name)) = NAMED_KEYS.iter().find(|(c, _)| *c == code) {
        return (*name).to_string();
    }

    match char::from_u32(code) {
        Some(c) => c.to_uppercase().collect(),
        None => "Unidentified".to_string(),
    }
}

/// Canonical identity of a key press: modifier set plus key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub modifiers: Modifiers,
    pub key: String,
}

impl KeyChord {
    /// Creates a chord from a modifier set and an already resolved key name.
    pub fn new(modifiers: Modifiers, key: impl Into<String>) -> Self {
        Self {
            modifiers,
            key: key.into(),
        }
    }

    /// Normalizes a raw key code plus modifiers.
    pub fn from_code(code: u32, modifiers: Modifiers) -> Self {
        Self::new(modifiers, key_name(code))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Control-")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt-")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift-")?;
        }
        if self.modifiers.meta {
            f.write_str("Meta-")?;
        }
        f.write_str(&self.key)
    }
}

/// Errors produced when parsing a chord from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordParseError {
    /// The chord string was empty.
    Empty,
    /// Modifiers were given but no key followed them.
    MissingKey { chord: String },
    /// A modifier was given twice.
    DuplicateModifier { chord: String, modifier: String },
}

impl fmt::Display for ChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordParseError::Empty => write!(f, "Empty key chord"),
            ChordParseError::MissingKey { chord } => {
                write!(f, "Key chord '{}' has no key after its modifiers", chord)
            }
            ChordParseError::DuplicateModifier { chord, modifier } => {
                write!(f, "Key chord '{}' repeats modifier '{}'", chord, modifier)
            }
        }
    }
}

impl std::error::Error for ChordParseError {}

impl FromStr for KeyChord {
    type Err = ChordParseError;

    /// Parses `"Control-Shift-J"` style strings.
    ///
    /// Modifiers may appear in any order and are matched case-insensitively
    /// (`Ctrl` is accepted for `Control`). Single character keys are
    /// upper-cased so `"Control-w"` and `"Control-W"` are the same chord.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChordParseError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        let mut rest = s;

        loop {
            let Some((head, tail)) = rest.split_once('-') else {
                break;
            };
            // "Control--" binds the '-' key itself
            if head.is_empty() {
                break;
            }

            let flag = match head.to_ascii_lowercase().as_str() {
                "control" | "ctrl" => &mut modifiers.ctrl,
                "alt" => &mut modifiers.alt,
                "shift" => &mut modifiers.shift,
                "meta" => &mut modifiers.meta,
                _ => break,
            };
            if *flag {
                return Err(ChordParseError::DuplicateModifier {
                    chord: s.to_string(),
                    modifier: head.to_string(),
                });
            }
            *flag = true;
            rest = tail;
        }

        if rest.is_empty() {
            return Err(ChordParseError::MissingKey {
                chord: s.to_string(),
            });
        }

        let key = if rest.chars().count() == 1 {
            rest.to_uppercase()
        } else {
            rest.to_string()
        };

        Ok(Self::new(modifiers, key))
    }
}
