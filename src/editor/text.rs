//! Cursor-relative text operations on the input line.
//!
//! All offsets are character offsets. Functions here are pure: they take the
//! current text and cursor and return the new text and cursor, leaving state
//! handling to [`crate::editor::state::EditorState`].
//!
//! # Example
//!
//! ```
//! use linepick::editor::text::{cycle_pattern_prefix, erase_word};
//!
//! assert_eq!(erase_word("foo bar", 7, &[' ']), ("foo ".to_string(), 4));
//! assert_eq!(cycle_pattern_prefix("foo", 3, &[' ']), ("@foo".to_string(), 4));
//! ```

use std::fmt;

/// Delimiters used when none are configured.
pub const DEFAULT_DELIMITERS: &[char] = &[' '];

/// A run of non-delimiter characters around a reference offset.
///
/// `end` is exclusive. An empty span (`start == end`) is produced when there
/// is no word at the reference offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
    pub value: String,
}

impl WordSpan {
    /// Index of the last character of the word, if the span is not empty.
    pub fn last(&self) -> Option<usize> {
        (self.end > self.start).then(|| self.end - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Search term markers, cycled by the pattern command.
///
/// Cycle order is `None → Regex → Inverse → Exact → InverseExact → None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternPrefix {
    /// No marker: fuzzy match.
    None,
    /// `@`: regular expression.
    Regex,
    /// `!`: inverse fuzzy match.
    Inverse,
    /// `=`: exact substring.
    Exact,
    /// `!=`: inverse exact substring.
    InverseExact,
}

impl PatternPrefix {
    /// Markers in cycle order, without `None`.
    ///
    /// No marker may start with a marker that appears after it, so scanning
    /// right to left always finds the longest applicable one.
    pub const MARKERS: [PatternPrefix; 4] = [
        PatternPrefix::Regex,
        PatternPrefix::Inverse,
        PatternPrefix::Exact,
        PatternPrefix::InverseExact,
    ];

    /// Number of distinct states in the cycle, counting `None`.
    pub const CYCLE_LEN: usize = Self::MARKERS.len() + 1;

    pub fn marker(self) -> &'static str {
        match self {
            PatternPrefix::None => "",
            PatternPrefix::Regex => "@",
            PatternPrefix::Inverse => "!",
            PatternPrefix::Exact => "=",
            PatternPrefix::InverseExact => "!=",
        }
    }

    /// Next marker in the cycle, wrapping to `None` after the last.
    pub fn next(self) -> Self {
        match self {
            PatternPrefix::None => PatternPrefix::Regex,
            PatternPrefix::Regex => PatternPrefix::Inverse,
            PatternPrefix::Inverse => PatternPrefix::Exact,
            PatternPrefix::Exact => PatternPrefix::InverseExact,
            PatternPrefix::InverseExact => PatternPrefix::None,
        }
    }

    /// Detects the marker a word starts with, longest first.
    pub fn detect(word: &str) -> Self {
        Self::MARKERS
            .iter()
            .rev()
            .copied()
            .find(|prefix| word.starts_with(prefix.marker()))
            .unwrap_or(PatternPrefix::None)
    }

    /// Splits a word into its marker and the remaining text.
    pub fn split(word: &str) -> (Self, &str) {
        let prefix = Self::detect(word);
        (prefix, &word[prefix.marker().len()..])
    }
}

impl fmt::Display for PatternPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

fn is_delimiter(c: char, delimiters: &[char]) -> bool {
    delimiters.contains(&c)
}

/// Walks left from `pos` to the start of the word, then forward past any
/// delimiters so the result never sits on one.
fn look_backward(chars: &[char], pos: usize, delimiters: &[char]) -> usize {
    let mut start = pos.min(chars.len());
    while start > 0 && !is_delimiter(chars[start - 1], delimiters) {
        start -= 1;
    }
    while start < chars.len() && is_delimiter(chars[start], delimiters) {
        start += 1;
    }
    start
}

/// Walks right from `start` to the end of the word (exclusive), never ending
/// after a delimiter.
fn look_forward(chars: &[char], start: usize, delimiters: &[char]) -> usize {
    let mut end = start;
    while end < chars.len() && !is_delimiter(chars[end], delimiters) {
        end += 1;
    }
    while end > start && is_delimiter(chars[end - 1], delimiters) {
        end -= 1;
    }
    end
}

fn span_at(chars: &[char], pos: usize, delimiters: &[char]) -> WordSpan {
    let start = look_backward(chars, pos, delimiters);
    let end = look_forward(chars, start, delimiters);
    WordSpan {
        start,
        end,
        value: chars[start..end].iter().collect(),
    }
}

fn splice(chars: &[char], start: usize, end: usize, replacement: &str) -> String {
    let mut out: String = chars[..start].iter().collect();
    out.push_str(replacement);
    out.extend(&chars[end..]);
    out
}

/// Returns the word around `pos`.
///
/// Out-of-range offsets are clamped to the end of the text. A text made only
/// of delimiters yields an empty span.
pub fn word_boundaries(text: &str, pos: usize, delimiters: &[char]) -> WordSpan {
    let chars: Vec<char> = text.chars().collect();
    span_at(&chars, pos, delimiters)
}

/// Erases the word to the left of the cursor.
///
/// Delimiters between the cursor and that word are kept. Returns the new text
/// and the cursor, placed where the word started. Nothing is erased when no
/// word precedes the cursor.
pub fn erase_word(text: &str, pos: usize, delimiters: &[char]) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let pos = pos.min(chars.len());

    let mut anchor = pos;
    while anchor > 0 && is_delimiter(chars[anchor - 1], delimiters) {
        anchor -= 1;
    }
    if anchor == 0 {
        return (text.to_string(), pos);
    }

    let start = look_backward(&chars, anchor, delimiters);
    (splice(&chars, start, anchor, ""), start)
}

/// Moves the word under the cursor one step forward in the marker cycle.
///
/// The cursor is placed right after the rewritten word.
pub fn cycle_pattern_prefix(text: &str, pos: usize, delimiters: &[char]) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let span = span_at(&chars, pos, delimiters);

    let (prefix, rest) = PatternPrefix::split(&span.value);
    let word = format!("{}{}", prefix.next().marker(), rest);
    let cursor = span.start + word.chars().count();

    (splice(&chars, span.start, span.end, &word), cursor)
}
