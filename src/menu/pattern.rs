//! Search patterns typed into the input line.
//!
//! The input is split into patterns on spaces. A backslash escapes the next
//! character, so `\ ` is a literal space inside a pattern and `\\` a literal
//! backslash. Each pattern may start with a marker selecting how it matches:
//!
//! | Marker | Kind                         |
//! |--------|------------------------------|
//! | none   | fuzzy                        |
//! | `@`    | regular expression           |
//! | `!`    | must not fuzzy-match         |
//! | `=`    | exact substring              |
//! | `!=`   | must not contain substring   |

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::editor::text::PatternPrefix;

/// Literal pattern text with its case sensitivity resolved.
///
/// Smart case: matching ignores case unless the text has an upper-case
/// character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle {
    pub chars: Vec<char>,
    pub ignore_case: bool,
}

impl Needle {
    pub fn new(text: &str) -> Self {
        let ignore_case = !text.chars().any(char::is_uppercase);
        Self {
            chars: text.chars().collect(),
            ignore_case,
        }
    }

    pub fn eq_char(&self, pattern: char, candidate: char) -> bool {
        pattern == candidate || (self.ignore_case && candidate.to_lowercase().eq(pattern.to_lowercase()))
    }
}

/// One parsed pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// A bare marker: matches everything, highlights nothing.
    Any,
    Fuzzy(Needle),
    InverseFuzzy(Needle),
    Exact(Needle),
    InverseExact(Needle),
    Regex(Regex),
}

impl Pattern {
    /// Parses one pattern word.
    ///
    /// Returns `None` for an invalid regular expression, which is then
    /// ignored rather than reported.
    pub fn parse(word: &str) -> Option<Self> {
        let (prefix, text) = PatternPrefix::split(word);
        if text.is_empty() {
            return Some(Pattern::Any);
        }

        let pattern = match prefix {
            PatternPrefix::None => Pattern::Fuzzy(Needle::new(text)),
            PatternPrefix::Inverse => Pattern::InverseFuzzy(Needle::new(text)),
            PatternPrefix::Exact => Pattern::Exact(Needle::new(text)),
            PatternPrefix::InverseExact => Pattern::InverseExact(Needle::new(text)),
            PatternPrefix::Regex => match RegexBuilder::new(text).case_insensitive(true).build() {
                Ok(re) => Pattern::Regex(re),
                Err(e) => {
                    debug!("Ignoring bad pattern {:?}: {}", text, e);
                    return None;
                }
            },
        };
        Some(pattern)
    }
}

/// Splits input into pattern words, honoring backslash escapes.
pub fn split_patterns(input: &str) -> Vec<String> {
    if !input.contains(' ') && !input.contains('\\') {
        return if input.is_empty() {
            Vec::new()
        } else {
            vec![input.to_string()]
        };
    }

    let mut patterns = vec![String::new()];
    let mut chars = input.trim_start().chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next().unwrap_or('\\');
                if let Some(current) = patterns.last_mut() {
                    current.push(escaped);
                }
            }
            ' ' => patterns.push(String::new()),
            _ => {
                if let Some(current) = patterns.last_mut() {
                    current.push(c);
                }
            }
        }
    }

    patterns.retain(|p| !p.is_empty());
    patterns
}

/// Splits and parses the whole input line.
pub fn parse_input(input: &str) -> Vec<Pattern> {
    split_patterns(input)
        .iter()
        .filter_map(|word| Pattern::parse(word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pattern_fast_path() {
        assert_eq!(split_patterns("foo"), vec!["foo"]);
        assert!(split_patterns("").is_empty());
    }

    #[test]
    fn test_split_on_spaces() {
        assert_eq!(split_patterns("foo  bar"), vec!["foo", "bar"]);
        assert_eq!(split_patterns("  foo"), vec!["foo"]);
    }

    #[test]
    fn test_escaped_space_is_literal() {
        assert_eq!(split_patterns(r"foo\ bar baz"), vec!["foo bar", "baz"]);
    }

    #[test]
    fn test_escapes_apply_left_to_right() {
        // `\\ ` is an escaped backslash followed by a separator
        assert_eq!(split_patterns(r"a\\ b"), vec![r"a\", "b"]);
        // `\\\ ` is an escaped backslash followed by an escaped space
        assert_eq!(split_patterns(r"a\\\ b"), vec![r"a\ b"]);
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(split_patterns(r"a\"), vec![r"a\"]);
    }

    #[test]
    fn test_smart_case() {
        assert!(Needle::new("foo").ignore_case);
        assert!(!Needle::new("Foo").ignore_case);
    }

    #[test]
    fn test_parse_kinds() {
        assert!(matches!(Pattern::parse("foo"), Some(Pattern::Fuzzy(_))));
        assert!(matches!(Pattern::parse("!foo"), Some(Pattern::InverseFuzzy(_))));
        assert!(matches!(Pattern::parse("=foo"), Some(Pattern::Exact(_))));
        assert!(matches!(Pattern::parse("!=foo"), Some(Pattern::InverseExact(_))));
        assert!(matches!(Pattern::parse("@fo+"), Some(Pattern::Regex(_))));
        assert!(matches!(Pattern::parse("!="), Some(Pattern::Any)));
    }

    #[test]
    fn test_bad_regex_is_dropped() {
        assert!(Pattern::parse("@(").is_none());
        assert_eq!(parse_input("@( foo").len(), 1);
    }
}
