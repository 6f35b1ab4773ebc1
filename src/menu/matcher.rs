//! Matching, ranking and highlighting of candidate lines.
//!
//! A line matches when every pattern matches it. Each pattern contributes
//! `length * 10000 + line_length` to the rank, where `length` is the span the
//! pattern covered; lower ranks sort first and ties keep input order.

use std::collections::BTreeSet;

use super::pattern::{Needle, Pattern};
use crate::protocol::MatchSpan;

const LENGTH_WEIGHT: usize = 10_000;

/// A line that matched, by index into the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    pub index: usize,
    pub rank: usize,
    /// Highlighted character offsets, sorted.
    pub highlights: Vec<usize>,
}

/// Outcome of one pattern against one line.
struct PatternMatch {
    length: usize,
    indices: Vec<usize>,
}

/// Shortest window of `line` containing the needle's characters in order.
fn fuzzy_window(line: &[char], needle: &Needle) -> Option<Vec<usize>> {
    let (&first, rest) = needle.chars.split_first()?;
    let mut best: Option<Vec<usize>> = None;

    for start in 0..line.len() {
        if !needle.eq_char(first, line[start]) {
            continue;
        }

        let mut indices = vec![start];
        let mut pos = start + 1;
        for &c in rest {
            match (pos..line.len()).find(|&i| needle.eq_char(c, line[i])) {
                Some(i) => {
                    indices.push(i);
                    pos = i + 1;
                }
                // No later start can succeed either
                None => return best,
            }
        }

        let width = pos - start;
        if best.as_ref().map_or(true, |b| width < window_width(b)) {
            best = Some(indices);
            if width == needle.chars.len() {
                break;
            }
        }
    }

    best
}

fn window_width(indices: &[usize]) -> usize {
    match (indices.first(), indices.last()) {
        (Some(first), Some(last)) => last - first + 1,
        _ => 0,
    }
}

fn find_substring(line: &[char], needle: &Needle) -> Option<usize> {
    let n = needle.chars.len();
    if n > line.len() {
        return None;
    }
    (0..=line.len() - n).find(|&start| {
        needle
            .chars
            .iter()
            .zip(&line[start..start + n])
            .all(|(&p, &c)| needle.eq_char(p, c))
    })
}

fn match_pattern(pattern: &Pattern, line: &str, chars: &[char]) -> Option<PatternMatch> {
    let whole = || PatternMatch {
        length: chars.len(),
        indices: Vec::new(),
    };

    match pattern {
        Pattern::Any => Some(whole()),
        Pattern::Fuzzy(needle) => fuzzy_window(chars, needle).map(|indices| PatternMatch {
            length: window_width(&indices),
            indices,
        }),
        Pattern::InverseFuzzy(needle) => fuzzy_window(chars, needle).is_none().then(whole),
        Pattern::Exact(needle) => find_substring(chars, needle).map(|start| PatternMatch {
            length: needle.chars.len(),
            indices: (start..start + needle.chars.len()).collect(),
        }),
        Pattern::InverseExact(needle) => find_substring(chars, needle).is_none().then(whole),
        Pattern::Regex(re) => re.find(line).map(|m| {
            let start = line[..m.start()].chars().count();
            let length = m.as_str().chars().count();
            PatternMatch {
                length,
                indices: (start..start + length).collect(),
            }
        }),
    }
}

/// Scores one line against all patterns.
pub fn score(line: &str, patterns: &[Pattern]) -> Option<(usize, Vec<usize>)> {
    let chars: Vec<char> = line.chars().collect();
    let mut rank = 0;
    let mut highlights = BTreeSet::new();

    for pattern in patterns {
        let m = match_pattern(pattern, line, &chars)?;
        rank += m.length * LENGTH_WEIGHT + chars.len();
        highlights.extend(m.indices);
    }

    Some((rank, highlights.into_iter().collect()))
}

/// Filters and ranks `lines`.
pub fn rank(lines: &[String], patterns: &[Pattern]) -> Vec<Scored> {
    let mut scored: Vec<Scored> = lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            score(line, patterns).map(|(rank, highlights)| Scored {
                index,
                rank,
                highlights,
            })
        })
        .collect();
    scored.sort_by_key(|s| s.rank);
    scored
}

/// Splits a line into alternating unmatched/matched partitions.
///
/// The last partition always has an empty matched part and holds whatever
/// follows the final highlight.
pub fn partitions(line: &str, highlights: &[usize]) -> Vec<MatchSpan> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut last_end = 0;
    let mut i = 0;

    while i < highlights.len() {
        let start = highlights[i];
        let mut end = start + 1;
        i += 1;
        while i < highlights.len() && highlights[i] == end {
            end += 1;
            i += 1;
        }
        if start >= chars.len() {
            break;
        }
        let end = end.min(chars.len());
        spans.push(MatchSpan::new(
            chars[last_end..start].iter().collect::<String>(),
            chars[start..end].iter().collect::<String>(),
        ));
        last_end = end;
    }

    spans.push(MatchSpan::new(
        chars[last_end..].iter().collect::<String>(),
        "",
    ));
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::pattern::parse_input;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fuzzy_prefers_shortest_window() {
        let needle = Needle::new("ab");
        let chars: Vec<char> = "axxb ab".chars().collect();
        assert_eq!(fuzzy_window(&chars, &needle), Some(vec![5, 6]));
    }

    #[test]
    fn test_fuzzy_smart_case() {
        let chars: Vec<char> = "FooBar".chars().collect();
        assert!(fuzzy_window(&chars, &Needle::new("fb")).is_some());
        assert!(fuzzy_window(&chars, &Needle::new("fB")).is_none());
    }

    #[test]
    fn test_rank_orders_tighter_matches_first() {
        let items = lines(&["a_long_b", "ab", "a_b"]);
        let ranked = rank(&items, &parse_input("ab"));
        let order: Vec<usize> = ranked.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_empty_input_keeps_order() {
        let items = lines(&["zeta", "alpha"]);
        let ranked = rank(&items, &[]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 0);
    }

    #[test]
    fn test_all_patterns_must_match() {
        let items = lines(&["src/main.rs", "src/lib.rs", "README.md"]);
        let ranked = rank(&items, &parse_input("src main"));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].index, 0);
    }

    #[test]
    fn test_inverse_patterns() {
        let items = lines(&["foo.rs", "bar.rs", "foo.md"]);
        assert_eq!(rank(&items, &parse_input("!foo")).len(), 1);
        assert_eq!(rank(&items, &parse_input("!=.rs")).len(), 1);
    }

    #[test]
    fn test_exact_and_regex() {
        let items = lines(&["f_o_o", "foo", "FOO"]);
        assert_eq!(rank(&items, &parse_input("=foo")).len(), 2);
        assert_eq!(rank(&items, &parse_input("=FOO")).len(), 1);
        assert_eq!(rank(&items, &parse_input("@^f.o.o$")).len(), 1);
        assert_eq!(rank(&items, &parse_input("@^fo+$")).len(), 2);
    }

    #[test]
    fn test_partitions_merge_adjacent_highlights() {
        let spans = partitions("abcdef", &[1, 2, 4]);
        assert_eq!(
            spans,
            vec![
                MatchSpan::new("a", "bc"),
                MatchSpan::new("d", "e"),
                MatchSpan::new("f", ""),
            ]
        );
    }

    #[test]
    fn test_partitions_without_highlights() {
        assert_eq!(partitions("abc", &[]), vec![MatchSpan::new("abc", "")]);
    }

    #[test]
    fn test_regex_highlight_uses_char_offsets() {
        let items = lines(&["héllo world"]);
        let ranked = rank(&items, &parse_input("@wor"));
        assert_eq!(ranked[0].highlights, vec![6, 7, 8]);
    }
}
