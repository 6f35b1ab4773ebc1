//! Line menu: the filtering backend for a list of text lines.
//!
//! `Menu` implements [`Backend`]: it filters its lines against the input,
//! ranks and limits the results, tracks the selection, completes the input,
//! walks the history and records how the interaction ended.
//!
//! # Example
//!
//! ```
//! use linepick::menu::{Menu, Outcome};
//! use linepick::editor::view::ViewState;
//! use linepick::protocol::Backend;
//!
//! let mut menu = Menu::new(vec!["apple".to_string(), "banana".to_string()]);
//! let mut view = ViewState::new();
//!
//! menu.filter("ban", &mut view);
//! assert_eq!(view.items().len(), 1);
//!
//! menu.accept_selected(&mut view);
//! assert_eq!(menu.outcome(), Some(&Outcome::Selected("banana".to_string())));
//! ```

pub mod history;
pub mod matcher;
pub mod pattern;

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::protocol::{Backend, Frontend, Item};
use history::History;
use matcher::Scored;

/// Input mode reported to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Typing a query
    Insert,
    /// Browsing history entries
    History,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Insert => "insert",
            Mode::History => "history",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Mode::Insert => ">",
            Mode::History => "<",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the interaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A result line was accepted.
    Selected(String),
    /// The raw input was accepted.
    Input(String),
    Dismissed,
}

/// Filtering backend over a fixed list of lines.
#[derive(Debug)]
pub struct Menu {
    items: Vec<String>,
    limit: Option<usize>,
    completion_sep: Option<String>,
    accept_input: bool,
    history: History,
    input: Option<String>,
    results: Vec<Scored>,
    matched_count: usize,
    index: usize,
    mode: Option<Mode>,
    mode_input: String,
    outcome: Option<Outcome>,
}

impl Menu {
    /// Creates a menu over `items`. Empty lines are dropped.
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items: items.into_iter().filter(|i| !i.is_empty()).collect(),
            limit: None,
            completion_sep: None,
            accept_input: false,
            history: History::disabled(),
            input: None,
            results: Vec::new(),
            matched_count: 0,
            index: 0,
            mode: None,
            mode_input: String::new(),
            outcome: None,
        }
    }

    /// Shows at most `limit` results.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Completes only up to the next `sep` after the input.
    pub fn with_completion_sep(mut self, sep: Option<String>) -> Self {
        self.completion_sep = sep.filter(|s| !s.is_empty());
        self
    }

    /// Allows accepting the raw input instead of a result line.
    pub fn with_accept_input(mut self, accept_input: bool) -> Self {
        self.accept_input = accept_input;
        self
    }

    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn input(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Index of the selected result.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of result lines currently shown.
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn take_outcome(&mut self) -> Option<Outcome> {
        self.outcome.take()
    }

    fn switch_mode(&mut self, mode: Mode, frontend: &mut dyn Frontend) {
        if self.mode != Some(mode) {
            debug!("mode -> {}", mode);
            self.mode = Some(mode);
            self.mode_input = self.input().to_string();
            frontend.switch_prompt(mode.prompt());
            frontend.report_mode(mode.name());
        }
    }

    fn set_input(&mut self, value: &str, frontend: &mut dyn Frontend) {
        if self.input.as_deref() == Some(value) {
            return;
        }
        self.input = Some(value.to_string());

        let patterns = pattern::parse_input(value);
        let mut results = matcher::rank(&self.items, &patterns);
        self.matched_count = results.len();

        match self.limit {
            Some(limit) if results.len() > limit => {
                results.truncate(limit);
                frontend.over_limit();
            }
            _ => frontend.under_limit(),
        }

        self.index = self.index.min(results.len().saturating_sub(1));
        self.results = results;
        self.render(frontend);
    }

    fn render(&self, frontend: &mut dyn Frontend) {
        let items = self
            .results
            .iter()
            .enumerate()
            .map(|(i, scored)| Item {
                spans: matcher::partitions(&self.items[scored.index], &scored.highlights),
                selected: i == self.index,
            })
            .collect();
        frontend.set_items(items);
        frontend.update_counters(self.matched_count, self.items.len());
    }

    fn selected_value(&self) -> Option<String> {
        self.results
            .get(self.index)
            .map(|scored| self.items[scored.index].trim().to_string())
    }

    fn record_history(&mut self) {
        let input = self.input().to_string();
        if let Err(e) = self.history.add(&input) {
            warn!("Could not save history: {:#}", e);
        }
    }

    fn completion_candidates(&self) -> BTreeSet<String> {
        let input = self.input();
        let values = self.items.iter().filter(|v| v.starts_with(input));

        match &self.completion_sep {
            Some(sep) => values
                .filter_map(|v| {
                    v[input.len()..]
                        .find(sep.as_str())
                        .map(|i| v[..input.len() + i + sep.len()].to_string())
                })
                .collect(),
            None => values.cloned().collect(),
        }
    }

    fn completion(&self) -> String {
        let input = self.input();
        let candidates = self.completion_candidates();

        let mut iter = candidates.iter();
        let Some(first) = iter.next() else {
            return input.to_string();
        };

        let mut prefix_len = first.len();
        for candidate in iter {
            prefix_len = first
                .char_indices()
                .zip(candidate.chars())
                .take_while(|((_, a), b)| a == b)
                .last()
                .map_or(0, |((i, a), _)| i + a.len_utf8())
                .min(prefix_len);
        }

        if prefix_len > input.len() {
            first[..prefix_len].to_string()
        } else {
            input.to_string()
        }
    }
}

impl Backend for Menu {
    fn filter(&mut self, input: &str, frontend: &mut dyn Frontend) {
        if self.mode.is_none() {
            self.switch_mode(Mode::Insert, frontend);
        }
        self.set_input(input, frontend);
    }

    fn enter(&mut self, input: &str, frontend: &mut dyn Frontend) {
        self.set_input(input, frontend);
        self.switch_mode(Mode::Insert, frontend);
    }

    fn accept_input(&mut self, _frontend: &mut dyn Frontend) {
        if !self.accept_input {
            debug!("accepting the raw input is disabled");
            return;
        }
        self.record_history();
        let input = self.input().to_string();
        info!("accepted input {:?}", input);
        self.outcome = Some(Outcome::Input(input));
    }

    fn accept_selected(&mut self, _frontend: &mut dyn Frontend) {
        let Some(selected) = self.selected_value().filter(|s| !s.is_empty()) else {
            return;
        };
        self.record_history();
        info!("accepted {:?}", selected);
        self.outcome = Some(Outcome::Selected(selected));
    }

    fn dismiss(&mut self, _frontend: &mut dyn Frontend) {
        info!("dismissed");
        self.outcome = Some(Outcome::Dismissed);
    }

    fn complete(&mut self, frontend: &mut dyn Frontend) -> String {
        self.switch_mode(Mode::Insert, frontend);
        self.completion()
    }

    fn history_prev(&mut self, frontend: &mut dyn Frontend) -> String {
        let entry = self.history.prev();
        self.switch_mode(Mode::History, frontend);
        entry.unwrap_or_else(|| self.mode_input.clone())
    }

    fn history_next(&mut self, frontend: &mut dyn Frontend) -> String {
        let entry = self.history.next();
        self.switch_mode(Mode::History, frontend);
        entry.unwrap_or_else(|| self.mode_input.clone())
    }

    fn prev(&mut self, frontend: &mut dyn Frontend) {
        if self.results.is_empty() {
            return;
        }
        self.index = self.index.saturating_sub(1);
        frontend.select(self.index);
    }

    fn next(&mut self, frontend: &mut dyn Frontend) {
        if self.results.is_empty() {
            return;
        }
        self.index = (self.index + 1).min(self.results.len() - 1);
        frontend.select(self.index);
    }

    fn get_selected(&mut self) -> String {
        self.selected_value().unwrap_or_default()
    }

    fn log(&mut self, message: &str) {
        info!(target: "linepick::frontend", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::view::ViewState;

    fn menu(items: &[&str]) -> Menu {
        Menu::new(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_lines_dropped() {
        assert_eq!(menu(&["a", "", "b"]).items().len(), 2);
    }

    #[test]
    fn test_first_filter_reports_insert_mode() {
        let mut m = menu(&["a"]);
        let mut view = ViewState::new();
        m.filter("", &mut view);
        assert_eq!(view.mode(), Some("insert"));
        assert_eq!(view.prompt(), ">");
    }

    #[test]
    fn test_completion_longest_common_prefix() {
        let mut m = menu(&["src/main.rs", "src/menu.rs", "README.md"]);
        let mut view = ViewState::new();
        m.filter("s", &mut view);
        assert_eq!(m.complete(&mut view), "src/m");
    }

    #[test]
    fn test_completion_without_candidates_keeps_input() {
        let mut m = menu(&["alpha"]);
        let mut view = ViewState::new();
        m.filter("zz", &mut view);
        assert_eq!(m.complete(&mut view), "zz");
    }

    #[test]
    fn test_completion_single_candidate() {
        let mut m = menu(&["alpha", "beta"]);
        let mut view = ViewState::new();
        m.filter("al", &mut view);
        assert_eq!(m.complete(&mut view), "alpha");
    }

    #[test]
    fn test_completion_with_separator() {
        let mut m = menu(&["src/a/x.rs", "src/b/y.rs", "src/a/z.rs"])
            .with_completion_sep(Some("/".to_string()));
        let mut view = ViewState::new();
        m.filter("src/", &mut view);
        assert_eq!(m.complete(&mut view), "src/");

        m.filter("src/a", &mut view);
        assert_eq!(m.complete(&mut view), "src/a/");
    }

    #[test]
    fn test_selection_clamped_to_results() {
        let mut m = menu(&["aa", "ab", "ac"]);
        let mut view = ViewState::new();
        m.filter("a", &mut view);
        m.next(&mut view);
        m.next(&mut view);
        m.next(&mut view);
        assert_eq!(m.index(), 2);

        m.filter("ab", &mut view);
        assert_eq!(m.index(), 0);
        assert_eq!(m.get_selected(), "ab");
    }

    #[test]
    fn test_accept_input_requires_opt_in() {
        let mut view = ViewState::new();
        let mut m = menu(&["a"]);
        m.filter("typed", &mut view);
        m.accept_input(&mut view);
        assert_eq!(m.outcome(), None);

        let mut m = menu(&["a"]).with_accept_input(true);
        m.filter("typed", &mut view);
        m.accept_input(&mut view);
        assert_eq!(m.outcome(), Some(&Outcome::Input("typed".to_string())));
    }

    #[test]
    fn test_accept_selected_without_results() {
        let mut view = ViewState::new();
        let mut m = menu(&["a"]);
        m.filter("zzz", &mut view);
        m.accept_selected(&mut view);
        assert_eq!(m.outcome(), None);
    }
}
