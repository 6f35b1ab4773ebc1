//! Per-instance display state driven by the backend.
//!
//! `ViewState` is the [`Frontend`] a backend talks to. It owns the input line
//! as well, since the backend may overwrite it, and tracks everything the
//! renderer needs: prompt, mode, result items, found/over-limit flags,
//! counters, selection and scroll position.

use tracing::trace;

use super::state::EditorState;
use crate::protocol::{Frontend, Item};
use crate::ui::scroll::{clamp_scroll, ensure_visible};

/// Display state of one widget instance.
#[derive(Debug, Clone)]
pub struct ViewState {
    input: EditorState,
    prompt: String,
    mode: Option<String>,
    items: Vec<Item>,
    found: bool,
    over_limit: bool,
    counters: (usize, usize),
    selected: Option<usize>,
    scroll: usize,
    viewport_height: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            input: EditorState::new(),
            prompt: String::new(),
            mode: None,
            items: Vec::new(),
            found: true,
            over_limit: false,
            counters: (0, 0),
            selected: None,
            scroll: 0,
            viewport_height: 0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &EditorState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut EditorState {
        &mut self.input
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Mode last reported by the backend.
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// False when the last result list was empty.
    pub fn found(&self) -> bool {
        self.found
    }

    pub fn is_over_limit(&self) -> bool {
        self.over_limit
    }

    /// `(selected count, total)` as last reported.
    pub fn counters(&self) -> (usize, usize) {
        self.counters
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// First visible item.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Records the list height available on screen and re-fits the scroll.
    pub fn set_viewport_height(&mut self, height: usize) {
        if self.viewport_height != height {
            self.viewport_height = height;
            self.fit_scroll();
        }
    }

    fn fit_scroll(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        self.scroll = clamp_scroll(self.scroll, self.items.len(), self.viewport_height);
        if let Some(index) = self.selected {
            self.scroll = ensure_visible(index, 1, self.viewport_height, self.scroll);
        }
    }
}

impl Frontend for ViewState {
    fn set_input(&mut self, text: &str) {
        self.input.overwrite(text);
    }

    fn set_items(&mut self, items: Vec<Item>) {
        trace!("set_items: {} items", items.len());
        self.found = !items.is_empty();
        self.selected = items.iter().position(|item| item.selected);
        self.items = items;
        self.fit_scroll();
    }

    fn switch_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    fn report_mode(&mut self, mode: &str) {
        self.mode = Some(mode.to_string());
    }

    fn over_limit(&mut self) {
        self.over_limit = true;
    }

    fn under_limit(&mut self) {
        self.over_limit = false;
    }

    fn update_counters(&mut self, selected: usize, total: usize) {
        self.counters = (selected, total);
    }

    fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        for (i, item) in self.items.iter_mut().enumerate() {
            item.selected = i == index;
        }
        self.selected = Some(index);
        self.fit_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n).map(|i| Item::plain(format!("item {}", i))).collect()
    }

    #[test]
    fn test_found_follows_items() {
        let mut view = ViewState::new();
        view.set_items(vec![]);
        assert!(!view.found());
        view.set_items(items(1));
        assert!(view.found());
    }

    #[test]
    fn test_selected_taken_from_items() {
        let mut list = items(3);
        list[1].selected = true;
        let mut view = ViewState::new();
        view.set_items(list);
        assert_eq!(view.selected(), Some(1));
    }

    #[test]
    fn test_select_moves_flag() {
        let mut list = items(3);
        list[0].selected = true;
        let mut view = ViewState::new();
        view.set_items(list);
        view.select(2);
        assert!(!view.items()[0].selected);
        assert!(view.items()[2].selected);
        assert_eq!(view.selected(), Some(2));
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut view = ViewState::new();
        view.set_items(items(2));
        view.select(5);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn test_select_scrolls_into_view() {
        let mut view = ViewState::new();
        view.set_viewport_height(3);
        view.set_items(items(10));
        view.select(5);
        assert_eq!(view.scroll(), 3);
        view.select(1);
        assert_eq!(view.scroll(), 1);
    }

    #[test]
    fn test_shrinking_list_clamps_scroll() {
        let mut view = ViewState::new();
        view.set_viewport_height(3);
        view.set_items(items(10));
        view.select(9);
        assert_eq!(view.scroll(), 7);
        view.set_items(items(4));
        assert_eq!(view.scroll(), 1);
    }

    #[test]
    fn test_limit_flags_and_counters() {
        let mut view = ViewState::new();
        view.over_limit();
        assert!(view.is_over_limit());
        view.under_limit();
        assert!(!view.is_over_limit());
        view.update_counters(3, 10);
        assert_eq!(view.counters(), (3, 10));
    }
}
