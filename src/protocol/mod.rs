//! Command protocol between the input engine and a filtering backend.
//!
//! The engine calls into a [`Backend`] and the backend drives the display
//! through a [`Frontend`]. Every outbound call receives the frontend, so a
//! backend can push updates (items, counters, mode) from inside the call
//! without holding a reference to the engine.
//!
//! Call names mirror the established wire protocol: `filter`, `enter`,
//! `acceptInput`, `acceptSelected`, `dismiss`, `complete`, `historyPrev`,
//! `historyNext`, `prev`, `next`, `getSelected`, `log` outbound and
//! `setInput`, `setItems`, `switchPrompt`, `reportMode`, `overLimit`,
//! `underLimit`, `updateCounters`, `select` inbound.

/// One highlighted partition of a result line: unmatched text followed by
/// matched text. Either part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSpan {
    pub unmatched: String,
    pub matched: String,
}

impl MatchSpan {
    pub fn new(unmatched: impl Into<String>, matched: impl Into<String>) -> Self {
        Self {
            unmatched: unmatched.into(),
            matched: matched.into(),
        }
    }
}

/// A result line handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub spans: Vec<MatchSpan>,
    pub selected: bool,
}

impl Item {
    /// Creates an unhighlighted item.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![MatchSpan::new(text, "")],
            selected: false,
        }
    }

    /// Full text of the item, highlights removed.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .flat_map(|s| [s.unmatched.as_str(), s.matched.as_str()])
            .collect()
    }
}

/// Calls a backend makes on the display.
pub trait Frontend {
    /// Replaces the input text without triggering a new filter.
    fn set_input(&mut self, text: &str);
    /// Replaces the result list.
    fn set_items(&mut self, items: Vec<Item>);
    fn switch_prompt(&mut self, prompt: &str);
    /// Reports the backend mode, an open-ended label used for styling.
    fn report_mode(&mut self, mode: &str);
    fn over_limit(&mut self);
    fn under_limit(&mut self);
    fn update_counters(&mut self, selected: usize, total: usize);
    /// Marks the item at `index` as selected and scrolls it into view.
    fn select(&mut self, index: usize);
}

/// Calls the engine makes on the filtering backend.
pub trait Backend {
    /// The input text changed.
    fn filter(&mut self, input: &str, frontend: &mut dyn Frontend);
    /// Default accept for a key release that has no binding.
    fn enter(&mut self, input: &str, frontend: &mut dyn Frontend);
    fn accept_input(&mut self, frontend: &mut dyn Frontend);
    fn accept_selected(&mut self, frontend: &mut dyn Frontend);
    fn dismiss(&mut self, frontend: &mut dyn Frontend);
    /// Returns the completed input.
    fn complete(&mut self, frontend: &mut dyn Frontend) -> String;
    fn history_prev(&mut self, frontend: &mut dyn Frontend) -> String;
    fn history_next(&mut self, frontend: &mut dyn Frontend) -> String;
    fn prev(&mut self, frontend: &mut dyn Frontend);
    fn next(&mut self, frontend: &mut dyn Frontend);
    /// Returns the selected value, or an empty string.
    fn get_selected(&mut self) -> String;
    fn log(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_text_joins_partitions() {
        let item = Item {
            spans: vec![MatchSpan::new("a", "bc"), MatchSpan::new("d", "")],
            selected: false,
        };
        assert_eq!(item.text(), "abcd");
    }

    #[test]
    fn test_plain_item() {
        let item = Item::plain("hello");
        assert_eq!(item.spans.len(), 1);
        assert_eq!(item.spans[0].matched, "");
        assert!(!item.selected);
    }
}
