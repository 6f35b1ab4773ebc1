//! Input line state.
//!
//! `EditorState` holds the text of the input line and the cursor, counted in
//! characters. The cursor is kept within `0..=len` by every mutation, so
//! rendering code can trust it without re-checking.
//!
//! # Example
//!
//! ```
//! use linepick::editor::state::{EditOp, EditorState};
//!
//! let mut state = EditorState::new();
//! state.apply(EditOp::Insert('h'));
//! state.apply(EditOp::Insert('i'));
//! assert_eq!(state.text(), "hi");
//! assert_eq!(state.cursor(), 2);
//!
//! state.apply(EditOp::Home);
//! assert_eq!(state.cursor(), 0);
//! ```

/// A default editing operation, performed when a key press is not bound to
/// a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Insert a character at the cursor
    Insert(char),
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character under the cursor
    Delete,
    MoveLeft,
    MoveRight,
    Home,
    End,
    /// Key has no default behavior
    None,
}

/// Text and cursor of the input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    text: String,
    cursor: usize,
}

impl EditorState {
    /// Creates an empty input line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input line holding `text`, cursor at its end.
    pub fn with_text(text: &str) -> Self {
        let mut state = Self::new();
        state.overwrite(text);
        state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor offset in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Moves the cursor, clamping it to the text.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len());
    }

    /// Replaces the whole text and puts the cursor at its end.
    pub fn overwrite(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    /// Replaces text and cursor with the result of a text operation.
    pub fn replace(&mut self, text: String, cursor: usize) {
        self.text = text;
        self.set_cursor(cursor);
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Applies a default editing operation.
    ///
    /// Returns true if the text changed.
    pub fn apply(&mut self, op: EditOp) -> bool {
        match op {
            EditOp::Insert(c) => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                true
            }
            EditOp::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let at = self.byte_offset(self.cursor - 1);
                self.text.remove(at);
                self.cursor -= 1;
                true
            }
            EditOp::Delete => {
                if self.cursor >= self.len() {
                    return false;
                }
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
                true
            }
            EditOp::MoveLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            EditOp::MoveRight => {
                self.set_cursor(self.cursor + 1);
                false
            }
            EditOp::Home => {
                self.cursor = 0;
                false
            }
            EditOp::End => {
                self.cursor = self.len();
                false
            }
            EditOp::None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_text_puts_cursor_at_end() {
        let state = EditorState::with_text("héllo");
        assert_eq!(state.cursor(), 5);
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut state = EditorState::with_text("abc");
        state.set_cursor(42);
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut state = EditorState::with_text("ac");
        state.set_cursor(1);
        assert!(state.apply(EditOp::Insert('b')));
        assert_eq!(state.text(), "abc");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_insert_after_multibyte() {
        let mut state = EditorState::with_text("é");
        state.apply(EditOp::Insert('x'));
        assert_eq!(state.text(), "éx");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut state = EditorState::with_text("abc");
        state.set_cursor(1);
        assert!(state.apply(EditOp::Backspace));
        assert_eq!(state.text(), "bc");
        assert_eq!(state.cursor(), 0);
        assert!(!state.apply(EditOp::Backspace));

        assert!(state.apply(EditOp::Delete));
        assert_eq!(state.text(), "c");
        state.apply(EditOp::End);
        assert!(!state.apply(EditOp::Delete));
    }

    #[test]
    fn test_movement_stays_in_bounds() {
        let mut state = EditorState::with_text("ab");
        state.apply(EditOp::MoveRight);
        assert_eq!(state.cursor(), 2);
        state.apply(EditOp::Home);
        state.apply(EditOp::MoveLeft);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_replace_clamps_cursor() {
        let mut state = EditorState::new();
        state.replace("ab".to_string(), 10);
        assert_eq!(state.cursor(), 2);
    }
}
