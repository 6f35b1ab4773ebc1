//! The input line editor and its engine.
//!
//! # Modules
//!
//! - `state`: The input line text and cursor with its default edits
//! - `text`: Word boundaries, word erase and pattern prefix cycling
//! - `view`: Display state a backend drives through the frontend protocol
//! - `engine`: Key dispatch tying the editor, view and backend together
//!
//! # Example
//!
//! ```
//! use linepick::editor::text::erase_word;
//!
//! assert_eq!(erase_word("foo bar", 7, &[' ']), ("foo ".to_string(), 4));
//! ```

pub mod engine;
pub mod state;
pub mod text;
pub mod view;
