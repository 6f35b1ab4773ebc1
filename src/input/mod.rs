//! Keyboard input: key normalization, binding tables and the terminal
//! event source.

pub mod dispatch;
pub mod handler;
pub mod keys;

pub use dispatch::{Bindings, Command, Dispatch};
pub use handler::InputHandler;
pub use keys::{KeyChord, KeyEvent, KeyPhase, Modifiers};
