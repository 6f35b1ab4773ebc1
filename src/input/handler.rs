//! Input event handler for polling and processing terminal events.
//!
//! Terminals deliver whole key presses rather than separate key-down and
//! key-up events, so each press is translated into a [`KeyEvent`] plus the
//! default edit it would make, and handed to [`Engine::press`].

use crate::editor::engine::Engine;
use crate::editor::state::EditOp;
use crate::input::dispatch::Command;
use crate::input::keys::{self, KeyEvent, KeyPhase, Modifiers};
use crate::protocol::Backend;
use anyhow::{Context, Result};
use std::fs::File;
use std::time::Duration;
use termion::event::{Event, Key, MouseButton, MouseEvent};
use termion::input::{Events, TermRead};
use tracing::trace;

/// Maps a printable character to its key code and shift flag.
///
/// Letters use their upper-case code, with shift set for capitals. Digits and
/// space keep their own code. Other characters have codes that collide with
/// named keys (`%` is Left, `&` is Up) so they are reported as unidentified.
fn char_code(c: char) -> (u32, bool) {
    if c.is_ascii_alphabetic() {
        (c.to_ascii_uppercase() as u32, c.is_ascii_uppercase())
    } else if c.is_ascii_digit() || c == ' ' {
        (c as u32, false)
    } else {
        (keys::UNIDENTIFIED, false)
    }
}

/// Translates a termion key into a key event and its default edit.
///
/// Returns `None` for keys the widget ignores.
///
/// # Example
///
/// ```
/// use linepick::input::handler::translate_key;
/// use termion::event::Key;
///
/// let (event, _) = translate_key(Key::Ctrl('w')).unwrap();
/// assert_eq!(event.chord().to_string(), "Control-W");
/// ```
pub fn translate_key(key: Key) -> Option<(KeyEvent, EditOp)> {
    let down = |code: u32, modifiers: Modifiers| KeyEvent::new(code, modifiers, KeyPhase::Down);

    let translated = match key {
        Key::Char('\n') | Key::Char('\r') => (down(keys::ENTER, Modifiers::NONE), EditOp::None),
        Key::Char('\t') => (down(keys::TAB, Modifiers::NONE), EditOp::None),
        Key::Char(c) => {
            let (code, shift) = char_code(c);
            let modifiers = if shift {
                Modifiers::SHIFT
            } else {
                Modifiers::NONE
            };
            (down(code, modifiers), EditOp::Insert(c))
        }
        Key::BackTab => (down(keys::TAB, Modifiers::SHIFT), EditOp::None),
        Key::Backspace => (down(keys::BACKSPACE, Modifiers::NONE), EditOp::Backspace),
        Key::Delete => (down(keys::DELETE, Modifiers::NONE), EditOp::Delete),
        Key::Esc => (down(keys::ESCAPE, Modifiers::NONE), EditOp::None),
        Key::Left => (down(keys::LEFT, Modifiers::NONE), EditOp::MoveLeft),
        Key::Right => (down(keys::RIGHT, Modifiers::NONE), EditOp::MoveRight),
        Key::Up => (down(keys::UP, Modifiers::NONE), EditOp::None),
        Key::Down => (down(keys::DOWN, Modifiers::NONE), EditOp::None),
        Key::Home => (down(keys::HOME, Modifiers::NONE), EditOp::Home),
        Key::End => (down(keys::END, Modifiers::NONE), EditOp::End),
        Key::PageUp => (down(keys::PAGE_UP, Modifiers::NONE), EditOp::None),
        Key::PageDown => (down(keys::PAGE_DOWN, Modifiers::NONE), EditOp::None),
        Key::Ctrl(c) => {
            let (code, _) = char_code(c);
            (down(code, Modifiers::CONTROL), EditOp::None)
        }
        Key::Alt('\r') | Key::Alt('\n') => (down(keys::ENTER, Modifiers::ALT), EditOp::None),
        Key::Alt(c) => {
            let (code, shift) = char_code(c);
            let modifiers = if shift {
                Modifiers::ALT.with(Modifiers::SHIFT)
            } else {
                Modifiers::ALT
            };
            (down(code, modifiers), EditOp::None)
        }
        _ => return None,
    };

    Some(translated)
}

/// Reads terminal events from `/dev/tty` and feeds them to an engine.
///
/// Standard input carries the candidate lines, so keyboard input always
/// comes from the controlling terminal.
pub struct InputHandler {
    /// Event iterator (maintains position in input buffer)
    events: Events<File>,
}

impl InputHandler {
    /// Creates a new InputHandler that reads from /dev/tty.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no controlling terminal.
    pub fn new_with_tty() -> Result<Self> {
        let tty_file = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("Failed to open /dev/tty for keyboard input")?;

        Ok(Self {
            events: tty_file.events(),
        })
    }

    /// Waits for the next terminal event.
    ///
    /// Returns `None` once the terminal closes. Reads block, so `_timeout` is
    /// not honored.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    pub fn poll_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        match self.events.next() {
            Some(event) => Ok(Some(event?)),
            None => Ok(None),
        }
    }

    /// Handles a terminal event.
    ///
    /// Keys go through the engine's key-down/edit/key-up sequence. The mouse
    /// wheel moves the selection.
    pub fn handle_event<B: Backend>(&mut self, event: Event, engine: &mut Engine<B>) {
        match event {
            Event::Key(key) => {
                if let Some((key_event, edit)) = translate_key(key) {
                    trace!("key {:?} -> {}", key, key_event.chord());
                    engine.press(key_event, edit);
                }
            }
            Event::Mouse(MouseEvent::Press(MouseButton::WheelUp, _, _)) => {
                engine.perform(Command::Prev);
            }
            Event::Mouse(MouseEvent::Press(MouseButton::WheelDown, _, _)) => {
                engine.perform(Command::Next);
            }
            _ => {}
        }
    }
}
