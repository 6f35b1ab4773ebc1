//! The input engine of one filter widget.
//!
//! The engine owns the input line, the display state, the binding tables and
//! the backend. Hosts feed it key events and default edits; the engine
//! dispatches bound chords to commands and forwards text to the backend.
//!
//! # Event Order
//!
//! For each key press a host calls [`Engine::key_down`]; if that returns
//! [`Dispatch::Default`] the host performs the key's default edit through
//! [`Engine::apply_edit`]; then it calls [`Engine::key_up`]. The backend thus
//! always sees the text as it stands after the edit.
//!
//! # Example
//!
//! ```
//! use linepick::editor::engine::Engine;
//! use linepick::editor::state::EditOp;
//! use linepick::input::dispatch::{Bindings, Dispatch};
//! use linepick::input::keys::{KeyEvent, KeyPhase, Modifiers};
//! use linepick::menu::Menu;
//!
//! let menu = Menu::new(vec!["alpha".to_string(), "beta".to_string()]);
//! let mut engine = Engine::new(menu, Bindings::default());
//! engine.start("");
//!
//! let down = KeyEvent::new('b' as u32, Modifiers::NONE, KeyPhase::Down);
//! assert_eq!(engine.key_down(&down), Dispatch::Default);
//! engine.apply_edit(EditOp::Insert('b'));
//! engine.key_up(&KeyEvent { phase: KeyPhase::Up, ..down });
//!
//! assert_eq!(engine.view().items().len(), 1);
//! ```

use tracing::debug;

use super::state::{EditOp, EditorState};
use super::text::{self, DEFAULT_DELIMITERS};
use super::view::ViewState;
use crate::input::dispatch::{Bindings, Command, Dispatch};
use crate::input::keys::{KeyEvent, KeyPhase};
use crate::protocol::Backend;

/// Input engine bound to a backend.
#[derive(Debug)]
pub struct Engine<B: Backend> {
    backend: B,
    view: ViewState,
    bindings: Bindings,
    delimiters: Vec<char>,
}

impl<B: Backend> Engine<B> {
    /// Creates an engine with the default word delimiters.
    pub fn new(backend: B, bindings: Bindings) -> Self {
        Self {
            backend,
            view: ViewState::new(),
            bindings,
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }

    /// Sets the word delimiters used by word erase and pattern cycling.
    ///
    /// An empty set keeps the defaults.
    pub fn with_delimiters(mut self, delimiters: Vec<char>) -> Self {
        if !delimiters.is_empty() {
            self.delimiters = delimiters;
        }
        self
    }

    /// Sets the initial input and runs the first filter.
    pub fn start(&mut self, input: &str) {
        self.backend.log(&format!("start with input {:?}", input));
        self.set_input(input);
    }

    pub fn editor(&self) -> &EditorState {
        self.view.input()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Routes an event to [`Engine::key_down`] or [`Engine::key_up`] by phase.
    pub fn handle(&mut self, event: &KeyEvent) -> Dispatch {
        match event.phase {
            KeyPhase::Down => self.key_down(event),
            KeyPhase::Up => self.key_up(event),
        }
    }

    /// Runs the key-down command bound to the event's chord.
    ///
    /// Returns [`Dispatch::Handled`] when a command ran, in which case the
    /// host must not apply the key's default edit.
    pub fn key_down(&mut self, event: &KeyEvent) -> Dispatch {
        let chord = event.chord();
        match self.bindings.lookup(KeyPhase::Down, &chord) {
            Some(command) => {
                debug!("key down {} -> {}", chord, command);
                self.perform(command);
                Dispatch::Handled
            }
            None => Dispatch::Default,
        }
    }

    /// Runs the key-up command bound to the event's chord, or sends the
    /// current text to the backend as entered.
    ///
    /// Returns [`Dispatch::Default`] when the fallback ran.
    pub fn key_up(&mut self, event: &KeyEvent) -> Dispatch {
        let chord = event.chord();
        match self.bindings.lookup(KeyPhase::Up, &chord) {
            Some(command) => {
                debug!("key up {} -> {}", chord, command);
                self.perform(command);
                Dispatch::Handled
            }
            None => {
                let text = self.view.input().text().to_string();
                self.backend.enter(&text, &mut self.view);
                Dispatch::Default
            }
        }
    }

    /// Full key press as a host without key-up events delivers it: key-down,
    /// the default edit when not handled, then key-up.
    pub fn press(&mut self, event: KeyEvent, default_edit: EditOp) {
        let down = KeyEvent {
            phase: KeyPhase::Down,
            ..event
        };
        if self.key_down(&down) == Dispatch::Default {
            self.apply_edit(default_edit);
        }
        self.key_up(&KeyEvent {
            phase: KeyPhase::Up,
            ..event
        });
    }

    /// Applies a default edit to the input line. Returns true if the text
    /// changed.
    pub fn apply_edit(&mut self, op: EditOp) -> bool {
        self.view.input_mut().apply(op)
    }

    /// Executes a command.
    pub fn perform(&mut self, command: Command) {
        match command {
            Command::Complete => {
                let completed = self.backend.complete(&mut self.view);
                self.set_input(&completed);
            }
            Command::HistoryPrev => {
                let entry = self.backend.history_prev(&mut self.view);
                self.set_input(&entry);
            }
            Command::HistoryNext => {
                let entry = self.backend.history_next(&mut self.view);
                self.set_input(&entry);
            }
            Command::Next => self.backend.next(&mut self.view),
            Command::Prev => self.backend.prev(&mut self.view),
            Command::ClearLine => self.clear_line(),
            Command::EraseWord => self.erase_word(),
            Command::YankSelected => {
                let selected = self.backend.get_selected();
                self.set_input(&selected);
            }
            Command::CyclePattern => self.cycle_pattern(),
            Command::AcceptSelected => self.backend.accept_selected(&mut self.view),
            Command::AcceptInput => self.backend.accept_input(&mut self.view),
            Command::Dismiss => self.backend.dismiss(&mut self.view),
            Command::Noop => {}
        }
    }

    /// Replaces the input and asks the backend to filter it.
    pub fn set_input(&mut self, text: &str) {
        self.view.input_mut().overwrite(text);
        self.backend.filter(text, &mut self.view);
    }

    pub fn clear_line(&mut self) {
        self.set_input("");
    }

    /// Erases the word left of the cursor.
    pub fn erase_word(&mut self) {
        let input = self.view.input();
        let (text, cursor) = text::erase_word(input.text(), input.cursor(), &self.delimiters);
        self.view.input_mut().replace(text, cursor);
    }

    /// Cycles the pattern marker of the word under the cursor.
    pub fn cycle_pattern(&mut self) {
        let input = self.view.input();
        let (text, cursor) =
            text::cycle_pattern_prefix(input.text(), input.cursor(), &self.delimiters);
        self.view.input_mut().replace(text, cursor);
    }
}
