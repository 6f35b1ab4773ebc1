pub mod entries;
pub mod prompt_line;
pub mod scroll;

use anyhow::Result;
use ratatui::backend::Backend as TerminalBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::editor::engine::Engine;
use crate::protocol::Backend;
use crate::theme::Theme;

/// Main UI structure that manages the terminal interface rendering.
///
/// The UI is composed of two areas:
/// - Prompt line (top): prompt, input with cursor, and counters
/// - Result list (rest): ranked items with a scrollbar
///
/// # Example
///
/// ```
/// use linepick::ui::UI;
/// use linepick::theme::get_builtin_theme;
///
/// let theme = get_builtin_theme("default-dark").unwrap();
/// let ui = UI::new(theme);
/// assert_eq!(ui.theme_name(), "default-dark");
/// ```
pub struct UI {
    theme: Theme,
}

impl UI {
    /// Creates a new UI instance with the specified theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Returns the current theme name.
    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    /// Renders the widget to the terminal.
    ///
    /// Records the list height in the view first so the selection stays
    /// visible after a resize.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<T: TerminalBackend, B: Backend>(
        &self,
        terminal: &mut Terminal<T>,
        engine: &mut Engine<B>,
    ) -> Result<()> {
        let size = terminal.size()?;
        engine
            .view_mut()
            .set_viewport_height(size.height.saturating_sub(1) as usize);

        let view = engine.view();
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Prompt line
                    Constraint::Min(0),    // Result list
                ])
                .split(f.area());

            prompt_line::render_prompt_line(f, chunks[0], view, &self.theme.colors);
            entries::render_entries(f, chunks[1], view, &self.theme.colors);
        })?;

        Ok(())
    }
}
