//! Prompt line widget: prompt marker, input with a block cursor, and
//! right-aligned `matched/total` counters.
//!
//! Example prompt line: `> src ma█                                  3/120`

use crate::editor::view::ViewState;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Formats the counters as `matched/total`.
pub fn counters_text(view: &ViewState) -> String {
    let (matched, total) = view.counters();
    format!("{}/{}", matched, total)
}

/// Renders the prompt line.
///
/// The prompt is drawn in the history color while in history mode. The input
/// turns the error color when nothing matches, and the counters turn the
/// warning color when the result list was truncated.
pub fn render_prompt_line(f: &mut Frame, area: Rect, view: &ViewState, colors: &ThemeColors) {
    let base = Style::default().fg(colors.foreground).bg(colors.background);

    let prompt_color = match view.mode() {
        Some("history") => colors.history,
        _ => colors.prompt,
    };
    let input_style = if view.found() {
        base
    } else {
        base.fg(colors.error)
    };

    let input = view.input();
    let chars: Vec<char> = input.text().chars().collect();
    let cursor = input.cursor().min(chars.len());
    let before: String = chars[..cursor].iter().collect();
    let at_cursor = chars.get(cursor).copied().unwrap_or(' ');
    let after: String = chars.iter().skip(cursor + 1).collect();

    let prompt = format!("{} ", view.prompt());
    let counters = counters_text(view);
    let counters_style = if view.is_over_limit() {
        base.fg(colors.warning).add_modifier(Modifier::BOLD)
    } else {
        base.fg(colors.counters)
    };

    // Right-align the counters when they fit
    let left_len = prompt.chars().count() + chars.len().max(cursor + 1);
    let total_width = area.width as usize;
    let padding = total_width.saturating_sub(left_len + counters.len()).max(1);

    let spans = vec![
        Span::styled(prompt, base.fg(prompt_color).add_modifier(Modifier::BOLD)),
        Span::styled(before, input_style),
        Span::styled(
            at_cursor.to_string(),
            Style::default().fg(colors.background).bg(colors.cursor),
        ),
        Span::styled(after, input_style),
        Span::styled(" ".repeat(padding), base),
        Span::styled(counters, counters_style),
    ];

    let line = Paragraph::new(Line::from(spans)).style(base);
    f.render_widget(line, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Frontend, Item};

    #[test]
    fn test_counters_text() {
        let mut view = ViewState::new();
        assert_eq!(counters_text(&view), "0/0");

        view.set_items(vec![Item::plain("a")]);
        view.update_counters(1, 3);
        assert_eq!(counters_text(&view), "1/3");
    }
}
