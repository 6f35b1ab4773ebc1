//! Result list widget.
//!
//! Each visible item is drawn from its match partitions, with matched
//! characters in the highlight color and the selected row in the selection
//! colors. A one-column scrollbar on the right appears when the list does
//! not fit.

use super::scroll::ScrollMetrics;
use crate::editor::view::ViewState;
use crate::protocol::Item;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn item_line<'a>(item: &'a Item, colors: &ThemeColors) -> Line<'a> {
    let base = if item.selected {
        Style::default().fg(colors.selected_fg).bg(colors.selected_bg)
    } else {
        Style::default().fg(colors.foreground).bg(colors.background)
    };
    let matched = base.fg(colors.highlight).add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(item.spans.len() * 2);
    for span in &item.spans {
        if !span.unmatched.is_empty() {
            spans.push(Span::styled(span.unmatched.as_str(), base));
        }
        if !span.matched.is_empty() {
            spans.push(Span::styled(span.matched.as_str(), matched));
        }
    }

    Line::from(spans).style(base)
}

/// Renders the visible slice of the result list plus its scrollbar.
pub fn render_entries(f: &mut Frame, area: Rect, view: &ViewState, colors: &ThemeColors) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let metrics = ScrollMetrics::new(view.items().len(), area.height as usize, view.scroll());
    let thumb = metrics.thumb().project(area.height as usize);

    // Reserve the last column for the scrollbar only when it is shown
    let list_width = if thumb.is_some() && area.width > 1 {
        area.width - 1
    } else {
        area.width
    };
    let list_area = Rect::new(area.x, area.y, list_width, area.height);

    let lines: Vec<Line> = view.items()[metrics.visible_range()]
        .iter()
        .map(|item| item_line(item, colors))
        .collect();
    let list = Paragraph::new(lines).style(Style::default().bg(colors.background));
    f.render_widget(list, list_area);

    if let Some((top, height)) = thumb {
        if list_width == area.width {
            return;
        }
        let bar: Vec<Line> = (0..area.height as usize)
            .map(|row| {
                if row >= top && row < top + height {
                    Line::from(Span::styled("█", Style::default().fg(colors.scrollbar_thumb)))
                } else {
                    Line::from(Span::styled("│", Style::default().fg(colors.scrollbar_track)))
                }
            })
            .collect();
        let bar_area = Rect::new(area.x + list_width, area.y, 1, area.height);
        f.render_widget(Paragraph::new(bar), bar_area);
    }
}
