//! Drawing for selector fields and their dropdowns.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

use crate::selector::{Selector, SelectorRow};

const DROPDOWN_MAX_ROWS: u16 = 10;

/// Closed-state line: `label: value ▾`.
pub(super) fn selector_line(label: &str, sel: &Selector, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::raw(sel.display_label()),
        Span::styled(" ▾", Style::default().fg(Color::DarkGray)),
    ];
    if sel.is_loading() {
        spans.push(Span::styled(" …", Style::default().fg(Color::Gray)));
    } else if sel.error_message().is_some() {
        spans.push(Span::styled(" !", Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

/// Rows shown plus the border, capped at `DROPDOWN_MAX_ROWS`.
fn dropdown_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).min(DROPDOWN_MAX_ROWS) + 2
}

/// Open dropdown drawn over the content below `anchor`.
pub(super) fn render_dropdown(frame: &mut ratatui::Frame, anchor: Rect, sel: &Selector) {
    let rows = sel.rows();
    let area = frame.area();
    let height = dropdown_height(rows.len());
    let y = anchor.y.saturating_add(1);
    let height = height.min(area.height.saturating_sub(y.saturating_sub(area.y)));
    if height < 3 {
        return;
    }
    let rect = Rect {
        x: anchor.x,
        y,
        width: anchor.width.max(24).min(area.width.saturating_sub(anchor.x)),
        height,
    };

    let search = if sel.filter_text().is_empty() {
        Span::styled(
            sel.config().search_placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            format!("{}_", sel.filter_text()),
            Style::default().fg(Color::White),
        )
    };

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let style = match row {
                SelectorRow::All { selected: true, .. }
                | SelectorRow::Option { selected: true, .. } => {
                    Style::default().fg(Color::Green)
                }
                SelectorRow::All { .. } => Style::default().fg(Color::Cyan),
                SelectorRow::Loading | SelectorRow::Empty => Style::default().fg(Color::Gray),
                SelectorRow::Error(_) => Style::default().fg(Color::Red),
                SelectorRow::Option { .. } => Style::default(),
            };
            ListItem::new(Line::from(Span::styled(row.text(), style)))
        })
        .collect();

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(sel.highlighted().min(items.len() - 1)));
    }

    frame.render_widget(Clear, rect);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(search)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, rect, &mut state);
}

#[cfg(test)]
#[path = "../tests/tui_shell/widgets_tests.rs"]
mod tests;
