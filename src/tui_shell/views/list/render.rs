use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Row, Table, TableState};

use crate::model::Resource;
use crate::selector::{LOADING, NO_RESULTS, Selector};

use super::super::super::{View, render_view_chrome};
use super::super::super::widgets::{render_dropdown, selector_line};
use super::{CatalogRecord, FilterSlot, Focus, ListView};

fn filter_label(sel: &Selector, slot: FilterSlot) -> &'static str {
    if slot == FilterSlot::Type {
        return "Type";
    }
    match sel.resource() {
        Resource::Vocabulary => "Vocabulary",
        Resource::Section => "Section",
        Resource::Category => "Category",
        Resource::Word => "Word",
    }
}

pub(super) fn render_list<T: CatalogRecord>(
    view: &ListView<T>,
    frame: &mut ratatui::Frame,
    area: Rect,
) {
    let inner = render_view_chrome(frame, &view.title(), view.updated_at(), area);
    let slots = view.slots();
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(slots.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    // Filters, one line each.
    let mut anchors = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        let Some(sel) = view.slot_selector(*slot) else {
            continue;
        };
        let rect = Rect {
            x: parts[0].x,
            y: parts[0].y + i as u16,
            width: parts[0].width,
            height: 1,
        };
        let focused = view.focus == Focus::Filter(i);
        let label = filter_label(sel, *slot);
        frame.render_widget(Paragraph::new(selector_line(label, sel, focused)), rect);
        anchors.push((rect, sel));
    }

    // Search line.
    let search_focused = view.focus == Focus::Search;
    let label_style = if search_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut search = vec![Span::styled("Search: ", label_style)];
    if view.list.search_input().is_empty() && !search_focused {
        search.push(Span::styled(
            format!("Search {}...", T::RESOURCE.title().to_lowercase()),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        search.push(Span::raw(view.list.search_input().to_string()));
    }
    if view.list.search_pending() {
        search.push(Span::styled(" …", Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(search)), parts[1]);
    if search_focused {
        let x = "Search: ".len() + view.list.search_input().chars().count();
        frame.set_cursor_position((parts[1].x + x as u16, parts[1].y));
    }

    // Table.
    let rows = view.list.rows();
    if rows.is_empty() {
        let msg = if view.list.is_loading() {
            LOADING
        } else {
            NO_RESULTS
        };
        frame.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(Color::Gray))),
            parts[3],
        );
    } else {
        let header = Row::new(T::COLUMNS.iter().map(|(name, _)| *name))
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
        let widths: Vec<Constraint> = T::COLUMNS
            .iter()
            .map(|(_, w)| Constraint::Percentage(*w))
            .collect();
        let body: Vec<Row> = rows.iter().map(|r| Row::new(r.cells())).collect();
        let highlight = if view.focus == Focus::Table {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        };
        let table = Table::new(body, widths)
            .header(header)
            .row_highlight_style(highlight);
        let mut state = TableState::default();
        state.select(Some(view.list.selected_index().min(rows.len() - 1)));
        frame.render_stateful_widget(table, parts[3], &mut state);
    }

    // Footer: page indicator, then load state.
    let mut footer = vec![Span::styled(
        view.list.pagination().describe(),
        Style::default().fg(Color::Cyan),
    )];
    footer.push(Span::raw(format!("  {} rows", rows.len())));
    if view.list.is_loading() {
        footer.push(Span::styled("  loading…", Style::default().fg(Color::Gray)));
    }
    if let Some(err) = view.list.error_message() {
        footer.push(Span::styled(
            format!("  {}", err),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), parts[4]);

    // Open dropdown last so it draws over the table.
    if let Some((rect, sel)) = anchors.into_iter().find(|(_, s)| s.is_open()) {
        render_dropdown(frame, rect, sel);
    }
}
