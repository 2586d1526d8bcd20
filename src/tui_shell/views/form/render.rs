use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::forms::{FieldKind, FieldSpec};

use super::super::super::widgets::{render_dropdown, selector_line};
use super::super::super::{View, render_view_chrome};
use super::FormView;

const LABEL_WIDTH: usize = 14;

fn label_span(field: &FieldSpec, focused: bool) -> Span<'static> {
    let marker = if field.required { "*" } else { "" };
    let text = format!("{:<width$}", format!("{}{}:", field.label, marker), width = LABEL_WIDTH);
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(text, style)
}

fn placeholder(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

pub(super) fn render_form(view: &FormView, frame: &mut ratatui::Frame, area: Rect) {
    let inner = render_view_chrome(frame, &view.title(), view.updated_at(), area);
    let fields = view.fields();
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(fields.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut dropdown = None;
    let mut cursor = None;
    for (i, field) in fields.iter().enumerate() {
        let rect = Rect {
            x: parts[0].x,
            y: parts[0].y + i as u16,
            width: parts[0].width,
            height: 1,
        };
        let focused = view.focused == i;
        let value = view.form.value(field.key);

        let line = match field.kind {
            FieldKind::Text | FieldKind::LongText => {
                let shown = if focused { view.input.buf.as_str() } else { value };
                if focused {
                    let x = LABEL_WIDTH + view.input.cursor;
                    cursor = Some((rect.x + x as u16, rect.y));
                }
                let body = if shown.is_empty() && !focused {
                    placeholder("(empty)")
                } else {
                    Span::raw(shown.to_string())
                };
                Line::from(vec![label_span(field, focused), body])
            }
            FieldKind::VocabularyType => {
                let body = if value.is_empty() {
                    placeholder("< select type >")
                } else {
                    Span::raw(format!("< {} >", value))
                };
                Line::from(vec![label_span(field, focused), body])
            }
            FieldKind::Reference(_) => {
                let level = view.ref_level(field);
                match level.and_then(|l| view.refs.selector(l)) {
                    Some(sel) if level.is_some_and(|l| view.refs.is_visible(l)) => {
                        if sel.is_open() {
                            dropdown = Some((rect, sel));
                        }
                        let mut line = selector_line("", sel, focused);
                        // selector_line draws its own label; swap in the aligned one.
                        line.spans[0] = label_span(field, focused);
                        line
                    }
                    _ => Line::from(vec![
                        label_span(field, focused),
                        placeholder("(choose the parent first)"),
                    ]),
                }
            }
            FieldKind::Image => {
                let body = if view.uploading {
                    Span::styled("uploading…", Style::default().fg(Color::Gray))
                } else if value.is_empty() {
                    placeholder("(none; enter to upload)")
                } else {
                    Span::raw(value.to_string())
                };
                Line::from(vec![label_span(field, focused), body])
            }
        };
        frame.render_widget(Paragraph::new(line), rect);
    }

    // Submit row.
    let submit_rect = Rect {
        x: parts[0].x,
        y: parts[0].y + fields.len() as u16 + 1,
        width: parts[0].width,
        height: 1,
    };
    let submit_style = if view.on_submit_row() {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::Green)
    };
    let submit_label = if view.submitting { "[ Saving… ]" } else { "[ Submit ]" };
    frame.render_widget(
        Paragraph::new(Span::styled(submit_label, submit_style)),
        submit_rect,
    );

    let mut notes = Vec::new();
    if let Some(err) = view.error.as_deref() {
        notes.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    notes.push(Line::from(placeholder("* required")));
    frame.render_widget(Paragraph::new(notes).wrap(Wrap { trim: false }), parts[1]);

    if let Some((rect, sel)) = dropdown {
        let anchor = Rect {
            x: rect.x + LABEL_WIDTH as u16,
            width: rect.width.saturating_sub(LABEL_WIDTH as u16),
            ..rect
        };
        render_dropdown(frame, anchor, sel);
    } else if let Some(pos) = cursor {
        frame.set_cursor_position(pos);
    }
}
