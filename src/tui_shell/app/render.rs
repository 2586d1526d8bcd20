use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    // Header
    let mut spans = vec![
        Span::styled(
            "lexadmin",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::raw(app.config.base_url.as_str()),
    ];
    if let Some(profile) = app.profile.as_ref() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            profile.display_name(),
            Style::default().fg(Color::Green),
        ));
    } else if let Some(note) = app.auth_note.as_deref() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(note, Style::default().fg(Color::Red)));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Main view
    if let Some(view) = app.view() {
        view.render(frame, chunks[1]);
    }

    // Status / last result
    {
        let mut lines = Vec::new();
        if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", fmt_ts_ui(&r.ts)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(r.text.as_str(), style),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    // Key hints
    let hints = app.view().map(|v| v.hints()).unwrap_or("");
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}  ctrl+c quit", hints),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )),
        chunks[3],
    );

    if let Some(m) = &app.modal {
        dim_frame(frame);
        modal::draw_modal(frame, m);
    }
}

fn dim_frame(frame: &mut ratatui::Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier |= Modifier::DIM;
            }
        }
    }
}
