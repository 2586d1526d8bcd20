use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use super::{Effect, Outcome, PendingAction, TextInputAction};

pub(super) trait View {
    fn title(&self) -> String;
    fn updated_at(&self) -> &str;
    /// Key hints shown under the status line.
    fn hints(&self) -> &'static str;

    /// Initial fetches; called once when the view is pushed.
    fn mount(&mut self) -> Vec<Effect> {
        Vec::new()
    }

    /// Called when the view becomes the top view again after a save.
    fn refresh(&mut self) -> Vec<Effect> {
        Vec::new()
    }

    /// Debounce timers; called on every loop iteration for the top view.
    fn tick(&mut self, _now: Instant) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Effect>;

    fn on_outcome(&mut self, outcome: Outcome) -> Vec<Effect>;

    fn on_confirm(&mut self, _action: PendingAction) -> Vec<Effect> {
        Vec::new()
    }

    fn on_text_input(&mut self, _action: TextInputAction, _value: String) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    updated_at: &str,
    area: Rect,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            super::fmt_ts_ui(updated_at),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
