use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::{Resource, Word};
use crate::remote::RemoteClient;

use super::super::{Effect, Outcome, View, now_ts, render_view_chrome};
use super::{CatalogRecord, FormView};

/// Read-only view of one word with its parents' names and image path.
pub(in crate::tui_shell) struct WordDetailsView {
    id: String,
    updated_at: String,
    word: Option<Word>,
    loading: bool,
    error: Option<String>,
}

impl WordDetailsView {
    pub(in crate::tui_shell) fn new(id: String) -> Self {
        Self {
            id,
            updated_at: now_ts(),
            word: None,
            loading: false,
            error: None,
        }
    }

    fn fetch(&mut self) -> Vec<Effect> {
        self.loading = true;
        let id = self.id.clone();
        vec![Effect::Spawn(Box::new(move |client: &RemoteClient| {
            Outcome::Word(client.get_one::<Word>(Resource::Word, &id))
        }))]
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let Some(w) = self.word.as_ref() else {
            return Vec::new();
        };
        let row = |k: &str, v: String| {
            let v = if v.trim().is_empty() { "-".to_string() } else { v };
            Line::from(vec![
                Span::styled(format!("{:<13}", k), Style::default().fg(Color::Gray)),
                Span::raw(v),
            ])
        };
        let vocabulary = if w.vocabulary.vocab_type.is_empty() {
            w.vocabulary.name.clone()
        } else {
            format!("{} ({})", w.vocabulary.name, w.vocabulary.vocab_type)
        };
        vec![
            row("Name", w.name.clone()),
            row("Description", w.description.clone()),
            Line::from(""),
            row("Vocabulary", vocabulary),
            row("Section", w.section.name.clone()),
            row(
                "Category",
                w.category.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
            ),
            row("Image", w.image.clone().unwrap_or_default()),
            Line::from(""),
            row("Id", w.id.clone()),
            row("Created", w.created_at.clone()),
            row("Updated", w.updated_at.clone()),
        ]
    }
}

impl View for WordDetailsView {
    fn title(&self) -> String {
        match self.word.as_ref() {
            Some(w) => format!("Word: {}", w.name),
            None => "Word".to_string(),
        }
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn hints(&self) -> &'static str {
        "e edit  r refresh  esc back"
    }

    fn mount(&mut self) -> Vec<Effect> {
        self.fetch()
    }

    fn refresh(&mut self) -> Vec<Effect> {
        self.fetch()
    }

    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => vec![Effect::Pop],
            KeyCode::Char('r') => self.fetch(),
            KeyCode::Char('e') => match self.word.as_ref() {
                Some(w) => vec![Effect::Push(Box::new(FormView::new(w.edit_form())))],
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) -> Vec<Effect> {
        let Outcome::Word(result) = outcome else {
            return Vec::new();
        };
        self.loading = false;
        match result {
            Ok(word) => {
                self.word = Some(word);
                self.error = None;
                self.updated_at = now_ts();
                Vec::new()
            }
            Err(err) => {
                let msg = err.user_message();
                self.error = Some(msg.clone());
                vec![Effect::Error(msg)]
            }
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let inner = render_view_chrome(frame, &self.title(), self.updated_at(), area);
        let mut lines = self.lines();
        if self.loading && self.word.is_none() {
            lines.push(Line::from(Span::styled(
                crate::selector::LOADING,
                Style::default().fg(Color::Gray),
            )));
        }
        if let Some(err) = self.error.as_deref() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
