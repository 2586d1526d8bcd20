use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::model::{Category, ClientConfig, Resource, Section, Vocabulary, Word};

use super::super::{Effect, Outcome, View, now_ts, render_view_chrome};
use super::ListView;

/// Per-list settings taken from the client config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) struct ListSettings {
    pub(in crate::tui_shell) page_limit: u32,
    pub(in crate::tui_shell) search_debounce: Duration,
}

impl ListSettings {
    pub(in crate::tui_shell) fn from_config(config: &ClientConfig) -> Self {
        Self {
            page_limit: config.page_limit,
            search_debounce: config.search_debounce(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuItem {
    Open(Resource),
    Login,
    Logout,
    Quit,
}

const MENU: [MenuItem; 7] = [
    MenuItem::Open(Resource::Vocabulary),
    MenuItem::Open(Resource::Section),
    MenuItem::Open(Resource::Category),
    MenuItem::Open(Resource::Word),
    MenuItem::Login,
    MenuItem::Logout,
    MenuItem::Quit,
];

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            MenuItem::Open(r) => r.title(),
            MenuItem::Login => "Log in",
            MenuItem::Logout => "Log out",
            MenuItem::Quit => "Quit",
        }
    }
}

pub(in crate::tui_shell) struct HomeView {
    settings: ListSettings,
    updated_at: String,
    selected: usize,
}

impl HomeView {
    pub(in crate::tui_shell) fn new(settings: ListSettings) -> Self {
        Self {
            settings,
            updated_at: now_ts(),
            selected: 0,
        }
    }

    fn activate(&self, item: MenuItem) -> Vec<Effect> {
        let view: Box<dyn View> = match item {
            MenuItem::Open(Resource::Vocabulary) => Box::new(ListView::<Vocabulary>::new(self.settings)),
            MenuItem::Open(Resource::Section) => Box::new(ListView::<Section>::new(self.settings)),
            MenuItem::Open(Resource::Category) => Box::new(ListView::<Category>::new(self.settings)),
            MenuItem::Open(Resource::Word) => Box::new(ListView::<Word>::new(self.settings)),
            MenuItem::Login => return vec![Effect::Login],
            MenuItem::Logout => return vec![Effect::Logout],
            MenuItem::Quit => return vec![Effect::Quit],
        };
        vec![Effect::Push(view)]
    }
}

impl View for HomeView {
    fn title(&self) -> String {
        "Home".to_string()
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn hints(&self) -> &'static str {
        "↑↓ move  enter open  1-4 jump  l log in  q quit"
    }

    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> Vec<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(MENU.len() - 1);
                Vec::new()
            }
            KeyCode::Enter => self.activate(MENU[self.selected]),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                self.selected = idx;
                self.activate(MENU[idx])
            }
            KeyCode::Char('l') => vec![Effect::Login],
            KeyCode::Char('q') | KeyCode::Esc => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn on_outcome(&mut self, _outcome: Outcome) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let inner = render_view_chrome(frame, &self.title(), self.updated_at(), area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Manage the vocabulary catalog.",
                Style::default().fg(Color::Gray),
            ))),
            parts[0],
        );

        let items: Vec<ListItem> = MENU
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let key = if i < 4 {
                    format!("{} ", i + 1)
                } else {
                    "  ".to_string()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(key, Style::default().fg(Color::DarkGray)),
                    Span::raw(item.label()),
                ]))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.selected));
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, parts[1], &mut state);
    }
}
