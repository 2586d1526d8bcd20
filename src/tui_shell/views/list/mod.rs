use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::forms::CatalogForm;
use crate::listing::{DeleteOutcome, ListState, ListTicket};
use crate::model::{Resource, VocabularyType};
use crate::remote::RemoteClient;
use crate::selector::{Cascade, SelectOption, Selector, SelectorConfig};

use super::super::effects::{options_job, options_jobs};
use super::super::{Effect, Outcome, PendingAction, View, now_ts};
use super::{CatalogRecord, DropdownKey, FormView, ListSettings, WordDetailsView};
use super::{dropdown_key, is_plain_char};

mod render;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Filter(usize),
    Search,
    Table,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FilterSlot {
    Type,
    Level(usize),
}

/// Selectors used as list filters for each resource.
fn filter_levels(resource: Resource) -> &'static [Resource] {
    match resource {
        Resource::Vocabulary => &[],
        Resource::Section => &[Resource::Vocabulary],
        Resource::Category => &[Resource::Section],
        Resource::Word => &[Resource::Vocabulary, Resource::Section, Resource::Category],
    }
}

/// Static "All types / Modern / History" selector; never fetches.
fn type_selector() -> Selector {
    let config = SelectorConfig {
        resource: Resource::Vocabulary,
        placeholder: "Select type".to_string(),
        all_label: Some("All types".to_string()),
        search_placeholder: "Search types...".to_string(),
    };
    let mut sel = Selector::new(config, None);
    let ticket = sel.begin_fetch();
    let options = VocabularyType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect();
    sel.complete(&ticket, Ok(options));
    sel
}

fn list_job<T: CatalogRecord>(ticket: ListTicket) -> Effect {
    Effect::Spawn(Box::new(move |client: &RemoteClient| {
        let result = T::fetch(client, &ticket.params);
        Outcome::List { ticket, result }
    }))
}

pub(in crate::tui_shell) struct ListView<T: CatalogRecord> {
    updated_at: String,
    list: ListState<T>,
    type_filter: Option<Selector>,
    filters: Cascade,
    focus: Focus,
}

impl<T: CatalogRecord> ListView<T> {
    pub(in crate::tui_shell) fn new(settings: ListSettings) -> Self {
        Self {
            updated_at: now_ts(),
            list: ListState::new(T::RESOURCE, settings.page_limit, settings.search_debounce),
            type_filter: (T::RESOURCE == Resource::Vocabulary).then(type_selector),
            filters: Cascade::filters(filter_levels(T::RESOURCE)),
            focus: Focus::Table,
        }
    }

    fn slots(&self) -> Vec<FilterSlot> {
        let mut out = Vec::new();
        if self.type_filter.is_some() {
            out.push(FilterSlot::Type);
        }
        out.extend((0..self.filters.len()).map(FilterSlot::Level));
        out
    }

    fn slot_selector(&self, slot: FilterSlot) -> Option<&Selector> {
        match slot {
            FilterSlot::Type => self.type_filter.as_ref(),
            FilterSlot::Level(level) => self.filters.selector(level),
        }
    }

    fn slot_selector_mut(&mut self, slot: FilterSlot) -> Option<&mut Selector> {
        match slot {
            FilterSlot::Type => self.type_filter.as_mut(),
            FilterSlot::Level(level) => self.filters.selector_mut(level),
        }
    }

    /// Focus order: filters top to bottom, then search, then the table.
    fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = (0..self.slots().len()).map(Focus::Filter).collect();
        order.push(Focus::Search);
        order.push(Focus::Table);
        order
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (at + 1) % order.len()
        } else {
            (at + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    fn open_slot(&self) -> Option<FilterSlot> {
        self.slots()
            .into_iter()
            .find(|slot| self.slot_selector(*slot).is_some_and(|s| s.is_open()))
    }

    /// Commits the highlighted dropdown row and pushes every filter value
    /// into the query (one refetch at most).
    fn choose(&mut self, slot: FilterSlot) -> Vec<Effect> {
        let mut effects = Vec::new();
        match slot {
            FilterSlot::Type => {
                let Some(sel) = self.type_filter.as_mut() else {
                    return effects;
                };
                if let Some(id) = sel.choose_highlighted()
                    && let Some(ticket) = self.list.set_filter("type", &id)
                {
                    effects.push(list_job::<T>(ticket));
                }
            }
            FilterSlot::Level(level) => {
                let Some(tickets) = self.filters.choose_highlighted(level) else {
                    return effects;
                };
                effects.extend(options_jobs(tickets));
                let values: Vec<(&str, String)> = (0..self.filters.len())
                    .filter_map(|l| {
                        let sel = self.filters.selector(l)?;
                        Some((sel.resource().segment(), sel.selected_id().to_string()))
                    })
                    .collect();
                let pairs: Vec<(&str, &str)> =
                    values.iter().map(|(k, v)| (*k, v.as_str())).collect();
                if let Some(ticket) = self.list.set_filters(&pairs) {
                    effects.push(list_job::<T>(ticket));
                }
            }
        }
        effects
    }

    fn selected_id(&self) -> Option<String> {
        self.list.selected_row().map(|r| r.id().to_string())
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => vec![Effect::Pop],
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.move_up();
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.move_down();
                Vec::new()
            }
            KeyCode::Char('n') | KeyCode::PageDown | KeyCode::Right => {
                self.list.next_page().map(list_job::<T>).into_iter().collect()
            }
            KeyCode::Char('p') | KeyCode::PageUp | KeyCode::Left => {
                self.list.prev_page().map(list_job::<T>).into_iter().collect()
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                Vec::new()
            }
            KeyCode::Char('c') => vec![Effect::Push(Box::new(FormView::new(
                CatalogForm::create(T::RESOURCE),
            )))],
            KeyCode::Char('e') | KeyCode::Enter => match self.list.selected_row() {
                Some(row) => vec![Effect::Push(Box::new(FormView::new(row.edit_form())))],
                None => Vec::new(),
            },
            KeyCode::Char('v') if T::RESOURCE == Resource::Word => match self.selected_id() {
                Some(id) => vec![Effect::Push(Box::new(WordDetailsView::new(id)))],
                None => Vec::new(),
            },
            KeyCode::Char('d') | KeyCode::Delete => match self.list.selected_row() {
                Some(row) => vec![Effect::Confirm {
                    title: format!("Delete {}", T::RESOURCE),
                    lines: vec![
                        format!("Delete {} `{}`?", T::RESOURCE, row.name()),
                        format!("id: {}", row.id()),
                        String::new(),
                        "Enter or y to delete; Esc to cancel.".to_string(),
                    ],
                    action: PendingAction::Delete {
                        resource: T::RESOURCE,
                        id: row.id().to_string(),
                    },
                }],
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Effect> {
        if let Some(c) = is_plain_char(&key) {
            self.list.push_search_char(c, now);
            return Vec::new();
        }
        match key.code {
            KeyCode::Backspace => {
                self.list.pop_search_char(now);
                Vec::new()
            }
            KeyCode::Enter => {
                self.focus = Focus::Table;
                self.list.flush_search().map(list_job::<T>).into_iter().collect()
            }
            KeyCode::Esc => {
                self.focus = Focus::Table;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

impl<T: CatalogRecord> View for ListView<T> {
    fn title(&self) -> String {
        T::RESOURCE.title().to_string()
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn hints(&self) -> &'static str {
        if T::RESOURCE == Resource::Word {
            "tab focus  / search  n/p page  c create  e edit  d delete  v details  r refresh  esc back"
        } else {
            "tab focus  / search  n/p page  c create  e edit  d delete  r refresh  esc back"
        }
    }

    fn mount(&mut self) -> Vec<Effect> {
        let mut effects = vec![list_job::<T>(self.list.mount())];
        effects.extend(options_jobs(self.filters.mount()));
        effects
    }

    fn refresh(&mut self) -> Vec<Effect> {
        let mut effects = vec![list_job::<T>(self.list.refresh())];
        effects.extend(options_jobs(self.filters.mount()));
        effects
    }

    fn tick(&mut self, now: Instant) -> Vec<Effect> {
        self.list.tick(now).map(list_job::<T>).into_iter().collect()
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Effect> {
        if let Some(slot) = self.open_slot() {
            let Some(sel) = self.slot_selector_mut(slot) else {
                return Vec::new();
            };
            return match dropdown_key(sel, key) {
                DropdownKey::Consumed => Vec::new(),
                DropdownKey::Choose => self.choose(slot),
            };
        }

        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return Vec::new();
            }
            _ => {}
        }

        match self.focus {
            Focus::Filter(i) => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    match self.slots().get(i).copied() {
                        Some(FilterSlot::Type) => {
                            if let Some(sel) = self.type_filter.as_mut() {
                                sel.open();
                            }
                            Vec::new()
                        }
                        Some(FilterSlot::Level(level)) => {
                            self.filters.open(level).map(options_job).into_iter().collect()
                        }
                        None => Vec::new(),
                    }
                }
                KeyCode::Esc => {
                    self.focus = Focus::Table;
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Focus::Search => self.handle_search_key(key, now),
            Focus::Table => self.handle_table_key(key),
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::Options { ticket, result } => {
                self.filters.complete(&ticket, result);
                Vec::new()
            }
            Outcome::List { ticket, result } => {
                let result = result.and_then(|page| {
                    T::unwrap_page(page).ok_or_else(|| crate::error::ApiError::Decode {
                        detail: format!("listing did not return {}", T::RESOURCE.title()),
                    })
                });
                if !self.list.complete(&ticket, result) {
                    return Vec::new();
                }
                self.updated_at = now_ts();
                self.list
                    .error_message()
                    .map(|msg| vec![Effect::Error(msg.to_string())])
                    .unwrap_or_default()
            }
            Outcome::Deleted(result) => match self.list.finish_delete(result) {
                DeleteOutcome::Refetch { message, ticket } => {
                    vec![Effect::Status(message), list_job::<T>(ticket)]
                }
                DeleteOutcome::Alert(message) => vec![Effect::Alert {
                    title: "Delete failed".to_string(),
                    message,
                }],
            },
            _ => Vec::new(),
        }
    }

    fn on_confirm(&mut self, action: PendingAction) -> Vec<Effect> {
        match action {
            PendingAction::Delete { resource, id } => {
                vec![Effect::Spawn(Box::new(move |client: &RemoteClient| {
                    Outcome::Deleted(client.delete(resource, &id))
                }))]
            }
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        render::render_list(self, frame, area);
    }
}

#[cfg(test)]
#[path = "../../../tests/tui_shell/list_view_tests.rs"]
mod tests;
