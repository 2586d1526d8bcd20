use crate::error::ApiError;
use crate::model::Resource;

use super::{FetchTicket, OptionSource, SelectOption, Selector, SelectorConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeMode {
    /// List filters: every level is shown and offers "All"; an empty parent
    /// means the child lists unscoped.
    Filter,
    /// Data entry: a child level is shown only once its parent has a value.
    Form,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeTicket {
    pub level: usize,
    pub resource: Resource,
    pub ticket: FetchTicket,
}

/// A chain of selectors where each level scopes the next one
/// (Vocabulary → Section → Category).
#[derive(Clone, Debug)]
pub struct Cascade {
    mode: CascadeMode,
    levels: Vec<Selector>,
}

impl Cascade {
    pub fn filters(resources: &[Resource]) -> Self {
        Self {
            mode: CascadeMode::Filter,
            levels: resources
                .iter()
                .map(|r| Selector::new(SelectorConfig::for_resource(*r, true), None))
                .collect(),
        }
    }

    /// Category is optional on forms; every other level is required.
    pub fn form(resources: &[Resource]) -> Self {
        Self {
            mode: CascadeMode::Form,
            levels: resources
                .iter()
                .map(|r| {
                    let mut config = SelectorConfig::for_resource(*r, *r == Resource::Category);
                    if config.allows_empty() {
                        config.all_label = Some("No category".to_string());
                    }
                    Selector::new(config, None)
                })
                .collect(),
        }
    }

    pub fn mode(&self) -> CascadeMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_of(&self, resource: Resource) -> Option<usize> {
        self.levels.iter().position(|s| s.resource() == resource)
    }

    pub fn selector(&self, level: usize) -> Option<&Selector> {
        self.levels.get(level)
    }

    pub fn selector_mut(&mut self, level: usize) -> Option<&mut Selector> {
        self.levels.get_mut(level)
    }

    pub fn selected(&self, level: usize) -> &str {
        self.levels
            .get(level)
            .map(|s| s.selected_id())
            .unwrap_or("")
    }

    pub fn selected_for(&self, resource: Resource) -> &str {
        self.level_of(resource)
            .map(|level| self.selected(level))
            .unwrap_or("")
    }

    pub fn is_visible(&self, level: usize) -> bool {
        match self.levels.get(level) {
            None => false,
            Some(_) if level == 0 => true,
            Some(s) => self.mode == CascadeMode::Filter || s.scope().is_some(),
        }
    }

    /// The open level, if any.
    pub fn open_level(&self) -> Option<usize> {
        self.levels.iter().position(|s| s.is_open())
    }

    /// Opens `level`'s dropdown. A ticket comes back when the last fetch of
    /// that level failed and is being retried.
    pub fn open(&mut self, level: usize) -> Option<CascadeTicket> {
        if !self.is_visible(level) {
            return None;
        }
        let ticket = self.levels.get_mut(level)?.open()?;
        Some(self.wrap(level, ticket))
    }

    /// Fetches for every visible level with its current scope. Used for the
    /// first load and for a manual refresh; selections are kept.
    pub fn mount(&mut self) -> Vec<CascadeTicket> {
        let mut tickets = Vec::new();
        for level in 0..self.levels.len() {
            if self.is_visible(level) {
                let ticket = self.levels[level].mount();
                tickets.push(self.wrap(level, ticket));
            }
        }
        tickets
    }

    /// Programmatic selection (prefilled forms, command-line flags). Dependent
    /// levels are cleared and rescoped.
    pub fn select(&mut self, level: usize, id: &str) -> Vec<CascadeTicket> {
        let Some(sel) = self.levels.get_mut(level) else {
            return Vec::new();
        };
        sel.set_selected(id);
        self.propagate(level)
    }

    /// User picked the highlighted row of `level`'s dropdown.
    pub fn choose_highlighted(&mut self, level: usize) -> Option<Vec<CascadeTicket>> {
        self.levels.get_mut(level)?.choose_highlighted()?;
        Some(self.propagate(level))
    }

    pub fn complete(
        &mut self,
        ticket: &CascadeTicket,
        result: Result<Vec<SelectOption>, ApiError>,
    ) -> bool {
        match self.levels.get_mut(ticket.level) {
            Some(sel) => sel.complete(&ticket.ticket, result),
            None => false,
        }
    }

    /// Runs `tickets` synchronously against `source`.
    pub fn run(&mut self, tickets: Vec<CascadeTicket>, source: &dyn OptionSource) {
        for t in tickets {
            let result = source.fetch_options(t.resource, t.ticket.scope.as_deref());
            self.complete(&t, result);
        }
    }

    fn propagate(&mut self, level: usize) -> Vec<CascadeTicket> {
        let mut tickets = Vec::new();
        for child in level + 1..self.levels.len() {
            let parent = self.levels[child - 1].selected_id().to_string();
            let scope = (!parent.is_empty()).then_some(parent);
            let shown = self.mode == CascadeMode::Filter || scope.is_some();

            let sel = &mut self.levels[child];
            sel.clear_selection();
            sel.dismiss();
            if !shown {
                sel.unmount();
                continue;
            }
            if let Some(ticket) = sel.set_scope(scope) {
                tickets.push(self.wrap(child, ticket));
            }
        }
        tickets
    }

    fn wrap(&self, level: usize, ticket: FetchTicket) -> CascadeTicket {
        CascadeTicket {
            level,
            resource: self.levels[level].resource(),
            ticket,
        }
    }
}

#[cfg(test)]
#[path = "../tests/selector/cascade_tests.rs"]
mod tests;
