use crate::error::ApiError;
use crate::model::Resource;

use super::{OptionSource, SelectOption, filter_options};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorConfig {
    pub resource: Resource,
    /// Shown when nothing valid is selected.
    pub placeholder: String,
    /// Label of the pseudo "All ..." entry; `None` disables empty selection.
    pub all_label: Option<String>,
    pub search_placeholder: String,
}

impl SelectorConfig {
    pub fn for_resource(resource: Resource, allow_empty_selection: bool) -> Self {
        let (singular, plural) = match resource {
            Resource::Vocabulary => ("vocabulary", "vocabularies"),
            Resource::Section => ("section", "sections"),
            Resource::Category => ("category", "categories"),
            Resource::Word => ("word", "words"),
        };
        Self {
            resource,
            placeholder: format!("Select {}", singular),
            all_label: allow_empty_selection.then(|| format!("All {}", plural)),
            search_placeholder: format!("Search {}...", plural),
        }
    }

    pub fn allows_empty(&self) -> bool {
        self.all_label.is_some()
    }
}

/// Identifies one fetch. Only the newest ticket of a selector may commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub scope: Option<String>,
}

/// One rendered line of an open dropdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorRow<'a> {
    All { label: &'a str, selected: bool },
    Loading,
    Error(&'a str),
    Empty,
    Option { option: &'a SelectOption, selected: bool },
}

impl SelectorRow<'_> {
    pub fn text(&self) -> String {
        match self {
            SelectorRow::All { label, .. } => label.to_string(),
            SelectorRow::Loading => super::LOADING.to_string(),
            SelectorRow::Error(msg) => msg.to_string(),
            SelectorRow::Empty => super::NO_RESULTS.to_string(),
            SelectorRow::Option { option, .. } => option.label.clone(),
        }
    }

    fn choice(&self) -> Option<&str> {
        match self {
            SelectorRow::All { .. } => Some(""),
            SelectorRow::Option { option, .. } => Some(option.id.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Selector {
    config: SelectorConfig,
    scope: Option<String>,

    all_options: Vec<SelectOption>,
    filter_text: String,
    selected_id: String,

    is_open: bool,
    is_loading: bool,
    error_message: Option<String>,

    latest_seq: u64,
    highlighted: usize,
}

fn normalize_scope(scope: Option<String>) -> Option<String> {
    scope.filter(|s| !s.trim().is_empty())
}

impl Selector {
    pub fn new(config: SelectorConfig, scope: Option<String>) -> Self {
        Self {
            config,
            scope: normalize_scope(scope),
            all_options: Vec::new(),
            filter_text: String::new(),
            selected_id: String::new(),
            is_open: false,
            is_loading: false,
            error_message: None,
            latest_seq: 0,
            highlighted: 0,
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn resource(&self) -> Resource {
        self.config.resource
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn all_options(&self) -> &[SelectOption] {
        &self.all_options
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Initial load.
    pub fn mount(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Moves the selector to a new parent scope. Returns a ticket only when the
    /// scope actually changed.
    pub fn set_scope(&mut self, scope: Option<String>) -> Option<FetchTicket> {
        let scope = normalize_scope(scope);
        if scope == self.scope {
            return None;
        }
        self.scope = scope;
        Some(self.begin_fetch())
    }

    /// Drops loaded state and invalidates any fetch in flight. Used when the
    /// selector is hidden; the next `set_scope(Some(..))` fetches again.
    pub fn unmount(&mut self) {
        self.latest_seq += 1;
        self.scope = None;
        self.all_options.clear();
        self.filter_text.clear();
        self.error_message = None;
        self.is_loading = false;
        self.is_open = false;
        self.highlighted = 0;
    }

    /// Starts a fetch for the current scope; supersedes any fetch in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.is_loading = true;
        FetchTicket {
            seq: self.latest_seq,
            scope: self.scope.clone(),
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Commits a fetch result. Superseded tickets are ignored and return false.
    /// A failure keeps the last good options and records the message.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<SelectOption>, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                resource = %self.config.resource,
                seq = ticket.seq,
                latest = self.latest_seq,
                "dropping superseded option fetch"
            );
            return false;
        }

        self.is_loading = false;
        match result {
            Ok(options) => {
                self.all_options = options;
                self.error_message = None;
            }
            Err(err) => {
                tracing::warn!(resource = %self.config.resource, error = %err, "option fetch failed");
                self.error_message = Some(err.user_message());
            }
        }
        self.clamp_highlight();
        true
    }

    /// Fetches synchronously from `source` and commits the result.
    pub fn refresh_with(&mut self, source: &dyn OptionSource) -> bool {
        let ticket = self.begin_fetch();
        let result = source.fetch_options(self.config.resource, ticket.scope.as_deref());
        self.complete(&ticket, result)
    }

    pub fn filtered_options(&self) -> Vec<&SelectOption> {
        filter_options(&self.all_options, &self.filter_text)
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.highlighted = 0;
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_text.push(c);
        self.highlighted = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_text.pop();
        self.highlighted = 0;
    }

    /// Opens the dropdown. Re-opening after a failed fetch retries it; the
    /// returned ticket must be run by the owner.
    pub fn open(&mut self) -> Option<FetchTicket> {
        self.is_open = true;
        let retry = (self.error_message.is_some() && !self.is_loading).then(|| self.begin_fetch());
        self.clamp_highlight();
        retry
    }

    pub fn toggle(&mut self) -> Option<FetchTicket> {
        if self.is_open {
            self.dismiss();
            None
        } else {
            self.open()
        }
    }

    /// Closes without choosing. Selection and filter text are left alone.
    pub fn dismiss(&mut self) {
        self.is_open = false;
    }

    /// Rows of the open dropdown: the "All" entry first, then a status row,
    /// then the filtered options. After a failed fetch the last good options
    /// stay listed under the error row.
    pub fn rows(&self) -> Vec<SelectorRow<'_>> {
        let mut rows = Vec::new();
        if let Some(label) = self.config.all_label.as_deref() {
            rows.push(SelectorRow::All {
                label,
                selected: self.selected_id.is_empty(),
            });
        }

        if self.is_loading {
            rows.push(SelectorRow::Loading);
            return rows;
        }
        let error = self.error_message.as_deref();
        if let Some(msg) = error {
            rows.push(SelectorRow::Error(msg));
        }

        let filtered = self.filtered_options();
        if filtered.is_empty() && error.is_none() {
            rows.push(SelectorRow::Empty);
        }
        for option in filtered {
            rows.push(SelectorRow::Option {
                option,
                selected: option.id == self.selected_id,
            });
        }
        rows
    }

    pub fn move_highlight(&mut self, delta: i32) {
        let n = self.rows().len();
        if n == 0 {
            self.highlighted = 0;
            return;
        }
        let max = n - 1;
        self.highlighted = if delta < 0 {
            self.highlighted.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.highlighted + delta as usize).min(max)
        };
    }

    /// Chooses the highlighted row, if it is selectable.
    pub fn choose_highlighted(&mut self) -> Option<String> {
        let id = self
            .rows()
            .get(self.highlighted)
            .and_then(|row| row.choice())
            .map(str::to_string)?;
        self.choose(&id)
    }

    /// User choice: records it, closes the dropdown and clears the filter text.
    /// Returns the id to hand to the owner; `""` stands for "All".
    pub fn choose(&mut self, id: &str) -> Option<String> {
        let valid = if id.is_empty() {
            self.config.allows_empty()
        } else {
            self.all_options.iter().any(|o| o.id == id)
        };
        if !valid {
            return None;
        }
        self.selected_id = id.to_string();
        self.is_open = false;
        self.filter_text.clear();
        self.highlighted = 0;
        Some(self.selected_id.clone())
    }

    /// Controlled value pushed down by the owner (e.g. a prefilled form or a
    /// cleared dependent field). Not validated against the loaded options.
    pub fn set_selected(&mut self, id: impl Into<String>) {
        self.selected_id = id.into();
    }

    pub fn clear_selection(&mut self) {
        self.selected_id.clear();
    }

    /// The selected option, if it is part of the current option list.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        if self.selected_id.is_empty() {
            return None;
        }
        self.all_options.iter().find(|o| o.id == self.selected_id)
    }

    /// Closed-state label: the "All" label, the selected option's label, or the
    /// placeholder when the id is unknown (not loaded yet, or stale).
    pub fn display_label(&self) -> String {
        if self.selected_id.is_empty()
            && let Some(all) = self.config.all_label.as_deref()
        {
            return all.to_string();
        }
        self.selected_option()
            .map(|o| o.label.clone())
            .unwrap_or_else(|| self.config.placeholder.clone())
    }

    fn clamp_highlight(&mut self) {
        let n = self.rows().len();
        self.highlighted = self.highlighted.min(n.saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "../tests/selector/selector_tests.rs"]
mod tests;
