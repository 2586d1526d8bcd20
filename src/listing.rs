//! Paginated list state shared by the four list screens: filters, debounced
//! search, page navigation and the delete flow.

use std::time::{Duration, Instant};

use crate::debounce::Debounced;
use crate::error::ApiError;
use crate::model::{Page, Pagination, Resource};
use crate::remote::{Ack, ListParams};

/// Filter keys a resource's listing accepts, besides `search`/`page`/`limit`.
pub fn filter_keys(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::Vocabulary => &["type"],
        Resource::Section => &["vocabulary"],
        Resource::Category => &["section"],
        Resource::Word => &["vocabulary", "section", "category"],
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub resource: Resource,
    pub search: String,
    filters: Vec<(&'static str, String)>,
    pub page: u32,
    pub limit: u32,
}

impl ListQuery {
    pub fn new(resource: Resource, limit: u32) -> Self {
        Self {
            resource,
            search: String::new(),
            filters: filter_keys(resource)
                .iter()
                .map(|k| (*k, String::new()))
                .collect(),
            page: 1,
            limit,
        }
    }

    pub fn filter(&self, key: &str) -> &str {
        self.filters
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Returns true when the value changed. Keys the resource does not accept
    /// are ignored.
    pub fn set_filter(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        match self.filters.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) if v != value => {
                *v = value.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn params(&self) -> ListParams {
        let mut params = ListParams::new();
        for (k, v) in &self.filters {
            params.push(*k, v.as_str());
        }
        params.push("search", self.search.as_str());
        params.push("page", self.page.to_string());
        params.push("limit", self.limit.to_string());
        params
    }
}

/// Identifies one list fetch; only the newest ticket commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListTicket {
    pub seq: u64,
    pub page: u32,
    pub params: ListParams,
}

/// What the screen should do after a delete request finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted; refetch the current page.
    Refetch { message: String, ticket: ListTicket },
    /// Failed; show a blocking alert. Rows are left as they were.
    Alert(String),
}

#[derive(Clone, Debug)]
pub struct ListState<T> {
    query: ListQuery,
    search_input: String,
    search: Debounced<String>,

    rows: Vec<T>,
    pagination: Pagination,
    selected: usize,

    is_loading: bool,
    error_message: Option<String>,
    latest_seq: u64,
}

impl<T> ListState<T> {
    pub fn new(resource: Resource, limit: u32, debounce: Duration) -> Self {
        Self {
            query: ListQuery::new(resource, limit),
            search_input: String::new(),
            search: Debounced::new(debounce),
            rows: Vec::new(),
            pagination: Pagination::first(limit),
            selected: 0,
            is_loading: false,
            error_message: None,
            latest_seq: 0,
        }
    }

    pub fn resource(&self) -> Resource {
        self.query.resource
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&T> {
        self.rows.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let max = self.rows.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    pub fn mount(&mut self) -> ListTicket {
        self.begin_fetch()
    }

    pub fn refresh(&mut self) -> ListTicket {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> ListTicket {
        self.latest_seq += 1;
        self.is_loading = true;
        ListTicket {
            seq: self.latest_seq,
            page: self.query.page,
            params: self.query.params(),
        }
    }

    pub fn is_current(&self, ticket: &ListTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Edits the search box. The query is only updated once the input has
    /// been quiet for the debounce delay; see [`ListState::tick`].
    pub fn set_search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search_input = text.into();
        self.search.set(self.search_input.clone(), now);
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        let mut text = self.search_input.clone();
        text.push(c);
        self.set_search_input(text, now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        let mut text = self.search_input.clone();
        text.pop();
        self.set_search_input(text, now);
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Applies a settled search value. Resets to page 1.
    pub fn tick(&mut self, now: Instant) -> Option<ListTicket> {
        let value = self.search.poll(now)?;
        self.apply_search(value)
    }

    /// Applies the search box immediately (Enter).
    pub fn flush_search(&mut self) -> Option<ListTicket> {
        let value = self.search.flush()?;
        self.apply_search(value)
    }

    fn apply_search(&mut self, value: String) -> Option<ListTicket> {
        let value = value.trim().to_string();
        if value == self.query.search {
            return None;
        }
        self.query.search = value;
        self.query.page = 1;
        Some(self.begin_fetch())
    }

    /// Changes one filter; a change resets to page 1 and refetches.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Option<ListTicket> {
        self.set_filters(&[(key, value)])
    }

    /// Changes several filters at once with at most one refetch.
    pub fn set_filters(&mut self, values: &[(&str, &str)]) -> Option<ListTicket> {
        let mut changed = false;
        for (k, v) in values {
            changed |= self.query.set_filter(k, v);
        }
        if !changed {
            return None;
        }
        self.query.page = 1;
        Some(self.begin_fetch())
    }

    pub fn next_page(&mut self) -> Option<ListTicket> {
        if !self.pagination.has_next_page {
            return None;
        }
        self.query.page += 1;
        Some(self.begin_fetch())
    }

    pub fn prev_page(&mut self) -> Option<ListTicket> {
        if !self.pagination.has_prev_page || self.query.page <= 1 {
            return None;
        }
        self.query.page -= 1;
        Some(self.begin_fetch())
    }

    /// Commits a fetch result. A superseded ticket is ignored; a failure keeps
    /// the rows on screen and records the message.
    pub fn complete(&mut self, ticket: &ListTicket, result: Result<Page<T>, ApiError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                resource = %self.query.resource,
                seq = ticket.seq,
                latest = self.latest_seq,
                "dropping superseded list fetch"
            );
            return false;
        }
        self.is_loading = false;
        match result {
            Ok(page) => {
                let mut pagination = page.pagination;
                if pagination.page.is_none() {
                    pagination.page = Some(ticket.page);
                }
                if pagination.limit.is_none() {
                    pagination.limit = Some(self.query.limit);
                }
                self.rows = page.items;
                self.pagination = pagination;
                self.error_message = None;
                self.selected = self.selected.min(self.rows.len().saturating_sub(1));
            }
            Err(err) => {
                tracing::warn!(resource = %self.query.resource, error = %err, "list fetch failed");
                self.error_message = Some(err.user_message());
            }
        }
        true
    }

    pub fn finish_delete(&mut self, result: Result<Ack, ApiError>) -> DeleteOutcome {
        match result {
            Ok(ack) => DeleteOutcome::Refetch {
                message: ack.message,
                ticket: self.begin_fetch(),
            },
            Err(err) => {
                tracing::warn!(resource = %self.query.resource, error = %err, "delete failed");
                DeleteOutcome::Alert(err.user_message())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
