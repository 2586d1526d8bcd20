use super::*;

use std::cell::RefCell;

fn opts(labels: &[(&str, &str)]) -> Vec<SelectOption> {
    labels
        .iter()
        .map(|(id, label)| SelectOption::new(*id, *label))
        .collect()
}

fn loaded(allow_empty: bool, options: Vec<SelectOption>) -> Selector {
    let mut s = Selector::new(
        SelectorConfig::for_resource(Resource::Category, allow_empty),
        None,
    );
    let t = s.mount();
    assert!(s.complete(&t, Ok(options)));
    s
}

struct RecordingSource {
    calls: RefCell<Vec<(Resource, Option<String>)>>,
    reply: Result<Vec<SelectOption>, ApiError>,
}

impl OptionSource for RecordingSource {
    fn fetch_options(
        &self,
        resource: Resource,
        scope: Option<&str>,
    ) -> Result<Vec<SelectOption>, ApiError> {
        self.calls
            .borrow_mut()
            .push((resource, scope.map(str::to_string)));
        self.reply.clone()
    }
}

#[test]
fn filter_keeps_subset_matching_case_insensitively() {
    let all = opts(&[("c1", "Cats [Pets]"), ("c2", "Dogs [Pets]"), ("c3", "Wildcat [Zoo]")]);
    for q in ["", "cat", "CAT", "pets", "zzz", "s ["] {
        let out = filter_options(&all, q);
        for o in &out {
            assert!(all.contains(*o));
            assert!(o.label.to_lowercase().contains(&q.to_lowercase()));
        }
        if q.is_empty() {
            assert_eq!(out.len(), all.len());
        }
    }
    let ids: Vec<&str> = filter_options(&all, "cat").iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c3"]);
}

#[test]
fn typing_filters_locally_without_fetching() {
    let mut s = loaded(false, opts(&[("c1", "Cats"), ("c2", "Dogs")]));
    s.open();
    for c in "cat".chars() {
        s.push_filter_char(c);
    }
    let labels: Vec<String> = s.rows().iter().map(|r| r.text()).collect();
    assert_eq!(labels, vec!["Cats".to_string()]);
    assert!(!s.is_loading());
}

#[test]
fn choose_sets_selection_closes_and_clears_filter() {
    let mut s = loaded(true, opts(&[("c1", "Cats"), ("c2", "Dogs")]));
    s.open();
    s.set_filter_text("do");
    assert_eq!(s.choose("c2"), Some("c2".to_string()));
    assert_eq!(s.selected_id(), "c2");
    assert!(!s.is_open());
    assert_eq!(s.filter_text(), "");

    let before = (s.selected_id().to_string(), s.is_open(), s.filter_text().to_string());
    assert_eq!(s.choose("c2"), Some("c2".to_string()));
    let after = (s.selected_id().to_string(), s.is_open(), s.filter_text().to_string());
    assert_eq!(before, after);
}

#[test]
fn choose_rejects_unknown_ids_and_disallowed_all() {
    let mut s = loaded(false, opts(&[("c1", "Cats")]));
    assert_eq!(s.choose("nope"), None);
    assert_eq!(s.choose(""), None);
    assert_eq!(s.selected_id(), "");
}

#[test]
fn dismiss_keeps_selection_and_filter_text() {
    let mut s = loaded(true, opts(&[("c1", "Cats")]));
    s.choose("c1");
    s.open();
    s.set_filter_text("ca");
    s.dismiss();
    assert!(!s.is_open());
    assert_eq!(s.filter_text(), "ca");
    assert_eq!(s.selected_id(), "c1");
}

#[test]
fn all_entry_is_first_and_not_filtered() {
    let mut s = loaded(true, opts(&[("c1", "Cats"), ("c2", "Dogs")]));
    s.set_filter_text("zzz");
    let rows = s.rows();
    assert!(matches!(rows[0], SelectorRow::All { selected: true, .. }));
    assert_eq!(rows[0].text(), "All categories");
    assert_eq!(rows[1], SelectorRow::Empty);
    assert_eq!(rows[1].text(), "No results found");

    s.choose("c1");
    s.open();
    assert_eq!(s.rows()[0].text(), "All categories");
    assert_eq!(s.choose_highlighted(), Some(String::new()));
    assert_eq!(s.selected_id(), "");
}

#[test]
fn display_label_falls_back_to_placeholder_for_unknown_ids() {
    let mut s = Selector::new(SelectorConfig::for_resource(Resource::Section, false), None);
    s.set_selected("s9");
    assert_eq!(s.display_label(), "Select section");

    let t = s.mount();
    s.complete(&t, Ok(vec![SelectOption::new("s9", "Greetings [Basics - modern]")]));
    assert_eq!(s.display_label(), "Greetings [Basics - modern]");

    let t = s.set_scope(Some("v2".to_string())).unwrap();
    s.complete(&t, Ok(vec![SelectOption::new("s1", "Other [X - history]")]));
    assert_eq!(s.display_label(), "Select section");
    assert!(s.selected_option().is_none());
}

#[test]
fn failed_refetch_keeps_last_good_options() {
    let mut s = loaded(false, opts(&[("c1", "Cats")]));
    let t = s.begin_fetch();
    assert!(s.complete(&t, Err(ApiError::Network { detail: "down".to_string() })));
    assert_eq!(s.all_options().len(), 1);
    assert_eq!(s.error_message(), Some("Network error"));
    assert!(!s.is_loading());

    let t = s.begin_fetch();
    s.complete(&t, Ok(opts(&[("c2", "Dogs")])));
    assert_eq!(s.error_message(), None);
    assert_eq!(s.all_options()[0].id, "c2");
}

#[test]
fn superseded_fetch_is_not_committed() {
    let mut s = Selector::new(SelectorConfig::for_resource(Resource::Section, true), None);
    let first = s.set_scope(Some("v1".to_string())).unwrap();
    let second = s.set_scope(Some("v2".to_string())).unwrap();

    assert!(s.complete(&second, Ok(opts(&[("s2", "From v2")]))));
    assert!(!s.complete(&first, Ok(opts(&[("s1", "From v1")]))));
    assert_eq!(s.all_options()[0].id, "s2");
    assert_eq!(second.scope.as_deref(), Some("v2"));
}

#[test]
fn unchanged_scope_does_not_refetch() {
    let mut s = Selector::new(
        SelectorConfig::for_resource(Resource::Section, true),
        Some("v1".to_string()),
    );
    assert!(s.set_scope(Some("v1".to_string())).is_none());
    assert!(s.set_scope(Some("".to_string())).is_some());
    assert_eq!(s.scope(), None);
}

#[test]
fn refresh_with_passes_scope_to_source() {
    let src = RecordingSource {
        calls: RefCell::new(Vec::new()),
        reply: Ok(Vec::new()),
    };
    let mut s = Selector::new(
        SelectorConfig::for_resource(Resource::Section, false),
        Some("v1".to_string()),
    );
    assert!(s.refresh_with(&src));
    assert_eq!(
        src.calls.borrow().as_slice(),
        &[(Resource::Section, Some("v1".to_string()))]
    );
    s.open();
    assert_eq!(s.rows(), vec![SelectorRow::Empty]);
}

#[test]
fn loading_row_shows_while_fetch_in_flight() {
    let mut s = Selector::new(SelectorConfig::for_resource(Resource::Vocabulary, true), None);
    s.mount();
    let texts: Vec<String> = s.rows().iter().map(|r| r.text()).collect();
    assert_eq!(texts, vec!["All vocabularies".to_string(), "Loading...".to_string()]);
}

#[test]
fn highlight_moves_within_rows() {
    let mut s = loaded(false, opts(&[("c1", "Cats"), ("c2", "Dogs")]));
    s.open();
    s.move_highlight(5);
    assert_eq!(s.highlighted(), 1);
    s.move_highlight(-3);
    assert_eq!(s.highlighted(), 0);
    s.move_highlight(1);
    assert_eq!(s.choose_highlighted(), Some("c2".to_string()));
}

#[test]
fn reopening_after_failed_fetch_retries_and_keeps_options_usable() {
    let mut s = loaded(false, opts(&[("c1", "Cats"), ("c2", "Dogs")]));
    let t = s.begin_fetch();
    s.complete(&t, Err(ApiError::Network { detail: "down".to_string() }));

    let texts: Vec<String> = s.rows().iter().map(|r| r.text()).collect();
    assert_eq!(texts, vec!["Network error", "Cats", "Dogs"]);
    s.move_highlight(1);
    assert_eq!(s.choose_highlighted(), Some("c1".to_string()));

    let retry = s.open().expect("re-opening retries the failed fetch");
    assert!(s.is_loading());
    // Already loading: opening again does not stack another fetch.
    s.dismiss();
    assert!(s.open().is_none());

    assert!(s.complete(&retry, Ok(opts(&[("c3", "Birds")]))));
    assert_eq!(s.error_message(), None);
    let texts: Vec<String> = s.rows().iter().map(|r| r.text()).collect();
    assert_eq!(texts, vec!["Birds"]);
    assert!(s.open().is_none());
}
