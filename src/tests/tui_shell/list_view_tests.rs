use std::time::Duration;

use crossterm::event::KeyModifiers;

use super::*;
use crate::error::ApiError;
use crate::model::{Page, Pagination, Vocabulary, Word};
use crate::remote::Ack;
use crate::tui_shell::effects::AnyPage;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn settings() -> ListSettings {
    ListSettings {
        page_limit: 10,
        search_debounce: Duration::from_millis(700),
    }
}

fn vocab(id: &str, name: &str) -> Vocabulary {
    Vocabulary {
        id: id.to_string(),
        name: name.to_string(),
        vocab_type: "modern".to_string(),
        description: String::new(),
        image: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn vocab_page(items: Vec<Vocabulary>) -> AnyPage {
    AnyPage::Vocabulary(Page {
        items,
        pagination: Pagination::default(),
    })
}

fn spawns(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Spawn(_)))
        .count()
}

#[test]
fn word_list_mounts_listing_and_every_filter_level() {
    let mut view = ListView::<Word>::new(settings());
    let effects = view.mount();
    // One listing plus vocabulary, section and category options.
    assert_eq!(spawns(&effects), 4);
    assert_eq!(view.slots().len(), 3);
}

#[test]
fn type_filter_resets_page_and_refetches() {
    let mut view = ListView::<Vocabulary>::new(settings());
    let _ = view.mount();
    assert_eq!(view.focus, Focus::Table);

    // Table -> type filter.
    let _ = view.handle_key(key(KeyCode::Tab), Instant::now());
    assert_eq!(view.focus, Focus::Filter(0));
    let _ = view.handle_key(key(KeyCode::Enter), Instant::now());
    assert!(view.open_slot().is_some());

    // Row 0 is "All types", row 1 is modern.
    let _ = view.handle_key(key(KeyCode::Down), Instant::now());
    let effects = view.handle_key(key(KeyCode::Enter), Instant::now());
    assert_eq!(spawns(&effects), 1);
    assert_eq!(view.list.query().filter("type"), "modern");
    assert_eq!(view.list.query().page, 1);
    assert!(view.open_slot().is_none());
}

#[test]
fn typing_in_open_dropdown_filters_locally() {
    let mut view = ListView::<Vocabulary>::new(settings());
    view.focus = Focus::Filter(0);
    let _ = view.handle_key(key(KeyCode::Enter), Instant::now());
    let effects = view.handle_key(key(KeyCode::Char('h')), Instant::now());
    assert!(effects.is_empty());
    let sel = view.type_filter.as_ref().unwrap();
    assert_eq!(sel.filter_text(), "h");
    let labels: Vec<&str> = sel.filtered_options().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["History"]);
}

#[test]
fn superseded_listing_is_ignored() {
    let mut view = ListView::<Vocabulary>::new(settings());
    let first = view.list.mount();
    let second = view.list.refresh();

    let _ = view.on_outcome(Outcome::List {
        ticket: first,
        result: Ok(vocab_page(vec![vocab("old", "Old")])),
    });
    assert!(view.list.rows().is_empty());

    let _ = view.on_outcome(Outcome::List {
        ticket: second,
        result: Ok(vocab_page(vec![vocab("v1", "Fruits")])),
    });
    assert_eq!(view.list.rows().len(), 1);
    assert_eq!(view.list.rows()[0].name, "Fruits");
}

#[test]
fn listing_error_is_reported_and_rows_kept() {
    let mut view = ListView::<Vocabulary>::new(settings());
    let t = view.list.mount();
    let _ = view.on_outcome(Outcome::List {
        ticket: t,
        result: Ok(vocab_page(vec![vocab("v1", "Fruits")])),
    });

    let t = view.list.refresh();
    let effects = view.on_outcome(Outcome::List {
        ticket: t,
        result: Err(ApiError::api("Failed to fetch vocabularies.")),
    });
    assert!(matches!(&effects[..], [Effect::Error(m)] if m == "Failed to fetch vocabularies."));
    assert_eq!(view.list.rows().len(), 1);
}

#[test]
fn delete_goes_through_confirmation() {
    let mut view = ListView::<Vocabulary>::new(settings());
    let t = view.list.mount();
    let _ = view.on_outcome(Outcome::List {
        ticket: t,
        result: Ok(vocab_page(vec![vocab("v1", "Fruits")])),
    });

    let effects = view.handle_key(key(KeyCode::Char('d')), Instant::now());
    let action = match effects.into_iter().next() {
        Some(Effect::Confirm { action, .. }) => action,
        _ => panic!("expected a confirmation"),
    };
    assert_eq!(
        action,
        PendingAction::Delete {
            resource: Resource::Vocabulary,
            id: "v1".to_string()
        }
    );
    assert_eq!(spawns(&view.on_confirm(action)), 1);
}

#[test]
fn failed_delete_alerts_and_keeps_row() {
    let mut view = ListView::<Vocabulary>::new(settings());
    let t = view.list.mount();
    let _ = view.on_outcome(Outcome::List {
        ticket: t,
        result: Ok(vocab_page(vec![vocab("v1", "Fruits")])),
    });

    let effects = view.on_outcome(Outcome::Deleted(Err(ApiError::api("In use"))));
    assert!(matches!(&effects[..], [Effect::Alert { message, .. }] if message == "In use"));
    assert_eq!(view.list.rows().len(), 1);

    let effects = view.on_outcome(Outcome::Deleted(Ok(Ack {
        message: "Deleted".to_string(),
    })));
    assert!(matches!(&effects[0], Effect::Status(m) if m == "Deleted"));
    assert_eq!(spawns(&effects), 1);
}

#[test]
fn search_waits_for_debounce() {
    let mut view = ListView::<Vocabulary>::new(settings());
    let _ = view.mount();
    let t0 = Instant::now();

    let _ = view.handle_key(key(KeyCode::Char('/')), t0);
    assert_eq!(view.focus, Focus::Search);
    let _ = view.handle_key(key(KeyCode::Char('f')), t0);
    // Typing a shortcut letter in the search box does not trigger it.
    let effects = view.handle_key(key(KeyCode::Char('n')), t0);
    assert!(effects.is_empty());

    assert!(view.tick(t0 + Duration::from_millis(300)).is_empty());
    let effects = view.tick(t0 + Duration::from_millis(700));
    assert_eq!(spawns(&effects), 1);
    assert_eq!(view.list.query().search, "fn");
}

#[test]
fn mismatched_page_kind_is_a_decode_error() {
    let mut view = ListView::<Word>::new(settings());
    let t = view.list.mount();
    let effects = view.on_outcome(Outcome::List {
        ticket: t,
        result: Ok(vocab_page(vec![vocab("v1", "Fruits")])),
    });
    assert!(matches!(&effects[..], [Effect::Error(_)]));
    assert!(view.list.rows().is_empty());
}

#[test]
fn details_only_for_words() {
    let mut view = ListView::<Vocabulary>::new(settings());
    let t = view.list.mount();
    let _ = view.on_outcome(Outcome::List {
        ticket: t,
        result: Ok(vocab_page(vec![vocab("v1", "Fruits")])),
    });
    assert!(view.handle_key(key(KeyCode::Char('v')), Instant::now()).is_empty());
}

#[test]
fn failed_filter_fetch_is_retried_when_reopened() {
    let mut view = ListView::<Word>::new(settings());
    for ticket in view.filters.mount() {
        let _ = view.on_outcome(Outcome::Options {
            ticket,
            result: Err(ApiError::api("Failed to fetch vocabularies.")),
        });
    }
    view.focus = Focus::Filter(0);
    let effects = view.handle_key(key(KeyCode::Enter), Instant::now());
    assert_eq!(spawns(&effects), 1);
    assert_eq!(view.open_slot(), Some(FilterSlot::Level(0)));
}

#[test]
fn refresh_reloads_listing_and_filters() {
    let mut view = ListView::<Word>::new(settings());
    let _ = view.mount();
    let effects = view.handle_key(key(KeyCode::Char('r')), Instant::now());
    assert_eq!(spawns(&effects), 4);
}
