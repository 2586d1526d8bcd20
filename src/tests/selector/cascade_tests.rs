use super::*;

use std::cell::RefCell;

struct ScopedSource {
    calls: RefCell<Vec<(Resource, Option<String>)>>,
}

impl ScopedSource {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl OptionSource for ScopedSource {
    fn fetch_options(
        &self,
        resource: Resource,
        scope: Option<&str>,
    ) -> Result<Vec<SelectOption>, ApiError> {
        self.calls
            .borrow_mut()
            .push((resource, scope.map(str::to_string)));
        let tag = scope.unwrap_or("all");
        let out = match resource {
            Resource::Vocabulary => vec![
                SelectOption::new("v1", "Animals (modern)"),
                SelectOption::new("v2", "Food (history)"),
            ],
            Resource::Section => vec![SelectOption::new(format!("s-{}", tag), "Section")],
            Resource::Category => vec![SelectOption::new(format!("c-{}", tag), "Category")],
            Resource::Word => Vec::new(),
        };
        Ok(out)
    }
}

const CHAIN: [Resource; 3] = [Resource::Vocabulary, Resource::Section, Resource::Category];

#[test]
fn filter_mode_mounts_every_level_unscoped() {
    let src = ScopedSource::new();
    let mut c = Cascade::filters(&CHAIN);
    let tickets = c.mount();
    assert_eq!(tickets.len(), 3);
    c.run(tickets, &src);
    assert!(src.calls.borrow().iter().all(|(_, scope)| scope.is_none()));
    assert_eq!(c.selector(1).unwrap().display_label(), "All sections");
}

#[test]
fn changing_vocabulary_rescopes_and_clears_dependents() {
    let src = ScopedSource::new();
    let mut c = Cascade::filters(&CHAIN);
    let t = c.mount();
    c.run(t, &src);

    let t = c.select(0, "v1");
    c.run(t, &src);
    let t = c.select(1, "s-v1");
    c.run(t, &src);
    c.select(2, "c-s-v1");
    assert_eq!(c.selected(2), "c-s-v1");

    src.calls.borrow_mut().clear();
    let tickets = c.select(0, "v2");
    let scoped: Vec<_> = tickets
        .iter()
        .map(|t| (t.resource, t.ticket.scope.clone()))
        .collect();
    assert_eq!(
        scoped,
        vec![
            (Resource::Section, Some("v2".to_string())),
            (Resource::Category, None),
        ]
    );
    assert_eq!(c.selected(1), "");
    assert_eq!(c.selected(2), "");

    c.run(tickets, &src);
    let section_calls = src
        .calls
        .borrow()
        .iter()
        .filter(|(r, _)| *r == Resource::Section)
        .count();
    assert_eq!(section_calls, 1);
}

#[test]
fn form_mode_hides_levels_until_parent_is_chosen() {
    let src = ScopedSource::new();
    let mut c = Cascade::form(&CHAIN);
    let tickets = c.mount();
    assert_eq!(tickets.len(), 1);
    c.run(tickets, &src);
    assert!(!c.is_visible(1));
    assert_eq!(c.selector(0).unwrap().display_label(), "Select vocabulary");
    assert!(c.selector(2).unwrap().config().allows_empty());

    let t = c.select(0, "v1");
    assert_eq!(t.len(), 1);
    c.run(t, &src);
    assert!(c.is_visible(1));
    assert!(!c.is_visible(2));

    let t = c.select(1, "s-v1");
    c.run(t, &src);
    assert!(c.is_visible(2));
    assert_eq!(c.selector(2).unwrap().all_options()[0].id, "c-s-v1");

    // Clearing the vocabulary hides and resets both children.
    let t = c.select(0, "");
    assert!(t.is_empty());
    assert!(!c.is_visible(1));
    assert!(c.selector(2).unwrap().all_options().is_empty());

    // Re-choosing the same vocabulary fetches again.
    let t = c.select(0, "v1");
    assert_eq!(t.len(), 1);
}

#[test]
fn choose_highlighted_propagates() {
    let src = ScopedSource::new();
    let mut c = Cascade::filters(&CHAIN);
    let t = c.mount();
    c.run(t, &src);

    let sel = c.selector_mut(0).unwrap();
    sel.open();
    sel.move_highlight(1); // skip "All vocabularies"
    let tickets = c.choose_highlighted(0).unwrap();
    assert_eq!(c.selected(0), "v1");
    assert_eq!(tickets[0].ticket.scope.as_deref(), Some("v1"));
    assert_eq!(c.open_level(), None);
}

#[test]
fn open_retries_only_visible_failed_levels() {
    let mut c = Cascade::form(&CHAIN);
    let t = c.mount();
    assert_eq!(t.len(), 1);
    c.complete(&t[0], Err(ApiError::api("boom")));

    assert!(c.open(1).is_none(), "hidden level never fetches");
    let retry = c.open(0).expect("failed level retries on open");
    assert_eq!(retry.level, 0);
    assert_eq!(retry.ticket.scope, None);
    assert_eq!(c.open_level(), Some(0));
}
