use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ApiError;
use crate::tui::TuiRunOptions;

use super::*;

/// Records what the app routes to it.
struct StubView {
    log: Rc<RefCell<Vec<String>>>,
}

impl View for StubView {
    fn title(&self) -> String {
        "Stub".to_string()
    }

    fn updated_at(&self) -> &str {
        ""
    }

    fn hints(&self) -> &'static str {
        ""
    }

    fn refresh(&mut self) -> Vec<Effect> {
        self.log.borrow_mut().push("refresh".to_string());
        Vec::new()
    }

    fn handle_key(&mut self, _key: KeyEvent, _now: Instant) -> Vec<Effect> {
        Vec::new()
    }

    fn on_outcome(&mut self, outcome: Outcome) -> Vec<Effect> {
        self.log.borrow_mut().push(format!("outcome:{}", outcome.error().is_some()));
        Vec::new()
    }

    fn on_confirm(&mut self, action: PendingAction) -> Vec<Effect> {
        self.log.borrow_mut().push(format!("confirm:{:?}", action));
        Vec::new()
    }

    fn render(&self, _frame: &mut ratatui::Frame, _area: ratatui::layout::Rect) {}
}

fn test_app(dir: &tempfile::TempDir) -> App {
    let store = LocalStore::open(dir.path()).unwrap();
    let config = store.read_config().unwrap();
    App::load(TuiRunOptions { store, config }).unwrap()
}

fn push_stub(app: &mut App) -> (u64, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    app.push_view(Box::new(StubView { log: log.clone() }));
    (app.top_generation(), log)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
}

fn network_error() -> ApiError {
    ApiError::Network {
        detail: "connection refused".to_string(),
    }
}

#[test]
fn starts_on_home_with_login_prompt_when_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    assert_eq!(app.frames.len(), 1);
    assert_eq!(app.view().map(|v| v.title()), Some("Home".to_string()));
    let modal = app.modal.as_ref().unwrap();
    assert_eq!(modal.owner, APP_GENERATION);
    assert!(matches!(
        modal.kind,
        ModalKind::TextInput {
            action: TextInputAction::LoginPhone,
            ..
        }
    ));
}

#[test]
fn cancelling_login_keeps_dashboard_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    press(&mut app, KeyCode::Esc);
    assert!(app.modal.is_none());
    assert!(app.login.is_none());
    assert!(!app.quit);
}

#[test]
fn completions_are_routed_by_generation() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    app.close_modal();

    let (generation, log) = push_stub(&mut app);
    app.deliver(Completion {
        generation,
        outcome: Outcome::Word(Err(network_error())),
    });
    assert_eq!(log.borrow().as_slice(), ["outcome:true"]);
}

#[test]
fn completions_for_closed_screens_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    app.close_modal();

    let (generation, log) = push_stub(&mut app);
    app.pop_view();
    app.deliver(Completion {
        generation,
        outcome: Outcome::Word(Err(network_error())),
    });
    assert!(log.borrow().is_empty());
    assert_eq!(app.frames.len(), 1);
}

#[test]
fn home_is_never_popped() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    app.pop_view();
    app.pop_view();
    assert_eq!(app.frames.len(), 1);
}

#[test]
fn pop_and_refresh_refreshes_the_screen_below() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    app.close_modal();

    let (_, below) = push_stub(&mut app);
    let (top, _) = push_stub(&mut app);
    app.apply_effects(top, vec![Effect::Status("Saved".to_string()), Effect::PopAndRefresh]);

    assert_eq!(app.frames.len(), 2);
    assert_eq!(below.borrow().as_slice(), ["refresh"]);
    assert_eq!(app.last_result.as_ref().map(|r| r.text.as_str()), Some("Saved"));
}

#[test]
fn confirmation_is_routed_to_its_owner() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    app.close_modal();

    let (generation, log) = push_stub(&mut app);
    let action = PendingAction::Delete {
        resource: crate::model::Resource::Word,
        id: "w1".to_string(),
    };
    app.apply_effects(
        generation,
        vec![Effect::Confirm {
            title: "Delete word".to_string(),
            lines: vec![],
            action: action.clone(),
        }],
    );
    press(&mut app, KeyCode::Enter);

    assert!(app.modal.is_none());
    assert_eq!(log.borrow().as_slice(), [format!("confirm:{:?}", action)]);
}

#[test]
fn unauthorized_completion_resets_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    app.close_modal();
    app.session.set("tok");
    app.store
        .save_session(&app.config.base_url, &app.session)
        .unwrap();

    let (generation, log) = push_stub(&mut app);
    app.deliver(Completion {
        generation,
        outcome: Outcome::Deleted(Err(ApiError::Unauthorized)),
    });

    assert!(log.borrow().is_empty());
    assert_eq!(app.frames.len(), 1);
    assert!(!app.session.is_authenticated());
    let stored = app.store.load_session(&app.config.base_url).unwrap();
    assert!(!stored.is_authenticated());
    assert!(app.login.is_some());
    assert!(app.modal.is_some());
}

#[test]
fn successful_login_persists_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    let profile = AdminProfile {
        id: Some("a1".to_string()),
        name: "Ada".to_string(),
        phone: "0700".to_string(),
        role: "admin".to_string(),
    };
    app.deliver(Completion {
        generation: APP_GENERATION,
        outcome: Outcome::LoggedIn(Ok(("tok".to_string(), profile.clone()))),
    });

    assert_eq!(app.profile.as_ref(), Some(&profile));
    assert_eq!(app.session.token(), Some("tok"));
    let stored = app.store.load_session(&app.config.base_url).unwrap();
    assert_eq!(stored.token(), Some("tok"));
}

#[test]
fn role_mismatch_at_login_reopens_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    app.close_modal();
    app.deliver(Completion {
        generation: APP_GENERATION,
        outcome: Outcome::LoggedIn(Err(ApiError::Unauthorized)),
    });
    let last = app.last_result.as_ref().unwrap();
    assert_eq!(last.kind, EntryKind::Error);
    assert!(last.text.contains("`admin` role"));
    assert!(app.modal.is_some());
}

#[test]
fn ctrl_c_quits_even_with_modal_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(&dir);
    assert!(app.modal.is_some());
    app.handle_key(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Instant::now(),
    );
    assert!(app.quit);
}
