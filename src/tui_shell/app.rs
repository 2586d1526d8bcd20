use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::model::{AdminProfile, ClientConfig};
use crate::remote::RemoteClient;
use crate::store::{AuthSession, LocalStore};

use super::input::Input;
use super::modal;
use super::views::{HomeView, ListSettings};
use super::{Effect, Job, Outcome, PendingAction, TextInputAction, View};

mod event_loop;
mod modal_output;
mod render;
mod session;
mod time_utils;
mod worker;

pub(in crate::tui_shell) use self::time_utils::{fmt_ts_ui, now_ts};

/// Generation of jobs owned by the app itself (login, profile check).
const APP_GENERATION: u64 = 0;

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let mut app = App::load(opts)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    tracing::info!(base_url = %app.config.base_url, "dashboard started");
    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// One screen on the stack. Completions are routed by `generation`.
struct ViewFrame {
    generation: u64,
    view: Box<dyn View>,
}

struct Completion {
    generation: u64,
    outcome: Outcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
struct StatusEntry {
    ts: String,
    kind: EntryKind,
    text: String,
}

#[derive(Clone, Debug)]
pub(super) enum ModalKind {
    Viewer,
    ConfirmAction { action: PendingAction },
    TextInput { action: TextInputAction, prompt: String },
}

#[derive(Clone, Debug)]
pub(super) struct Modal {
    pub(super) title: String,
    pub(super) lines: Vec<String>,
    pub(super) scroll: usize,
    pub(super) kind: ModalKind,
    pub(super) input: Input,
    /// Generation that receives the modal's result.
    pub(super) owner: u64,
}

/// Phone/password prompts run before the dashboard is usable.
#[derive(Clone, Debug, Default)]
struct LoginWizard {
    phone: String,
}

pub(super) struct App {
    store: LocalStore,
    config: ClientConfig,
    session: AuthSession,
    client: RemoteClient,

    profile: Option<AdminProfile>,
    auth_note: Option<String>,
    last_result: Option<StatusEntry>,

    modal: Option<Modal>,
    login: Option<LoginWizard>,

    frames: Vec<ViewFrame>,
    next_generation: u64,

    tx: Sender<Completion>,
    rx: Receiver<Completion>,

    quit: bool,
}

impl App {
    fn load(opts: crate::tui::TuiRunOptions) -> Result<Self> {
        let crate::tui::TuiRunOptions { store, config } = opts;
        let session = store.load_session(&config.base_url)?;
        let client = RemoteClient::new(&config.base_url, &session)?;
        let (tx, rx) = mpsc::channel();

        let mut app = Self {
            store,
            config,
            session,
            client,
            profile: None,
            auth_note: None,
            last_result: None,
            modal: None,
            login: None,
            frames: Vec::new(),
            next_generation: APP_GENERATION + 1,
            tx,
            rx,
            quit: false,
        };

        let home = HomeView::new(ListSettings::from_config(&app.config));
        app.push_view(Box::new(home));

        if app.session.is_authenticated() {
            app.auth_note = Some("checking session…".to_string());
            app.spawn_profile_check();
        } else {
            app.start_login(None);
        }
        Ok(app)
    }

    fn top(&self) -> Option<&ViewFrame> {
        self.frames.last()
    }

    fn top_generation(&self) -> u64 {
        self.top().map(|f| f.generation).unwrap_or(APP_GENERATION)
    }

    pub(super) fn view(&self) -> Option<&dyn View> {
        self.top().map(|f| f.view.as_ref())
    }

    fn push_view(&mut self, mut view: Box<dyn View>) {
        let generation = self.next_generation;
        self.next_generation += 1;
        tracing::debug!(generation, title = %view.title(), "push view");
        let effects = view.mount();
        self.frames.push(ViewFrame { generation, view });
        self.apply_effects(generation, effects);
    }

    /// The bottom (home) screen is never popped.
    fn pop_view(&mut self) {
        if self.frames.len() > 1
            && let Some(frame) = self.frames.pop()
        {
            tracing::debug!(generation = frame.generation, "pop view");
        }
    }

    fn refresh_top(&mut self) {
        let generation = self.top_generation();
        let effects = match self.frames.last_mut() {
            Some(frame) => frame.view.refresh(),
            None => return,
        };
        self.apply_effects(generation, effects);
    }

    fn tick(&mut self, now: Instant) {
        let generation = self.top_generation();
        let effects = match self.frames.last_mut() {
            Some(frame) => frame.view.tick(now),
            None => return,
        };
        self.apply_effects(generation, effects);
    }

    fn apply_effects(&mut self, generation: u64, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Spawn(job) => self.spawn_job(generation, job),
                Effect::Push(view) => self.push_view(view),
                Effect::Pop => self.pop_view(),
                Effect::PopAndRefresh => {
                    self.pop_view();
                    self.refresh_top();
                }
                Effect::Status(text) => self.push_output(text),
                Effect::Error(text) => self.push_error(text),
                Effect::Alert { title, message } => {
                    self.open_modal(title, vec![message], generation)
                }
                Effect::Confirm {
                    title,
                    lines,
                    action,
                } => self.open_confirm_modal(title, lines, action, generation),
                Effect::TextInput {
                    title,
                    prompt,
                    action,
                    initial,
                    lines,
                } => self.open_text_input_modal(title, prompt, action, initial, lines, generation),
                Effect::Login => self.start_login(None),
                Effect::Logout => self.logout(),
                Effect::Quit => self.quit = true,
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        if self.modal.is_some() {
            modal::handle_modal_key(self, key);
            return;
        }
        let generation = self.top_generation();
        let effects = match self.frames.last_mut() {
            Some(frame) => frame.view.handle_key(key, now),
            None => return,
        };
        self.apply_effects(generation, effects);
    }

    /// Routes a confirmed modal to the screen that opened it.
    pub(super) fn on_confirm(&mut self, owner: u64, action: PendingAction) {
        let effects = match self.frames.iter_mut().find(|f| f.generation == owner) {
            Some(frame) => frame.view.on_confirm(action),
            None => return,
        };
        self.apply_effects(owner, effects);
    }

    pub(super) fn on_text_input(&mut self, owner: u64, action: TextInputAction, value: String) {
        if owner == APP_GENERATION {
            self.on_login_input(action, value);
            return;
        }
        let effects = match self.frames.iter_mut().find(|f| f.generation == owner) {
            Some(frame) => frame.view.on_text_input(action, value),
            None => return,
        };
        self.apply_effects(owner, effects);
    }

    /// Esc on a text prompt; only the login wizard cares.
    pub(super) fn on_text_input_cancelled(&mut self, owner: u64) {
        if owner == APP_GENERATION && self.login.take().is_some() {
            self.push_output("Login cancelled; press l on Home to log in.");
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
