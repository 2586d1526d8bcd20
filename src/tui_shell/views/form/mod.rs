use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::forms::{CatalogForm, FieldKind, FieldSpec};
use crate::model::{Resource, VocabularyType};
use crate::remote::RemoteClient;
use crate::selector::Cascade;

use super::super::effects::{options_job, options_jobs};
use super::super::input::Input;
use super::super::{Effect, Outcome, TextInputAction, View, now_ts};
use super::{DropdownKey, dropdown_key, is_plain_char};

mod render;

/// Cycle order of the type field; the empty value means "not set".
const TYPE_CHOICES: [&str; 3] = ["", "modern", "history"];

/// Create or update screen for one catalog record.
pub(in crate::tui_shell) struct FormView {
    form: CatalogForm,
    updated_at: String,
    /// Selectors behind the reference fields, in field order.
    refs: Cascade,
    /// Index into the form's fields; `fields().len()` is the Submit row.
    focused: usize,
    /// Edit buffer of the focused text field.
    input: Input,
    submitting: bool,
    uploading: bool,
    error: Option<String>,
}

impl FormView {
    pub(in crate::tui_shell) fn new(form: CatalogForm) -> Self {
        let refs: Vec<Resource> = form
            .fields()
            .iter()
            .filter_map(|f| match f.kind {
                FieldKind::Reference(r) => Some(r),
                _ => None,
            })
            .collect();
        let mut view = Self {
            form,
            updated_at: now_ts(),
            refs: Cascade::form(&refs),
            focused: 0,
            input: Input::default(),
            submitting: false,
            uploading: false,
            error: None,
        };
        view.load_input();
        view
    }

    fn fields(&self) -> &'static [FieldSpec] {
        self.form.fields()
    }

    fn focused_field(&self) -> Option<&'static FieldSpec> {
        self.fields().get(self.focused)
    }

    fn on_submit_row(&self) -> bool {
        self.focused == self.fields().len()
    }

    fn ref_level(&self, field: &FieldSpec) -> Option<usize> {
        match field.kind {
            FieldKind::Reference(r) => self.refs.level_of(r),
            _ => None,
        }
    }

    /// Reference fields stay hidden until their parent has a value.
    fn is_field_visible(&self, field: &FieldSpec) -> bool {
        self.ref_level(field)
            .is_none_or(|level| self.refs.is_visible(level))
    }

    fn load_input(&mut self) {
        match self.focused_field() {
            Some(f) if matches!(f.kind, FieldKind::Text | FieldKind::LongText) => {
                let value = self.form.value(f.key).to_string();
                self.input.set(value);
            }
            _ => self.input.clear(),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let rows = self.fields().len() + 1;
        let mut at = self.focused;
        for _ in 0..rows {
            at = if forward {
                (at + 1) % rows
            } else {
                (at + rows - 1) % rows
            };
            match self.fields().get(at) {
                Some(f) if !self.is_field_visible(f) => continue,
                _ => break,
            }
        }
        self.focused = at;
        self.load_input();
    }

    fn cycle_type(&mut self, key: &'static str, forward: bool) {
        let current = self
            .form
            .value(key)
            .parse::<VocabularyType>()
            .map(|t| t.as_str())
            .unwrap_or("");
        let at = TYPE_CHOICES.iter().position(|c| *c == current).unwrap_or(0);
        let n = TYPE_CHOICES.len();
        let next = if forward { (at + 1) % n } else { (at + n - 1) % n };
        self.form.set(key, TYPE_CHOICES[next]);
    }

    /// Copies the cascade's selections into the form values.
    fn sync_refs(&mut self) {
        for level in 0..self.refs.len() {
            let Some(sel) = self.refs.selector(level) else {
                continue;
            };
            let key = sel.resource().segment();
            let value = sel.selected_id().to_string();
            self.form.set(key, value);
        }
    }

    fn open_level(&self) -> Option<usize> {
        self.refs.open_level()
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.submitting || self.uploading {
            return Vec::new();
        }
        if let Err(err) = self.form.validate() {
            let msg = err.user_message();
            self.error = Some(msg.clone());
            return vec![Effect::Error(msg)];
        }
        self.submitting = true;
        self.error = None;
        let form = self.form.clone();
        vec![Effect::Spawn(Box::new(move |client: &RemoteClient| {
            Outcome::Submitted(form.submit(client))
        }))]
    }

    fn handle_field_key(&mut self, field: &'static FieldSpec, key: KeyEvent) -> Vec<Effect> {
        match field.kind {
            FieldKind::Text | FieldKind::LongText => {
                if key.code == KeyCode::Enter {
                    self.move_focus(true);
                    return Vec::new();
                }
                match is_plain_char(&key) {
                    Some(c) => self.input.insert_char(c),
                    None => match key.code {
                        KeyCode::Backspace => self.input.backspace(),
                        KeyCode::Delete => self.input.delete(),
                        KeyCode::Left => self.input.move_left(),
                        KeyCode::Right => self.input.move_right(),
                        _ => return Vec::new(),
                    },
                }
                self.form.set(field.key, self.input.buf.clone());
                Vec::new()
            }
            FieldKind::VocabularyType => {
                match key.code {
                    KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => {
                        self.cycle_type(field.key, true)
                    }
                    KeyCode::Left => self.cycle_type(field.key, false),
                    KeyCode::Backspace | KeyCode::Delete => {
                        self.form.set(field.key, "");
                    }
                    _ => {}
                }
                Vec::new()
            }
            FieldKind::Reference(_) => {
                if !matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return Vec::new();
                }
                self.ref_level(field)
                    .and_then(|level| self.refs.open(level))
                    .map(options_job)
                    .into_iter()
                    .collect()
            }
            FieldKind::Image => match key.code {
                KeyCode::Enter | KeyCode::Char('u') if !self.uploading => vec![Effect::TextInput {
                    title: "Upload image".to_string(),
                    prompt: "path: ".to_string(),
                    action: TextInputAction::UploadPath,
                    initial: None,
                    lines: vec![
                        "Local file to upload.".to_string(),
                        "The stored path fills the Image field.".to_string(),
                    ],
                }],
                KeyCode::Backspace | KeyCode::Delete => {
                    self.form.set(field.key, "");
                    Vec::new()
                }
                _ => Vec::new(),
            },
        }
    }
}

impl View for FormView {
    fn title(&self) -> String {
        match self.form.id() {
            Some(id) => format!("{} {}", self.form.title(), id),
            None => self.form.title(),
        }
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn hints(&self) -> &'static str {
        "tab/↑↓ move  enter edit/open  ←→ type  ctrl+s submit  esc cancel"
    }

    /// Loads the first reference level; prefilled references are selected
    /// top-down so each child is scoped by its parent.
    fn mount(&mut self) -> Vec<Effect> {
        let mut tickets = self.refs.mount();
        for level in 0..self.refs.len() {
            let Some(sel) = self.refs.selector(level) else {
                continue;
            };
            let value = self.form.value(sel.resource().segment()).to_string();
            if !value.is_empty() {
                tickets.extend(self.refs.select(level, &value));
            }
        }
        options_jobs(tickets)
    }

    fn handle_key(&mut self, key: KeyEvent, _now: Instant) -> Vec<Effect> {
        if let Some(level) = self.open_level() {
            let Some(sel) = self.refs.selector_mut(level) else {
                return Vec::new();
            };
            return match dropdown_key(sel, key) {
                DropdownKey::Consumed => Vec::new(),
                DropdownKey::Choose => match self.refs.choose_highlighted(level) {
                    Some(tickets) => {
                        self.sync_refs();
                        options_jobs(tickets)
                    }
                    None => Vec::new(),
                },
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.submit();
        }

        match key.code {
            KeyCode::Esc => return vec![Effect::Pop],
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                return Vec::new();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                return Vec::new();
            }
            _ => {}
        }

        if self.on_submit_row() {
            return match key.code {
                KeyCode::Enter => self.submit(),
                _ => Vec::new(),
            };
        }
        match self.focused_field() {
            Some(field) => self.handle_field_key(field, key),
            None => Vec::new(),
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::Options { ticket, result } => {
                self.refs.complete(&ticket, result);
                Vec::new()
            }
            Outcome::Submitted(result) => {
                self.submitting = false;
                match result {
                    Ok(ack) => {
                        let message = if ack.message.is_empty() {
                            format!("{} saved.", self.form.resource())
                        } else {
                            ack.message
                        };
                        vec![Effect::Status(message), Effect::PopAndRefresh]
                    }
                    Err(err) => {
                        let msg = err.user_message();
                        self.error = Some(msg.clone());
                        vec![Effect::Error(msg)]
                    }
                }
            }
            Outcome::Uploaded(result) => {
                self.uploading = false;
                match result {
                    Ok(path) => {
                        self.form.set("image", path.clone());
                        self.updated_at = now_ts();
                        vec![Effect::Status(format!("Uploaded {}", path))]
                    }
                    Err(err) => {
                        let msg = err.user_message();
                        self.error = Some(msg.clone());
                        vec![Effect::Error(msg)]
                    }
                }
            }
            _ => Vec::new(),
        }
    }

    fn on_text_input(&mut self, action: TextInputAction, value: String) -> Vec<Effect> {
        if action != TextInputAction::UploadPath || value.is_empty() {
            return Vec::new();
        }
        self.uploading = true;
        self.error = None;
        let path = PathBuf::from(value);
        vec![Effect::Spawn(Box::new(move |client: &RemoteClient| {
            Outcome::Uploaded(client.upload_file(&path))
        }))]
    }

    fn render(&self, frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        render::render_form(self, frame, area);
    }
}

#[cfg(test)]
#[path = "../../../tests/tui_shell/form_view_tests.rs"]
mod tests;
