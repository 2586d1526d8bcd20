use super::*;

impl App {
    pub(super) fn push_output(&mut self, text: impl Into<String>) {
        self.push_entry(EntryKind::Output, text.into());
    }

    pub(super) fn push_error(&mut self, text: impl Into<String>) {
        self.push_entry(EntryKind::Error, text.into());
    }

    fn push_entry(&mut self, kind: EntryKind, text: String) {
        if kind == EntryKind::Error {
            tracing::debug!(%text, "status error");
        }
        self.last_result = Some(StatusEntry {
            ts: now_ts(),
            kind,
            text,
        });
    }

    pub(super) fn open_modal(&mut self, title: impl Into<String>, lines: Vec<String>, owner: u64) {
        self.modal = Some(Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind: ModalKind::Viewer,
            input: Input::default(),
            owner,
        });
    }

    pub(super) fn open_confirm_modal(
        &mut self,
        title: impl Into<String>,
        lines: Vec<String>,
        action: PendingAction,
        owner: u64,
    ) {
        self.modal = Some(Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind: ModalKind::ConfirmAction { action },
            input: Input::default(),
            owner,
        });
    }

    pub(super) fn open_text_input_modal(
        &mut self,
        title: impl Into<String>,
        prompt: impl Into<String>,
        action: TextInputAction,
        initial: Option<String>,
        mut lines: Vec<String>,
        owner: u64,
    ) {
        lines.push("".to_string());
        lines.push("Enter to continue; Esc to cancel.".to_string());

        let mut input = Input::default();
        if let Some(s) = initial {
            input.set(s);
        }

        self.modal = Some(Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind: ModalKind::TextInput {
                action,
                prompt: prompt.into(),
            },
            input,
            owner,
        });
    }

    pub(in crate::tui_shell) fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub(in crate::tui_shell) fn close_modal(&mut self) {
        self.modal = None;
    }
}
