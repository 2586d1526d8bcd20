use anyhow::Result;

mod app;

mod effects;
mod input;
mod modal;
mod view;
mod views;
mod widgets;

// Make core TUI types/helpers available to submodules via `super::...`.
use app::{App, Modal, ModalKind, fmt_ts_ui, now_ts};
use effects::{Effect, Job, Outcome, PendingAction, TextInputAction};
use view::{View, render_view_chrome};

pub(crate) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
