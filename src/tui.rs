use anyhow::Result;

use crate::model::ClientConfig;
use crate::store::LocalStore;

/// Everything the dashboard needs at start-up; the effective configuration
/// already includes any `--url` override.
#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub store: LocalStore,
    pub config: ClientConfig,
}

pub fn run(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}
