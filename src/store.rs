use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::ClientState;

mod auth_session;
mod core_setup;

pub use self::auth_session::AuthSession;

/// Overrides the directory holding config.json/state.json.
pub const HOME_ENV: &str = "LEXADMIN_HOME";

const LOG_FILE: &str = "lexadmin.log";

#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// `$LEXADMIN_HOME`, else `<config dir>/lexadmin`.
    pub fn default_root() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV)
            && !home.is_empty()
        {
            return Ok(PathBuf::from(home));
        }
        let base = dirs::config_dir()
            .context("no config directory available (set LEXADMIN_HOME to choose one)")?;
        Ok(base.join("lexadmin"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(&Self::default_root()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub(crate) fn read_state(&self) -> Result<ClientState> {
        let path = self.root.join("state.json");
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let st: ClientState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported client state version {}", st.version);
        }
        Ok(st)
    }

    pub(crate) fn write_state(&self, st: &ClientState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize client state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store/store_tests.rs"]
mod tests;
