use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{ClientConfig, ClientState};

use super::{LocalStore, write_atomic};

impl LocalStore {
    /// Opens the store at `root`, creating default config/state files on first use.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create lexadmin home {}", root.display()))?;
        let store = Self {
            root: root.to_path_buf(),
        };

        if !store.config_path().is_file() {
            store
                .write_config(&ClientConfig::default())
                .context("write default config.json")?;
            tracing::debug!(path = %store.config_path().display(), "created default config");
        }
        if !root.join("state.json").is_file() {
            store
                .write_state(&ClientState {
                    version: 1,
                    ..ClientState::default()
                })
                .context("write default state.json")?;
        }
        Ok(store)
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let path = self.config_path();
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        cfg.validate()
            .with_context(|| format!("invalid config at {}", path.display()))?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        cfg.validate()?;
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.config_path(), &bytes).context("write config.json")?;
        Ok(())
    }
}
