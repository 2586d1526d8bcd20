//! Tracing setup.
//!
//!   lexadmin --debug ...               # debug logging
//!   RUST_LOG=lexadmin=trace lexadmin   # fine-grained filter
//!
//! Command-line runs log to stderr. The dashboard owns the terminal, so it
//! logs to `<home>/lexadmin.log` instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Raise the default level to debug (RUST_LOG still wins when set).
    pub debug: bool,
}

fn env_filter(config: &TracingConfig, default_level: &str) -> EnvFilter {
    let level = if config.debug { "debug" } else { default_level };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Compact logging to stderr.
pub fn init_cli(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config, "warn"))
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Appends plain-text logs to `path`.
pub fn init_tui(config: &TracingConfig, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config, "info"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!(err))
}
