use anyhow::{Context, Result};
use clap::Parser;

use lexadmin::logging::{self, TracingConfig};
use lexadmin::model::ClientConfig;
use lexadmin::remote::RemoteClient;
use lexadmin::store::{AuthSession, LocalStore};

use crate::Commands;

#[derive(Parser)]
#[command(name = "lexadmin")]
#[command(about = "Vocabulary catalog admin client", long_about = None)]
pub(crate) struct Cli {
    /// API base URL for this invocation (overrides config.json)
    #[arg(long, global = true, env = "LEXADMIN_API_URL")]
    url: Option<String>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let tracing = TracingConfig { debug: cli.debug };

    let store = LocalStore::open_default()?;
    let mut config = store.read_config()?;
    if let Some(url) = cli.url.as_deref() {
        config.base_url = url.trim().trim_end_matches('/').to_string();
        config
            .validate()
            .with_context(|| format!("invalid --url {}", url))?;
    }

    match cli.command {
        None => {
            logging::init_tui(&tracing, &store.log_path())?;
            lexadmin::tui::run(lexadmin::tui::TuiRunOptions { store, config })?;
        }
        Some(command) => {
            logging::init_cli(&tracing)?;
            let ctx = CliContext { store, config };
            crate::cli_exec::handle_command(&ctx, command)?
        }
    }

    Ok(())
}

/// Store plus effective configuration for one command-line invocation.
pub(crate) struct CliContext {
    pub(crate) store: LocalStore,
    pub(crate) config: ClientConfig,
}

impl CliContext {
    pub(crate) fn session(&self) -> Result<AuthSession> {
        self.store.load_session(&self.config.base_url)
    }

    /// Client carrying the stored session (if any).
    pub(crate) fn client(&self) -> Result<RemoteClient> {
        RemoteClient::new(&self.config.base_url, &self.session()?)
    }

    /// Client for commands that need a signed-in admin.
    pub(crate) fn require_session(&self) -> Result<RemoteClient> {
        let session = self.session()?;
        if !session.is_authenticated() {
            anyhow::bail!(
                "not logged in to {} (run `lexadmin login --phone ... --password ...`)",
                self.config.base_url
            );
        }
        RemoteClient::new(&self.config.base_url, &session)
    }
}
