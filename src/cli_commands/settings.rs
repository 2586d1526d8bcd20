use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change configuration values
    Set {
        /// API base URL (example: http://127.0.0.1:8080)
        #[arg(long = "base-url")]
        base_url: Option<String>,
        /// Rows per list page (1..=100)
        #[arg(long)]
        page_limit: Option<u32>,
        /// Search debounce in milliseconds (700..=1000)
        #[arg(long)]
        search_debounce_ms: Option<u64>,
        /// Role the profile must report
        #[arg(long)]
        admin_role: Option<String>,
    },

    /// Print the config file path
    Path,
}
