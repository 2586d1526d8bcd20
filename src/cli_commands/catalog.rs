use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum CatalogCommands {
    /// List one page
    List(ListArgs),

    /// Show one record
    Get {
        id: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a record
    Create(FieldArgs),

    /// Update a record (only the given fields are sent)
    Update {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a record
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    /// Rows per page (defaults to config page_limit)
    #[arg(long)]
    pub(crate) limit: Option<u32>,
    /// Vocabulary type filter (modern|history; vocabularies only)
    #[arg(long = "type")]
    pub(crate) vocab_type: Option<String>,
    /// Vocabulary id filter (sections, words)
    #[arg(long)]
    pub(crate) vocabulary: Option<String>,
    /// Section id filter (categories, words)
    #[arg(long)]
    pub(crate) section: Option<String>,
    /// Category id filter (words)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

/// Form fields; which ones apply depends on the resource and on create vs update.
#[derive(Args)]
pub(crate) struct FieldArgs {
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// modern|history
    #[arg(long = "type")]
    pub(crate) vocab_type: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(long)]
    pub(crate) vocabulary: Option<String>,
    #[arg(long)]
    pub(crate) section: Option<String>,
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Stored image path
    #[arg(long, conflicts_with = "upload")]
    pub(crate) image: Option<String>,
    /// Upload a local file first and use its stored path as the image
    #[arg(long, value_name = "PATH")]
    pub(crate) upload: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    pub(crate) path: PathBuf,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
