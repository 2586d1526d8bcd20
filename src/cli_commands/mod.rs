use clap::Subcommand;

pub(crate) mod catalog;
pub(crate) mod identity;
pub(crate) mod settings;

pub(crate) use self::catalog::CatalogCommands;
pub(crate) use self::settings::ConfigCommands;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in as an admin and store the session token
    Login(identity::LoginArgs),

    /// Register a new admin account
    Signup(identity::SignupArgs),

    /// Log out (clear the stored session token)
    Logout,

    /// Show the signed-in admin profile
    Whoami(identity::WhoamiArgs),

    /// Show or change client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage vocabularies
    #[command(alias = "vocab")]
    Vocabulary {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Manage sections
    Section {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Manage words
    Word {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Upload an image and print its stored path
    Upload(catalog::UploadArgs),
}
