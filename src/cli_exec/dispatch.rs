use super::catalog::{handle_catalog_command, handle_upload_command};
use super::identity::{
    handle_login_command, handle_logout_command, handle_signup_command, handle_whoami_command,
};
use super::settings::handle_config_command;
use super::*;

pub(super) fn handle_command(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(ctx, &args.phone, &args.password)?,
        Commands::Signup(args) => handle_signup_command(ctx, args)?,
        Commands::Logout => handle_logout_command(ctx)?,
        Commands::Whoami(args) => handle_whoami_command(ctx, args.json)?,
        Commands::Config { command } => handle_config_command(ctx, command)?,
        Commands::Vocabulary { command } => {
            handle_catalog_command(ctx, Resource::Vocabulary, command)?
        }
        Commands::Section { command } => handle_catalog_command(ctx, Resource::Section, command)?,
        Commands::Category { command } => {
            handle_catalog_command(ctx, Resource::Category, command)?
        }
        Commands::Word { command } => handle_catalog_command(ctx, Resource::Word, command)?,
        Commands::Upload(args) => handle_upload_command(ctx, &args.path, args.json)?,
    }

    Ok(())
}
