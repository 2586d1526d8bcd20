use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use lexadmin::error::ApiError;
use lexadmin::model::Resource;

use crate::{CatalogCommands, CliContext, Commands, ConfigCommands};

mod catalog;
mod dispatch;
mod identity;
mod settings;

pub(super) fn handle_command(ctx: &CliContext, command: Commands) -> Result<()> {
    dispatch::handle_command(ctx, command)
}

/// Converts an API error for the command line. An unauthorized reply also
/// drops the stored session so the next command starts from `login`.
fn api<T>(ctx: &CliContext, result: Result<T, ApiError>) -> Result<T> {
    match result {
        Ok(v) => Ok(v),
        Err(err) => {
            if err.is_unauthorized() {
                ctx.store
                    .clear_session()
                    .context("clear session after unauthorized reply")?;
            }
            Err(anyhow::Error::new(err))
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}

/// Asks on stdin; anything but y/yes declines.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read confirmation")?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
