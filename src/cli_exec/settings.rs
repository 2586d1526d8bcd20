use super::*;

pub(super) fn handle_config_command(ctx: &CliContext, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let cfg = &ctx.config;
            if json {
                print_json(cfg, "config")?;
            } else {
                println!("base_url: {}", cfg.base_url);
                println!("page_limit: {}", cfg.page_limit);
                println!("search_debounce_ms: {}", cfg.search_debounce_ms);
                println!("admin_role: {}", cfg.admin_role);
                let session = ctx.session()?;
                println!(
                    "session: {}",
                    if session.is_authenticated() {
                        "logged in"
                    } else {
                        "none"
                    }
                );
            }
        }
        ConfigCommands::Set {
            base_url,
            page_limit,
            search_debounce_ms,
            admin_role,
        } => {
            // Start from the stored file, not the --url override.
            let mut cfg = ctx.store.read_config()?;
            if let Some(v) = base_url {
                cfg.base_url = v.trim().trim_end_matches('/').to_string();
            }
            if let Some(v) = page_limit {
                cfg.page_limit = v;
            }
            if let Some(v) = search_debounce_ms {
                cfg.search_debounce_ms = v;
            }
            if let Some(v) = admin_role {
                cfg.admin_role = v.trim().to_string();
            }
            ctx.store.write_config(&cfg)?;
            println!("Configuration saved");
        }
        ConfigCommands::Path => {
            println!("{}", ctx.store.config_path().display());
        }
    }
    Ok(())
}
