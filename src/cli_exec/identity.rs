use lexadmin::forms::SignUpForm;
use lexadmin::store::AuthSession;

use crate::cli_commands::identity::SignupArgs;

use super::*;

pub(super) fn handle_login_command(ctx: &CliContext, phone: &str, password: &str) -> Result<()> {
    let mut client = ctx.client()?;
    let token = api(ctx, client.login(phone, password))?;

    let session = AuthSession::with_token(token);
    client.set_session(&session);
    let role = &ctx.config.admin_role;
    let profile = client.require_admin(role).map_err(|err| match err {
        ApiError::Unauthorized => {
            anyhow::anyhow!("login rejected: account does not have the `{}` role", role)
        }
        other => anyhow::Error::new(other).context("verify admin profile"),
    })?;

    ctx.store
        .save_session(&ctx.config.base_url, &session)
        .context("store session in state.json")?;
    println!("Logged in as {}", profile.display_name());
    Ok(())
}

pub(super) fn handle_signup_command(ctx: &CliContext, args: SignupArgs) -> Result<()> {
    let form = SignUpForm {
        name: args.name,
        phone: args.phone,
        reg_key: args.reg_key,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    let request = form.validate()?;
    let ack = api(ctx, ctx.client()?.sign_up(&request))?;
    println!("{}", ack.message);
    Ok(())
}

pub(super) fn handle_logout_command(ctx: &CliContext) -> Result<()> {
    ctx.store.clear_session().context("clear session")?;
    tracing::info!(base_url = %ctx.config.base_url, "logged out");
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_whoami_command(ctx: &CliContext, json: bool) -> Result<()> {
    let client = ctx.require_session()?;
    let profile = api(ctx, client.require_admin(&ctx.config.admin_role))?;
    if json {
        print_json(&profile, "profile")?;
    } else {
        println!("name: {}", profile.name);
        println!("phone: {}", profile.phone);
        println!("role: {}", profile.role);
        println!("server: {}", ctx.config.base_url);
    }
    Ok(())
}
