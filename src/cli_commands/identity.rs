use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) phone: String,
    #[arg(long, env = "LEXADMIN_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

#[derive(Args)]
pub(crate) struct SignupArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) phone: String,
    /// Registration key issued by the server operator
    #[arg(long = "reg-key")]
    pub(crate) reg_key: String,
    #[arg(long)]
    pub(crate) password: String,
    #[arg(long = "confirm-password")]
    pub(crate) confirm_password: String,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
