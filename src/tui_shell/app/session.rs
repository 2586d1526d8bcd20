use super::*;

impl App {
    /// Opens the phone prompt; `phone` prefills it after a failed attempt.
    pub(super) fn start_login(&mut self, phone: Option<String>) {
        self.login = Some(LoginWizard::default());
        let lines = vec![
            format!("Server: {}", self.config.base_url),
            format!("Sign in with an account that has the `{}` role.", self.config.admin_role),
        ];
        self.open_text_input_modal(
            "Log in",
            "phone: ",
            TextInputAction::LoginPhone,
            phone,
            lines,
            APP_GENERATION,
        );
    }

    pub(super) fn on_login_input(&mut self, action: TextInputAction, value: String) {
        let Some(wizard) = self.login.as_mut() else {
            return;
        };
        match action {
            TextInputAction::LoginPhone => {
                if value.is_empty() {
                    self.push_error(crate::error::REQUIRED_FIELDS);
                    self.start_login(None);
                    return;
                }
                wizard.phone = value;
                let lines = vec![format!("phone: {}", wizard.phone)];
                self.open_text_input_modal(
                    "Log in",
                    "password: ",
                    TextInputAction::LoginPassword,
                    None,
                    lines,
                    APP_GENERATION,
                );
            }
            TextInputAction::LoginPassword => {
                let phone = wizard.phone.clone();
                if value.is_empty() {
                    self.push_error(crate::error::REQUIRED_FIELDS);
                    self.start_login(Some(phone));
                    return;
                }
                self.auth_note = Some("logging in…".to_string());
                let role = self.config.admin_role.clone();
                self.spawn_job(
                    APP_GENERATION,
                    Box::new(move |client: &RemoteClient| {
                        Outcome::LoggedIn(login_as_admin(client, &phone, &value, &role))
                    }),
                );
            }
            TextInputAction::UploadPath => {}
        }
    }

    pub(super) fn spawn_profile_check(&self) {
        let role = self.config.admin_role.clone();
        self.spawn_job(
            APP_GENERATION,
            Box::new(move |client: &RemoteClient| Outcome::Profile(client.require_admin(&role))),
        );
    }

    pub(super) fn on_app_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::LoggedIn(Ok((token, profile))) => {
                self.login = None;
                self.session.set(token);
                self.client.set_session(&self.session);
                if let Err(err) = self.store.save_session(&self.config.base_url, &self.session) {
                    tracing::warn!(error = %format!("{:#}", err), "failed to persist session");
                    self.push_error(format!("session not saved: {:#}", err));
                }
                tracing::info!(role = %profile.role, "logged in");
                self.auth_note = None;
                self.push_output(format!("Logged in as {}", profile.display_name()));
                self.profile = Some(profile);
            }
            Outcome::LoggedIn(Err(err)) => {
                let phone = self.login.as_ref().map(|w| w.phone.clone());
                self.auth_note = Some("not logged in".to_string());
                let msg = if err.is_unauthorized() {
                    format!(
                        "Login rejected: account does not have the `{}` role.",
                        self.config.admin_role
                    )
                } else {
                    err.user_message()
                };
                tracing::warn!(error = %err, "login failed");
                self.push_error(msg);
                self.start_login(phone);
            }
            Outcome::Profile(Ok(profile)) => {
                self.auth_note = None;
                self.profile = Some(profile);
            }
            Outcome::Profile(Err(err)) if err.is_unauthorized() => self.handle_unauthorized(),
            Outcome::Profile(Err(err)) => {
                // The server may just be down; keep the token and let the
                // screens report their own errors.
                self.auth_note = Some(format!("profile check failed: {}", err.user_message()));
                self.push_error(err.user_message());
            }
            other => tracing::debug!(outcome = ?other, "unexpected app outcome"),
        }
    }

    fn drop_session(&mut self) {
        self.session.clear();
        self.client.set_session(&self.session);
        self.profile = None;
        if let Err(err) = self.store.clear_session() {
            tracing::warn!(error = %format!("{:#}", err), "failed to clear stored session");
        }
    }

    /// Any 401/403 or role mismatch: forget the token, return to Home and
    /// ask for credentials again.
    pub(super) fn handle_unauthorized(&mut self) {
        tracing::warn!("session rejected by server");
        self.drop_session();
        self.frames.truncate(1);
        self.close_modal();
        self.auth_note = Some("not logged in".to_string());
        self.push_error(crate::error::ApiError::Unauthorized.user_message());
        self.start_login(None);
    }

    pub(super) fn logout(&mut self) {
        self.drop_session();
        self.frames.truncate(1);
        self.auth_note = Some("not logged in".to_string());
        self.push_output("Logged out.");
        tracing::info!("logged out");
        self.start_login(None);
    }
}

/// Login, then confirm the account's role with the new token.
fn login_as_admin(
    client: &RemoteClient,
    phone: &str,
    password: &str,
    role: &str,
) -> Result<(String, AdminProfile), crate::error::ApiError> {
    let token = client.login(phone, password)?;
    let mut authed = client.clone();
    authed.set_session(&AuthSession::with_token(token.clone()));
    let profile = authed.require_admin(role)?;
    Ok((token, profile))
}
