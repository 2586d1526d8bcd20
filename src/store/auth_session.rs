use anyhow::Result;

use super::LocalStore;

/// The bearer token used by every authenticated request.
///
/// Set on login, cleared on logout or when the server rejects it. Whatever
/// builds a [`crate::remote::RemoteClient`] receives the session explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSession {
    token: Option<String>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            return Self::default();
        }
        Self { token: Some(token) }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set(&mut self, token: impl Into<String>) {
        *self = Self::with_token(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

impl LocalStore {
    /// Loads the persisted session; a token issued by a different base URL is ignored.
    pub fn load_session(&self, base_url: &str) -> Result<AuthSession> {
        let st = self.read_state()?;
        match (st.token, st.token_base_url) {
            (Some(token), Some(issuer)) if issuer == base_url => Ok(AuthSession::with_token(token)),
            (Some(_), Some(issuer)) => {
                tracing::debug!(%issuer, %base_url, "ignoring token issued by another server");
                Ok(AuthSession::anonymous())
            }
            (Some(token), None) => Ok(AuthSession::with_token(token)),
            (None, _) => Ok(AuthSession::anonymous()),
        }
    }

    pub fn save_session(&self, base_url: &str, session: &AuthSession) -> Result<()> {
        let mut st = self.read_state()?;
        match session.token() {
            Some(token) => {
                st.token = Some(token.to_string());
                st.token_base_url = Some(base_url.to_string());
            }
            None => {
                st.token = None;
                st.token_base_url = None;
            }
        }
        self.write_state(&st)
    }

    pub fn clear_session(&self) -> Result<()> {
        let mut st = self.read_state()?;
        st.token = None;
        st.token_base_url = None;
        self.write_state(&st)
    }
}
