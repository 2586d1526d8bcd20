use anyhow::{Context, Result};

use crate::store::AuthSession;

mod catalog;
mod http_client;
mod identity;
mod types;
mod upload;

pub use self::catalog::ListParams;
pub use self::types::*;

/// Blocking client for the vocabulary admin REST API.
///
/// Cheap to clone; clones share the underlying connection pool, so screens
/// hand copies to worker threads.
#[derive(Clone, Debug)]
pub struct RemoteClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: &str, session: &AuthSession) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("lexadmin/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: session.token().map(str::to_string),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Replaces the bearer token after a login or logout.
    pub fn set_session(&mut self, session: &AuthSession) {
        self.token = session.token().map(str::to_string);
    }
}
