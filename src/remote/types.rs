//! Envelopes and payload types for remote API requests/responses.

use serde::de::DeserializeOwned;

use crate::model::Pagination;

/// Every endpoint answers with `{success, ...}`; the remaining fields depend
/// on the endpoint.
#[derive(Debug, serde::Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub pagination: Option<Pagination>,
    pub message: Option<String>,
    pub token: Option<String>,
    pub file_path: Option<String>,
}

impl<T> Envelope<T> {
    /// Server message if present and non-blank.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[derive(Debug, serde::Serialize)]
pub(super) struct LoginRequest<'a> {
    pub(super) phone: &'a str,
    pub(super) password: &'a str,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SignUpRequest {
    pub name: String,
    pub phone: String,
    pub reg_key: String,
    pub password: String,
}

/// `{success, message}` reply to create/update/delete/sign-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
}
