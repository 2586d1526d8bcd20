//! Error taxonomy shared by the remote client, forms and screens.

use thiserror::Error;

pub const NETWORK_ERROR: &str = "Network error";
pub const REQUIRED_FIELDS: &str = "Please fill all required fields.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (connect, timeout, broken body).
    #[error("Network error")]
    Network { detail: String },

    /// The API answered `success:false` (or a non-2xx with a message).
    #[error("{message}")]
    Api { message: String },

    /// Missing token, HTTP 401/403, or a profile without the admin role.
    #[error("unauthorized (session missing or expired; run `lexadmin login`)")]
    Unauthorized,

    /// The response body did not have the expected shape.
    #[error("unexpected response: {detail}")]
    Decode { detail: String },

    /// Rejected before any request was sent.
    #[error("{message}")]
    Validation { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        ApiError::Api {
            message: message.into(),
        }
    }

    pub fn required_fields() -> Self {
        Self::validation(REQUIRED_FIELDS)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text shown inline on a screen.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                detail: err.to_string(),
            }
        } else {
            ApiError::Network {
                detail: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
