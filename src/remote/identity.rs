//! Admin login, sign-up and profile.

use crate::error::ApiError;
use crate::model::AdminProfile;

use super::{Ack, LoginRequest, RemoteClient, SignUpRequest};

pub(super) const LOGIN_FAILED: &str = "Login failed. Check phone or password.";

impl RemoteClient {
    /// `POST /admin/login`; returns the issued token.
    pub fn login(&self, phone: &str, password: &str) -> Result<String, ApiError> {
        if phone.trim().is_empty() || password.is_empty() {
            return Err(ApiError::required_fields());
        }
        let req = self
            .client
            .post(self.url("/admin/login"))
            .json(&LoginRequest {
                phone: phone.trim(),
                password,
            });
        let resp = self.send(req, "login")?;
        let env = match self.read_envelope::<serde_json::Value>(resp, "login", LOGIN_FAILED) {
            // A 401 here means bad credentials, not an expired session.
            Err(ApiError::Unauthorized) => return Err(ApiError::api(LOGIN_FAILED)),
            other => other?,
        };
        match env.token {
            Some(token) if !token.trim().is_empty() => {
                tracing::info!("logged in");
                Ok(token)
            }
            _ => Err(ApiError::api(LOGIN_FAILED)),
        }
    }

    /// `POST /admin/sign-up`.
    pub fn sign_up(&self, body: &SignUpRequest) -> Result<Ack, ApiError> {
        let req = self.client.post(self.url("/admin/sign-up")).json(body);
        let resp = self.send(req, "sign up")?;
        let env = self.read_envelope::<serde_json::Value>(resp, "sign up", "Something went wrong.")?;
        Ok(Ack {
            message: env.message_or("Signed up."),
        })
    }

    /// `GET /admin/profile`.
    pub fn profile(&self) -> Result<AdminProfile, ApiError> {
        let req = self.client.get(self.url("/admin/profile"));
        let resp = self.send(self.authed(req)?, "profile")?;
        self.read_envelope::<AdminProfile>(resp, "profile", "Failed to fetch profile.")?
            .data
            .ok_or_else(|| ApiError::Decode {
                detail: "profile: missing data".to_string(),
            })
    }

    /// Fetches the profile and requires `role`; any other role counts as unauthorized.
    pub fn require_admin(&self, role: &str) -> Result<AdminProfile, ApiError> {
        let profile = self.profile()?;
        if profile.role != role {
            tracing::info!(expected = role, actual = %profile.role, "profile role mismatch");
            return Err(ApiError::Unauthorized);
        }
        Ok(profile)
    }
}
