use reqwest::{StatusCode, Url};
use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::model::Resource;

use super::{Envelope, RemoteClient};

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/{resource}/{action}/{id}` with `id` escaped as a single path segment.
    pub(super) fn record_url(
        &self,
        resource: Resource,
        action: &str,
        id: &str,
    ) -> Result<Url, ApiError> {
        let invalid = || ApiError::validation(format!("invalid API url `{}`", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend([resource.segment(), action, id]);
        Ok(url)
    }

    /// Adds the bearer header; fails early when no session is present.
    pub(super) fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self.token.as_deref() {
            Some(token) => Ok(req.bearer_auth(token)),
            None => Err(ApiError::Unauthorized),
        }
    }

    /// Attaches the bearer header when a session exists; listings are public.
    pub(super) fn maybe_authed(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(super) fn send(&self, req: RequestBuilder, label: &str) -> Result<Response, ApiError> {
        tracing::debug!(label, "request");
        req.send().map_err(|err| {
            tracing::warn!(label, error = %err, "request failed");
            ApiError::Network {
                detail: format!("{}: {}", label, err),
            }
        })
    }

    /// Decodes the `{success, ...}` envelope, mapping failures onto [`ApiError`].
    ///
    /// `fallback` is shown when the server reports failure without a message.
    pub(super) fn read_envelope<T: DeserializeOwned>(
        &self,
        resp: Response,
        label: &str,
        fallback: &str,
    ) -> Result<Envelope<T>, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::info!(label, status = status.as_u16(), "session rejected");
            return Err(ApiError::Unauthorized);
        }

        let body = resp.text().map_err(|err| ApiError::Network {
            detail: format!("{} body: {}", label, err),
        })?;
        decode_envelope(status, &body, label, fallback)
    }
}

pub(super) fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    label: &str,
    fallback: &str,
) -> Result<Envelope<T>, ApiError> {
    let env: Envelope<T> = match serde_json::from_str(body) {
        Ok(env) => env,
        Err(err) if status.is_success() => {
            return Err(ApiError::Decode {
                detail: format!("{}: {}", label, err),
            });
        }
        Err(_) => {
            return Err(ApiError::api(format!(
                "{} (HTTP {})",
                fallback,
                status.as_u16()
            )));
        }
    };

    if !status.is_success() || !env.success {
        return Err(ApiError::api(env.message_or(fallback)));
    }
    Ok(env)
}

#[cfg(test)]
#[path = "../tests/remote/envelope_tests.rs"]
mod tests;
