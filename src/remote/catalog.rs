//! List/get/create/update/delete for the four catalog resources.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::model::{Category, Page, Resource, Section, Vocabulary, Word};

use super::{Ack, RemoteClient};

/// Query pairs for a `get-all` call; empty values are never sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pairs: Vec<(&'static str, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.pairs.retain(|(k, _)| *k != key);
        self.pairs.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

fn plural(resource: Resource) -> &'static str {
    match resource {
        Resource::Vocabulary => "vocabularies",
        Resource::Section => "sections",
        Resource::Category => "categories",
        Resource::Word => "words",
    }
}

impl RemoteClient {
    /// `GET /{resource}/get-all`.
    pub fn list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> Result<Page<T>, ApiError> {
        let label = format!("list {}", plural(resource));
        let fallback = format!("Failed to fetch {}.", plural(resource));
        let req = self
            .client
            .get(self.url(&format!("/{}/get-all", resource.segment())))
            .query(params.pairs());
        let resp = self.send(self.maybe_authed(req), &label)?;
        let env = self.read_envelope::<Vec<T>>(resp, &label, &fallback)?;
        let items = env.data.unwrap_or_default();
        tracing::debug!(resource = %resource, rows = items.len(), "listed");
        Ok(Page {
            items,
            pagination: env.pagination.unwrap_or_default(),
        })
    }

    pub fn list_vocabularies(&self, params: &ListParams) -> Result<Page<Vocabulary>, ApiError> {
        self.list(Resource::Vocabulary, params)
    }

    pub fn list_sections(&self, params: &ListParams) -> Result<Page<Section>, ApiError> {
        self.list(Resource::Section, params)
    }

    pub fn list_categories(&self, params: &ListParams) -> Result<Page<Category>, ApiError> {
        self.list(Resource::Category, params)
    }

    pub fn list_words(&self, params: &ListParams) -> Result<Page<Word>, ApiError> {
        self.list(Resource::Word, params)
    }

    /// `GET /{resource}/get-one/:id`.
    pub fn get_one<T: DeserializeOwned>(&self, resource: Resource, id: &str) -> Result<T, ApiError> {
        let label = format!("get {}", resource);
        let fallback = format!("Failed to fetch {}.", resource);
        let req = self
            .client
            .get(self.record_url(resource, "get-one", id)?);
        let resp = self.send(self.authed(req)?, &label)?;
        self.read_envelope::<T>(resp, &label, &fallback)?
            .data
            .ok_or_else(|| ApiError::Decode {
                detail: format!("{}: missing data", label),
            })
    }

    /// `POST /{resource}/create`; `payload` should already omit empty fields.
    pub fn create(&self, resource: Resource, payload: &serde_json::Value) -> Result<Ack, ApiError> {
        let label = format!("create {}", resource);
        let fallback = format!("Failed to create {}.", resource);
        let req = self
            .client
            .post(self.url(&format!("/{}/create", resource.segment())))
            .json(payload);
        let resp = self.send(self.authed(req)?, &label)?;
        let env = self.read_envelope::<serde_json::Value>(resp, &label, &fallback)?;
        Ok(Ack {
            message: env.message_or("Created."),
        })
    }

    /// `PUT /{resource}/update/:id` with only the changed fields.
    pub fn update(
        &self,
        resource: Resource,
        id: &str,
        payload: &serde_json::Value,
    ) -> Result<Ack, ApiError> {
        let label = format!("update {}", resource);
        let fallback = format!("Failed to update {}.", resource);
        let req = self
            .client
            .put(self.record_url(resource, "update", id)?)
            .json(payload);
        let resp = self.send(self.authed(req)?, &label)?;
        let env = self.read_envelope::<serde_json::Value>(resp, &label, &fallback)?;
        Ok(Ack {
            message: env.message_or("Updated."),
        })
    }

    /// `DELETE /{resource}/delete/:id`.
    pub fn delete(&self, resource: Resource, id: &str) -> Result<Ack, ApiError> {
        let label = format!("delete {}", resource);
        let fallback = format!("Failed to delete {}.", resource);
        let req = self
            .client
            .delete(self.record_url(resource, "delete", id)?);
        let resp = self.send(self.authed(req)?, &label)?;
        let env = self.read_envelope::<serde_json::Value>(resp, &label, &fallback)?;
        Ok(Ack {
            message: env.message_or("Deleted."),
        })
    }
}
