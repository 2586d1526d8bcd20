use crate::error::ApiError;
use crate::model::{Category, Resource, Section, VocabularyType, Vocabulary, Word};
use crate::remote::{Ack, RemoteClient};

use super::{NOTHING_TO_UPDATE, Payload};

pub const INVALID_TYPE: &str = "Type must be modern or history.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    VocabularyType,
    /// Id of another resource, picked through a selector.
    Reference(Resource),
    /// Stored file path, usually filled by an upload.
    Image,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        required,
    }
}

const VOCABULARY_CREATE: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("type", "Type", FieldKind::VocabularyType, true),
    field("description", "Description", FieldKind::LongText, false),
    field("image", "Image", FieldKind::Image, false),
];

const VOCABULARY_UPDATE: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, false),
    field("type", "Type", FieldKind::VocabularyType, false),
    field("description", "Description", FieldKind::LongText, false),
    field("image", "Image", FieldKind::Image, false),
];

const SECTION_CREATE: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("vocabulary", "Vocabulary", FieldKind::Reference(Resource::Vocabulary), true),
    field("image", "Image", FieldKind::Image, false),
];

const SECTION_UPDATE: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, false),
    field("vocabulary", "Vocabulary", FieldKind::Reference(Resource::Vocabulary), false),
    field("image", "Image", FieldKind::Image, false),
];

const CATEGORY_CREATE: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("vocabulary", "Vocabulary", FieldKind::Reference(Resource::Vocabulary), true),
    field("section", "Section", FieldKind::Reference(Resource::Section), true),
];

const CATEGORY_UPDATE: &[FieldSpec] = &[field("name", "Name", FieldKind::Text, false)];

const WORD_CREATE: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("description", "Description", FieldKind::LongText, true),
    field("vocabulary", "Vocabulary", FieldKind::Reference(Resource::Vocabulary), true),
    field("section", "Section", FieldKind::Reference(Resource::Section), true),
    field("category", "Category", FieldKind::Reference(Resource::Category), false),
    field("image", "Image", FieldKind::Image, false),
];

const WORD_UPDATE: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, false),
    field("description", "Description", FieldKind::LongText, false),
    field("image", "Image", FieldKind::Image, false),
];

pub fn fields_for(resource: Resource, mode: FormMode) -> &'static [FieldSpec] {
    match (resource, mode) {
        (Resource::Vocabulary, FormMode::Create) => VOCABULARY_CREATE,
        (Resource::Vocabulary, FormMode::Update) => VOCABULARY_UPDATE,
        (Resource::Section, FormMode::Create) => SECTION_CREATE,
        (Resource::Section, FormMode::Update) => SECTION_UPDATE,
        (Resource::Category, FormMode::Create) => CATEGORY_CREATE,
        (Resource::Category, FormMode::Update) => CATEGORY_UPDATE,
        (Resource::Word, FormMode::Create) => WORD_CREATE,
        (Resource::Word, FormMode::Update) => WORD_UPDATE,
    }
}

/// Keys whose value only makes sense under `key`'s current value.
fn dependents(key: &str) -> &'static [&'static str] {
    match key {
        "vocabulary" => &["section", "category"],
        "section" => &["category"],
        _ => &[],
    }
}

/// Field values of one create or update form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogForm {
    resource: Resource,
    mode: FormMode,
    id: Option<String>,
    values: Vec<String>,
}

impl CatalogForm {
    pub fn create(resource: Resource) -> Self {
        Self::blank(resource, FormMode::Create, None)
    }

    pub fn update(resource: Resource, id: impl Into<String>) -> Self {
        Self::blank(resource, FormMode::Update, Some(id.into()))
    }

    fn blank(resource: Resource, mode: FormMode, id: Option<String>) -> Self {
        Self {
            resource,
            mode,
            id,
            values: vec![String::new(); fields_for(resource, mode).len()],
        }
    }

    pub fn edit_vocabulary(v: &Vocabulary) -> Self {
        let mut form = Self::update(Resource::Vocabulary, &v.id);
        form.prefill("name", &v.name);
        form.prefill("type", &v.vocab_type);
        form.prefill("description", &v.description);
        form.prefill("image", v.image.as_deref().unwrap_or(""));
        form
    }

    pub fn edit_section(s: &Section) -> Self {
        let mut form = Self::update(Resource::Section, &s.id);
        form.prefill("name", &s.name);
        form.prefill("vocabulary", &s.vocabulary.id);
        form.prefill("image", s.image.as_deref().unwrap_or(""));
        form
    }

    pub fn edit_category(c: &Category) -> Self {
        let mut form = Self::update(Resource::Category, &c.id);
        form.prefill("name", &c.name);
        form
    }

    pub fn edit_word(w: &Word) -> Self {
        let mut form = Self::update(Resource::Word, &w.id);
        form.prefill("name", &w.name);
        form.prefill("description", &w.description);
        form.prefill("image", w.image.as_deref().unwrap_or(""));
        form
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.resource, self.mode)
    }

    pub fn title(&self) -> String {
        let verb = match self.mode {
            FormMode::Create => "Create",
            FormMode::Update => "Update",
        };
        format!("{} {}", verb, self.resource)
    }

    fn index(&self, key: &str) -> Option<usize> {
        self.fields().iter().position(|f| f.key == key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.index(key).is_some()
    }

    pub fn value(&self, key: &str) -> &str {
        self.index(key)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Sets a field. A changed parent reference clears its dependents
    /// (a new vocabulary clears section and category). Returns the keys that
    /// were cleared; unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Vec<&'static str> {
        let Some(i) = self.index(key) else {
            return Vec::new();
        };
        let value = value.into();
        if self.values[i] == value {
            return Vec::new();
        }
        self.values[i] = value;

        let mut cleared = Vec::new();
        for dep in dependents(key) {
            if let Some(j) = self.index(dep)
                && !self.values[j].is_empty()
            {
                self.values[j].clear();
                cleared.push(*dep);
            }
        }
        cleared
    }

    fn prefill(&mut self, key: &str, value: &str) {
        if let Some(i) = self.index(key) {
            self.values[i] = value.to_string();
        }
    }

    /// Checks required fields and builds the request body. Blank fields are
    /// left out of the payload.
    pub fn validate(&self) -> Result<Payload, ApiError> {
        let fields = self.fields();
        let missing = fields
            .iter()
            .zip(&self.values)
            .any(|(f, v)| f.required && v.trim().is_empty());
        if missing {
            return Err(ApiError::required_fields());
        }

        let mut payload = Payload::new();
        for (f, v) in fields.iter().zip(&self.values) {
            if f.kind == FieldKind::VocabularyType && !v.trim().is_empty() {
                let ty: VocabularyType = v
                    .parse()
                    .map_err(|_| ApiError::validation(INVALID_TYPE))?;
                payload.insert(f.key, ty.as_str());
                continue;
            }
            payload.insert(f.key, v);
        }

        if self.mode == FormMode::Update && payload.is_empty() {
            return Err(ApiError::validation(NOTHING_TO_UPDATE));
        }
        Ok(payload)
    }

    /// Validates, then creates or updates. Nothing is sent when validation fails.
    pub fn submit(&self, client: &RemoteClient) -> Result<Ack, ApiError> {
        let payload = self.validate()?.into_value();
        match (self.mode, self.id.as_deref()) {
            (FormMode::Create, _) => client.create(self.resource, &payload),
            (FormMode::Update, Some(id)) => client.update(self.resource, id, &payload),
            (FormMode::Update, None) => Err(ApiError::validation("Missing id to update.")),
        }
    }
}

#[cfg(test)]
#[path = "../tests/forms/catalog_tests.rs"]
mod tests;
