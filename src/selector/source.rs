use crate::error::ApiError;
use crate::model::{Category, Resource, Section, Vocabulary, Word};
use crate::remote::{ListParams, RemoteClient};

use super::SelectOption;

/// Where a selector loads its candidates from.
pub trait OptionSource {
    /// Loads every option of `resource`, restricted to `scope` when given.
    fn fetch_options(
        &self,
        resource: Resource,
        scope: Option<&str>,
    ) -> Result<Vec<SelectOption>, ApiError>;
}

pub fn vocabulary_option(v: &Vocabulary) -> SelectOption {
    let label = if v.vocab_type.is_empty() {
        v.name.clone()
    } else {
        format!("{} ({})", v.name, v.vocab_type)
    };
    SelectOption::new(&v.id, label)
}

pub fn section_option(s: &Section) -> SelectOption {
    SelectOption::new(
        &s.id,
        format!(
            "{} [{} - {}]",
            s.name, s.vocabulary.name, s.vocabulary.vocab_type
        ),
    )
    .with_parent(&s.vocabulary.id)
}

pub fn category_option(c: &Category) -> SelectOption {
    SelectOption::new(&c.id, format!("{} [{}]", c.name, c.section.name)).with_parent(&c.section.id)
}

pub fn word_option(w: &Word) -> SelectOption {
    SelectOption::new(&w.id, format!("{} [{}]", w.name, w.section.name)).with_parent(&w.section.id)
}

impl OptionSource for RemoteClient {
    fn fetch_options(
        &self,
        resource: Resource,
        scope: Option<&str>,
    ) -> Result<Vec<SelectOption>, ApiError> {
        let mut params = ListParams::new();
        if let (Some(key), Some(scope)) = (resource.parent_key(), scope) {
            params.push(key, scope);
        }

        let options = match resource {
            Resource::Vocabulary => self
                .list_vocabularies(&params)?
                .items
                .iter()
                .map(vocabulary_option)
                .collect(),
            Resource::Section => self
                .list_sections(&params)?
                .items
                .iter()
                .map(section_option)
                .collect(),
            Resource::Category => self
                .list_categories(&params)?
                .items
                .iter()
                .map(category_option)
                .collect(),
            Resource::Word => self
                .list_words(&params)?
                .items
                .iter()
                .map(word_option)
                .collect(),
        };
        Ok(options)
    }
}
