//! Per-resource glue for the generic list screen.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::forms::CatalogForm;
use crate::model::{Category, Page, Resource, Section, Vocabulary, Word};
use crate::remote::{ListParams, RemoteClient};

use super::super::effects::AnyPage;

pub(in crate::tui_shell) trait CatalogRecord:
    Clone + std::fmt::Debug + DeserializeOwned + Send + 'static
{
    const RESOURCE: Resource;

    /// Column headers with their width in percent.
    const COLUMNS: &'static [(&'static str, u16)];

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn cells(&self) -> Vec<String>;
    fn edit_form(&self) -> CatalogForm;

    fn wrap_page(page: Page<Self>) -> AnyPage;
    fn unwrap_page(page: AnyPage) -> Option<Page<Self>>;

    fn fetch(client: &RemoteClient, params: &ListParams) -> Result<AnyPage, ApiError> {
        client.list::<Self>(Self::RESOURCE, params).map(Self::wrap_page)
    }
}

fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

impl CatalogRecord for Vocabulary {
    const RESOURCE: Resource = Resource::Vocabulary;
    const COLUMNS: &'static [(&'static str, u16)] =
        &[("Name", 30), ("Type", 15), ("Description", 55)];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(&self.vocab_type),
            or_dash(&self.description),
        ]
    }

    fn edit_form(&self) -> CatalogForm {
        CatalogForm::edit_vocabulary(self)
    }

    fn wrap_page(page: Page<Self>) -> AnyPage {
        AnyPage::Vocabulary(page)
    }

    fn unwrap_page(page: AnyPage) -> Option<Page<Self>> {
        match page {
            AnyPage::Vocabulary(p) => Some(p),
            _ => None,
        }
    }
}

impl CatalogRecord for Section {
    const RESOURCE: Resource = Resource::Section;
    const COLUMNS: &'static [(&'static str, u16)] =
        &[("Name", 35), ("Vocabulary", 35), ("Type", 30)];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(&self.vocabulary.name),
            or_dash(&self.vocabulary.vocab_type),
        ]
    }

    fn edit_form(&self) -> CatalogForm {
        CatalogForm::edit_section(self)
    }

    fn wrap_page(page: Page<Self>) -> AnyPage {
        AnyPage::Section(page)
    }

    fn unwrap_page(page: AnyPage) -> Option<Page<Self>> {
        match page {
            AnyPage::Section(p) => Some(p),
            _ => None,
        }
    }
}

impl CatalogRecord for Category {
    const RESOURCE: Resource = Resource::Category;
    const COLUMNS: &'static [(&'static str, u16)] =
        &[("Name", 35), ("Section", 35), ("Vocabulary", 30)];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(&self.section.name),
            or_dash(&self.vocabulary.name),
        ]
    }

    fn edit_form(&self) -> CatalogForm {
        CatalogForm::edit_category(self)
    }

    fn wrap_page(page: Page<Self>) -> AnyPage {
        AnyPage::Category(page)
    }

    fn unwrap_page(page: AnyPage) -> Option<Page<Self>> {
        match page {
            AnyPage::Category(p) => Some(p),
            _ => None,
        }
    }
}

impl CatalogRecord for Word {
    const RESOURCE: Resource = Resource::Word;
    const COLUMNS: &'static [(&'static str, u16)] = &[
        ("Name", 25),
        ("Vocabulary", 20),
        ("Section", 20),
        ("Category", 15),
        ("Image", 20),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(&self.vocabulary.name),
            or_dash(&self.section.name),
            self.category
                .as_ref()
                .map(|c| or_dash(&c.name))
                .unwrap_or_else(|| "-".to_string()),
            if self.image.as_deref().is_some_and(|i| !i.is_empty()) {
                "yes".to_string()
            } else {
                "-".to_string()
            },
        ]
    }

    fn edit_form(&self) -> CatalogForm {
        CatalogForm::edit_word(self)
    }

    fn wrap_page(page: Page<Self>) -> AnyPage {
        AnyPage::Word(page)
    }

    fn unwrap_page(page: AnyPage) -> Option<Page<Self>> {
        match page {
            AnyPage::Word(p) => Some(p),
            _ => None,
        }
    }
}
