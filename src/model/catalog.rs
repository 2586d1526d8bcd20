use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// The four remote resource kinds, in hierarchy order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Vocabulary,
    Section,
    Category,
    Word,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Vocabulary,
        Resource::Section,
        Resource::Category,
        Resource::Word,
    ];

    /// Path segment used by the API (`/{segment}/get-all`).
    pub fn segment(self) -> &'static str {
        match self {
            Resource::Vocabulary => "vocabulary",
            Resource::Section => "section",
            Resource::Category => "category",
            Resource::Word => "word",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Resource::Vocabulary => "Vocabularies",
            Resource::Section => "Sections",
            Resource::Category => "Categories",
            Resource::Word => "Words",
        }
    }

    /// Query key that scopes this resource's listing to its parent.
    pub fn parent_key(self) -> Option<&'static str> {
        match self {
            Resource::Vocabulary | Resource::Word => None,
            Resource::Section => Some("vocabulary"),
            Resource::Category => Some("section"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyType {
    Modern,
    History,
}

impl VocabularyType {
    pub const ALL: [VocabularyType; 2] = [VocabularyType::Modern, VocabularyType::History];

    pub fn as_str(self) -> &'static str {
        match self {
            VocabularyType::Modern => "modern",
            VocabularyType::History => "history",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VocabularyType::Modern => "Modern",
            VocabularyType::History => "History",
        }
    }
}

impl FromStr for VocabularyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(VocabularyType::Modern),
            "history" => Ok(VocabularyType::History),
            other => Err(format!(
                "unknown vocabulary type `{}` (expected modern or history)",
                other
            )),
        }
    }
}

/// Populated references come back as `null` once the parent is deleted.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub vocab_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub vocab_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vocabulary: VocabularyRef,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: SectionRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vocabulary: VocabularyRef,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vocabulary: VocabularyRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: SectionRef,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Pagination block of a listing response. `totalPage` stays `None` until the
/// server knows it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total_page: Option<u32>,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn first(limit: u32) -> Self {
        Self {
            page: Some(1),
            limit: Some(limit),
            total_page: None,
            has_next_page: false,
            has_prev_page: false,
        }
    }

    /// `page N/M`, with `?` while the total is unknown.
    pub fn describe(&self) -> String {
        let page = self.page.unwrap_or(1);
        match self.total_page {
            Some(total) => format!("page {}/{}", page, total),
            None => format!("page {}/?", page),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}
