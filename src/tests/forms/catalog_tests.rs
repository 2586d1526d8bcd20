use super::*;

use crate::error::REQUIRED_FIELDS;
use crate::model::{SectionRef, VocabularyRef};

#[test]
fn word_create_without_vocabulary_is_rejected() {
    let mut form = CatalogForm::create(Resource::Word);
    form.set("name", "cat");
    form.set("description", "a small animal");
    form.set("section", "s1");

    let err = form.validate().unwrap_err();
    assert_eq!(err, ApiError::validation(REQUIRED_FIELDS));
    assert_eq!(err.user_message(), "Please fill all required fields.");
}

#[test]
fn payload_omits_blank_optional_fields() {
    let mut form = CatalogForm::create(Resource::Word);
    form.set("name", " cat ");
    form.set("description", "meow");
    form.set("vocabulary", "v1");
    form.set("section", "s1");

    let payload = form.validate().unwrap();
    assert_eq!(payload.get("name"), Some("cat"));
    assert_eq!(payload.get("category"), None);
    assert_eq!(payload.get("image"), None);
    assert_eq!(
        payload.into_value(),
        serde_json::json!({
            "name": "cat",
            "description": "meow",
            "vocabulary": "v1",
            "section": "s1",
        })
    );
}

#[test]
fn changing_vocabulary_clears_section_and_category() {
    let mut form = CatalogForm::create(Resource::Word);
    form.set("vocabulary", "v1");
    form.set("section", "s1");
    form.set("category", "c1");

    let cleared = form.set("vocabulary", "v2");
    assert_eq!(cleared, vec!["section", "category"]);
    assert_eq!(form.value("section"), "");
    assert_eq!(form.value("category"), "");

    form.set("section", "s2");
    form.set("category", "c2");
    assert_eq!(form.set("section", "s3"), vec!["category"]);

    // Re-setting the same value keeps dependents.
    form.set("category", "c3");
    assert!(form.set("section", "s3").is_empty());
    assert_eq!(form.value("category"), "c3");
}

#[test]
fn vocabulary_type_must_be_known() {
    let mut form = CatalogForm::create(Resource::Vocabulary);
    form.set("name", "Animals");
    form.set("type", "future");
    assert_eq!(form.validate().unwrap_err(), ApiError::validation(INVALID_TYPE));

    form.set("type", "History");
    assert_eq!(form.validate().unwrap().get("type"), Some("history"));
}

#[test]
fn category_create_requires_section() {
    let mut form = CatalogForm::create(Resource::Category);
    form.set("name", "Pets");
    form.set("vocabulary", "v1");
    assert!(form.validate().is_err());
    form.set("section", "s1");
    assert!(form.validate().is_ok());
}

#[test]
fn update_needs_at_least_one_field() {
    let form = CatalogForm::update(Resource::Category, "c1");
    assert_eq!(
        form.validate().unwrap_err().user_message(),
        NOTHING_TO_UPDATE
    );
    assert!(!form.has_field("section"));
}

#[test]
fn edit_forms_prefill_current_values() {
    let section = Section {
        id: "s1".to_string(),
        name: "Greetings".to_string(),
        vocabulary: VocabularyRef {
            id: "v1".to_string(),
            name: "Basics".to_string(),
            vocab_type: "modern".to_string(),
        },
        image: None,
        created_at: String::new(),
        updated_at: String::new(),
    };
    let form = CatalogForm::edit_section(&section);
    assert_eq!(form.id(), Some("s1"));
    assert_eq!(form.title(), "Update section");
    let payload = form.validate().unwrap();
    assert_eq!(payload.keys(), vec!["name", "vocabulary"]);

    let word = Word {
        id: "w1".to_string(),
        name: "cat".to_string(),
        description: String::new(),
        image: Some("/uploads/cat.png".to_string()),
        vocabulary: VocabularyRef::default(),
        section: SectionRef::default(),
        category: None,
        created_at: String::new(),
        updated_at: String::new(),
    };
    let payload = CatalogForm::edit_word(&word).validate().unwrap();
    assert_eq!(payload.get("image"), Some("/uploads/cat.png"));
    assert_eq!(payload.get("description"), None);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut form = CatalogForm::create(Resource::Vocabulary);
    assert!(form.set("section", "s1").is_empty());
    assert_eq!(form.value("section"), "");
}
