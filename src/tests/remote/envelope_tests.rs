use super::*;

use crate::model::{Section, Vocabulary, VocabularyRef, Word};

#[test]
fn success_false_surfaces_server_message() {
    let err = decode_envelope::<serde_json::Value>(
        StatusCode::OK,
        r#"{"success":false,"message":"in use"}"#,
        "delete word",
        "Failed to delete word.",
    )
    .unwrap_err();
    assert_eq!(err, ApiError::api("in use"));
}

#[test]
fn success_false_without_message_uses_fallback() {
    let err = decode_envelope::<serde_json::Value>(
        StatusCode::OK,
        r#"{"success":false}"#,
        "list sections",
        "Failed to fetch sections.",
    )
    .unwrap_err();
    assert_eq!(err.user_message(), "Failed to fetch sections.");
}

#[test]
fn http_error_with_json_message_is_verbatim() {
    let err = decode_envelope::<serde_json::Value>(
        StatusCode::BAD_REQUEST,
        r#"{"success":false,"message":"name is taken"}"#,
        "create vocabulary",
        "Failed to create vocabulary.",
    )
    .unwrap_err();
    assert_eq!(err.user_message(), "name is taken");
}

#[test]
fn http_error_without_json_mentions_status() {
    let err = decode_envelope::<serde_json::Value>(
        StatusCode::BAD_GATEWAY,
        "<html>bad gateway</html>",
        "list words",
        "Failed to load data.",
    )
    .unwrap_err();
    assert_eq!(err.user_message(), "Failed to load data. (HTTP 502)");
}

#[test]
fn listing_envelope_decodes_data_and_nullable_pagination() {
    let body = r#"{
        "success": true,
        "data": [{"_id": "v1", "name": "Animals", "type": "modern"}],
        "pagination": {"page": 1, "limit": 10, "totalPage": null, "hasNextPage": false, "hasPrevPage": false}
    }"#;
    let env = decode_envelope::<Vec<Vocabulary>>(StatusCode::OK, body, "list", "failed").unwrap();
    let data = env.data.unwrap();
    assert_eq!(data[0].id, "v1");
    assert_eq!(data[0].vocab_type, "modern");
    let p = env.pagination.unwrap();
    assert_eq!(p.total_page, None);
    assert_eq!(p.describe(), "page 1/?");
}

#[test]
fn malformed_success_body_is_decode_error() {
    let err = decode_envelope::<Vec<Vocabulary>>(StatusCode::OK, "not json", "list", "failed")
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[test]
fn null_parent_reference_does_not_break_the_listing() {
    let body = r#"{
        "success": true,
        "data": [
            {"_id": "s1", "name": "Orphan", "vocabulary": null},
            {"_id": "s2", "name": "Pets", "vocabulary": {"_id": "v1", "name": "Animals", "type": "modern"}}
        ]
    }"#;
    let env = decode_envelope::<Vec<Section>>(StatusCode::OK, body, "list", "failed").unwrap();
    let data = env.data.unwrap();
    assert_eq!(data[0].vocabulary, VocabularyRef::default());
    assert_eq!(data[1].vocabulary.name, "Animals");

    let body = r#"{"success": true, "data": [
        {"_id": "w1", "name": "cat", "vocabulary": null, "section": null, "category": null}
    ]}"#;
    let env = decode_envelope::<Vec<Word>>(StatusCode::OK, body, "list", "failed").unwrap();
    let word = &env.data.unwrap()[0];
    assert_eq!(word.vocabulary.id, "");
    assert_eq!(word.section.id, "");
    assert_eq!(word.category, None);
}

#[test]
fn record_url_keeps_base_path_and_escapes_the_id() {
    let client = RemoteClient::new(
        "http://127.0.0.1:9/api/",
        &crate::store::AuthSession::anonymous(),
    )
    .unwrap();
    let url = client.record_url(Resource::Section, "get-one", "s 1/2").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9/api/section/get-one/s%201%2F2");
}
