use axum::http::StatusCode;

use crate::storage::Storage;
use crate::tests::helper;

#[tokio::test]
async fn test_invalid_json() {
    let (mut app, storage) = helper::setup_test_app();

    let authorization = helper::authorization();

    // wrong type of slug
    let body = r#"{"url":"https://example.com","slug":1}"#;
    let (status_code, _, message) =
        helper::maybe_create_entry_with_raw_body(&mut app, Some(&authorization), body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let message = message.unwrap();
    assert!(
        message.starts_with("Data error: slug: invalid type: integer `1`"),
        "{message}"
    );

    // not an object
    let body = r#""https://example.com""#;
    let (status_code, _, message) =
        helper::maybe_create_entry_with_raw_body(&mut app, Some(&authorization), body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(message.unwrap().starts_with("Data error: "));

    // syntax error
    let body = r#"{"}"#;
    let (status_code, _, message) =
        helper::maybe_create_entry_with_raw_body(&mut app, Some(&authorization), body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        Some("JSON syntax error: EOF while parsing a string at line 1 column 3".to_string()),
        message
    );

    // syntax error
    let body = r#"{"url":}"#;
    let (status_code, _, message) =
        helper::maybe_create_entry_with_raw_body(&mut app, Some(&authorization), body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let message = message.unwrap();
    assert!(message.starts_with("JSON syntax error: "), "{message}");
    assert!(message.ends_with("expected value at line 1 column 8"), "{message}");

    // missing content type, the body is not read at all
    let body = r#"{"url":"https://example.com"}"#;
    let (status_code, _, message) =
        helper::maybe_create_entry_with_raw_body(&mut app, Some(&authorization), body, false)
            .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Invalid URL".to_string()), message);

    // missing content type and no JSON at all
    let (status_code, _, message) =
        helper::maybe_create_entry_with_raw_body(&mut app, Some(&authorization), "url=x", false)
            .await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Invalid URL".to_string()), message);

    assert!(storage.load().await.is_empty());
}
