use axum::http::StatusCode;
use serde_json::Value;

use crate::tests::helper;

#[tokio::test]
async fn test_round_trip() {
    let (mut app, _) = helper::setup_test_app();

    let url = "https://example.com";

    // create
    let (status_code, entry, _) = helper::maybe_create_entry(&mut app, url, Some("abc")).await;
    assert_eq!(StatusCode::CREATED, status_code);
    let entry = entry.unwrap();
    assert_eq!("abc", entry.slug);
    assert_eq!(url, entry.url);

    // list
    let entries = helper::list_entries(&mut app).await;
    assert_eq!(Some(&Value::String(url.to_string())), entries.get("abc"));

    // redirect
    let (status_code, location, _) = helper::root(&mut app, "abc").await;
    assert_eq!(StatusCode::FOUND, status_code);
    assert_eq!(Some(url.to_string()), location);

    // delete
    let (status_code, message) = helper::maybe_delete_entry(&mut app, "abc").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("Entry deleted", message);

    // gone
    let entries = helper::list_entries(&mut app).await;
    assert!(!entries.contains_key("abc"));

    let (status_code, location, _) = helper::root(&mut app, "abc").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(None, location);

    // slug can be used again
    let (status_code, _, _) =
        helper::maybe_create_entry(&mut app, "https://example.org", Some("abc")).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let (status_code, location, _) = helper::root(&mut app, "abc").await;
    assert_eq!(StatusCode::FOUND, status_code);
    assert_eq!(Some("https://example.org".to_string()), location);
}
