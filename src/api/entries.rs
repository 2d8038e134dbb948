//! Entries API endpoints
//!
//! Everything related to managing the slug to URL mapping

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::slugs;
use crate::storage::Entries;
use crate::storage::Storage;

use super::Authorized;
use super::Error;
use super::Form;
use super::Message;
use super::PathParameters;
use super::Success;
use super::parse_url;

/// List all entries
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:3000/entries
/// ```
///
/// Response:
/// ```json
/// { "abc": "https://www.example.com/" }
/// ```
pub async fn list<S: Storage>(
    _: Authorized,
    Extension(storage): Extension<S>,
) -> Success<Entries> {
    Success::ok(storage.load().await)
}

/// Create entry form
///
/// Fields to create an entry with
#[derive(Debug, Deserialize)]
pub struct CreateEntryForm {
    /// URL to redirect to
    ///
    /// Anything but a valid URL string is rejected as an invalid URL
    url: Option<Value>,

    /// Slug to create the entry with, generated when missing or empty
    slug: Option<String>,
}

/// Entry response going to the user
#[derive(Debug, Serialize)]
pub struct EntryCreatedResponse {
    /// Always "Entry added"
    message: &'static str,

    /// Slug the entry is reachable by
    slug: String,

    /// URL the slug redirects to
    url: String,
}

/// Create an entry based on the [`CreateEntryForm`](CreateEntryForm) form
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "url": "https://www.example.com/", "slug": "abc" }' \
///     http://localhost:3000/entry
/// ```
///
/// Response:
/// ```json
/// { "message": "Entry added", "slug": "abc", "url": "https://www.example.com/" }
/// ```
pub async fn create<S: Storage>(
    _: Authorized,
    Extension(storage): Extension<S>,
    Form(form): Form<CreateEntryForm>,
) -> Result<Success<EntryCreatedResponse>, Error> {
    let url = form
        .url
        .as_ref()
        .and_then(Value::as_str)
        .map_or_else(|| Err(Error::bad_request("Invalid URL")), parse_url)?;

    let requested_slug = form.slug.filter(|slug| !slug.is_empty());

    let mut entries = storage.load().await;

    let slug = add_entry(&mut entries, requested_slug, &url, slugs::generate)?;

    save(&storage, &entries).await?;

    Ok(Success::created(EntryCreatedResponse {
        message: "Entry added",
        slug,
        url,
    }))
}

/// Add an entry to the given entries, returning the slug it got
///
/// Only requested slugs are checked, a generated slug replaces whatever it collides with
fn add_entry<G>(
    entries: &mut Entries,
    requested_slug: Option<String>,
    url: &str,
    generate: G,
) -> Result<String, Error>
where
    G: FnOnce() -> String,
{
    let slug = if let Some(slug) = requested_slug {
        if entries.contains_key(&slug) {
            return Err(Error::bad_request("Slug already exists"));
        }

        slug
    } else {
        generate()
    };

    tracing::debug!(r#"Adding slug "{slug}" redirecting to: {url}"#);

    entries.insert(slug.clone(), url.to_string());

    Ok(slug)
}

/// Delete an entry
///
/// Request:
/// ```sh
/// curl -v -XDELETE \
///     -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:3000/entry/abc
/// ```
///
/// Response:
/// ```json
/// { "message": "Entry deleted" }
/// ```
pub async fn delete<S: Storage>(
    _: Authorized,
    Extension(storage): Extension<S>,
    PathParameters(slug): PathParameters<String>,
) -> Result<Success<Message>, Error> {
    let mut entries = storage.load().await;

    if entries.remove(&slug).is_none() {
        tracing::debug!(r#"Slug "{slug}" not found"#);

        return Err(Error::not_found("Slug not found"));
    }

    tracing::debug!(r#"Deleting slug "{slug}""#);

    save(&storage, &entries).await?;

    Ok(Success::ok(Message::new("Entry deleted")))
}

/// Save entries, hiding the cause of a failure from the user
async fn save<S: Storage>(storage: &S, entries: &Entries) -> Result<(), Error> {
    storage.save(entries).await.map_err(|err| {
        tracing::error!("Could not save entries: {err}");

        Error::internal_server_error("Could not save entries")
    })
}
