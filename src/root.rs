//! The root!
//!
//! The public part of Linkstash, the actual redirect logic

use std::str::Utf8Error;

use axum::Extension;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header::LOCATION;
use percent_encoding::CONTROLS;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;

use crate::api::Error;
use crate::storage::Storage;

/// The root!
///
/// All single segment `GET` requests end up in this function.
///
/// A lookup in storage will be done looking for the right slug, based on the path
pub async fn root<S: Storage>(
    Extension(storage): Extension<S>,
    uri: Uri,
) -> Result<(StatusCode, HeaderMap), Error> {
    let slug = uri.path().trim_matches('/');
    let slug = url_decode_slug(slug)
        .map_err(|_| Error::bad_request("URL contains invalid UTF-8 characters"))?;

    tracing::debug!("Looking for slug: /{slug}");

    let entries = storage.load().await;

    let Some(url) = entries.get(&slug) else {
        tracing::debug!(r#"Slug "{slug}" not found"#);

        return Err(Error::not_found("Slug not found"));
    };

    tracing::debug!(r#"Slug "{slug}" redirecting to: {url}"#);

    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, location(url)?);

    Ok((StatusCode::FOUND, headers))
}

/// Anything that is not a slug or an API route
pub async fn not_found() -> Error {
    Error::not_found("Not found")
}

/// URL decode slug
///
/// Uses percentage encoding for the decoding, might error in case of invalid UTF-8
fn url_decode_slug(slug: &str) -> Result<String, Utf8Error> {
    let decoded = percent_decode_str(slug);

    decoded.decode_utf8().map(|decoded| decoded.to_string())
}

/// Location header for a stored URL
///
/// Control characters and non-ASCII characters are percent-encoded, they are not allowed in a
/// header value
fn location(url: &str) -> Result<HeaderValue, Error> {
    let encoded = utf8_percent_encode(url, CONTROLS).to_string();

    HeaderValue::from_str(&encoded).map_err(|err| {
        tracing::error!(r#"URL "{url}" is not a valid location: {err}"#);

        Error::internal_server_error("Invalid location")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_decode_slug() {
        assert_eq!("abc", url_decode_slug("abc").unwrap());
        assert_eq!("a b", url_decode_slug("a%20b").unwrap());
        assert_eq!("🦀", url_decode_slug("%F0%9F%A6%80").unwrap());
        assert!(url_decode_slug("%c0").is_err());
    }

    #[test]
    fn test_location() {
        assert_eq!(
            "https://www.example.com/?a=b#c",
            location("https://www.example.com/?a=b#c").unwrap()
        );
        assert_eq!(
            "https://example.com/%C3%BCmlaut",
            location("https://example.com/ümlaut").unwrap()
        );
        assert_eq!(
            "https://example.com/%7F",
            location("https://example.com/\u{7f}").unwrap()
        );
    }
}
