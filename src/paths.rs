//! Request path normalization
//!
//! Runs before routing: management paths match regardless of case, slugs keep theirs

use axum::extract::Request;
use axum::http::Method;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;

/// Lowercase the first segment of a management path
///
/// `GET /ENTRY` stays as is, it is a lookup of the slug "ENTRY"
pub fn fold_management_path(mut request: Request) -> Request {
    let Some(path) = folded_path(request.method(), request.uri().path()) else {
        return request;
    };

    let path_and_query = match request.uri().query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let Ok(path_and_query) = PathAndQuery::try_from(path_and_query) else {
        return request;
    };

    let mut parts = request.uri().clone().into_parts();
    parts.path_and_query = Some(path_and_query);

    match Uri::from_parts(parts) {
        Ok(uri) => *request.uri_mut() = uri,
        Err(err) => tracing::debug!("Could not fold {}: {err}", request.uri()),
    }

    request
}

/// The folded path, when there is anything to fold
fn folded_path(method: &Method, path: &str) -> Option<String> {
    let path = path.strip_prefix('/')?;

    let (first, rest) = match path.split_once('/') {
        Some((first, rest)) => (first, Some(rest)),
        None => (path, None),
    };

    let lowercase = first.to_ascii_lowercase();
    if lowercase == first {
        return None;
    }

    let is_management = match (lowercase.as_str(), rest) {
        ("entries", _) | ("entry", Some(_)) => true,
        ("entry", None) => method != Method::GET && method != Method::HEAD,
        _ => false,
    };

    if !is_management {
        return None;
    }

    Some(match rest {
        Some(rest) => format!("/{lowercase}/{rest}"),
        None => format!("/{lowercase}"),
    })
}
