//! API request helpers

use std::sync::LazyLock;

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use super::Error;

/// Shape every target URL has to match: a scheme, a host start and no whitespace
///
/// Whitespace is spelled out: it includes U+FEFF and leaves out U+0085. The character after the
/// host start may not be a line terminator. A host starting with a character outside the BMP
/// counts as two characters.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let whitespace = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";
    let line_terminators = r"\n\r\x{2028}\x{2029}";
    let astral = r"\x{10000}-\x{10FFFF}";

    Regex::new(&format!(
        "^https?://(?:[^{whitespace}$.?#{astral}][^{line_terminators}]|[{astral}])[^{whitespace}]*$"
    ))
    .expect("Valid URL pattern")
});

/// Validate a URL
///
/// ```rust
/// let url = "https://www.example.com/";
/// assert!(parse_url(url).is_ok())
/// ```
pub fn parse_url<I>(url: I) -> Result<String, Error>
where
    I: AsRef<str>,
{
    let url = url.as_ref();

    if URL_PATTERN.is_match(url) {
        Ok(url.to_string())
    } else {
        Err(Error::bad_request("Invalid URL"))
    }
}

/// Prefer the underlying cause of an extractor error, it names the offending field
fn describe<E>(err: &E) -> String
where
    E: std::error::Error,
{
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error>
where
    J: DeserializeOwned,
{
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request(format!("Data error: {}", describe(&err))))
            }
            JsonRejection::JsonSyntaxError(err) => Err(Error::bad_request(format!(
                "JSON syntax error: {}",
                describe(&err)
            ))),
            // a body that is not declared as JSON is read as an empty object
            JsonRejection::MissingJsonContentType(_err) => {
                serde_json::from_value(Value::Object(Map::new()))
                    .map_err(|err| Error::bad_request(format!("Data error: {err}")))
            }
            JsonRejection::BytesRejection(err) => Err(Error::bad_request(format!(
                "Invalid characters in JSON: {err}"
            ))),
            err => Err(Error::bad_request(format!("Unknown JSON error: {err}"))),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::bad_request(format!("Invalid path parameter: {err}")))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request(format!("Missing path parameter: {err}")))
            }
            err => Err(Error::bad_request(format!("Unknown path error: {err}"))),
        },
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<P>::from_request_parts(parts, state).await;

        parse_path(path).map(PathParameters)
    }
}
