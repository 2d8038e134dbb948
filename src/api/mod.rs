//! All API endpoint setup

use axum::Router;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;

pub use access_token::AccessToken;
pub use access_token::Authorized;
pub use request::Form;
pub use request::PathParameters;
pub use request::parse_url;
pub use response::Error;
pub use response::Message;
pub use response::Success;

use crate::root;
use crate::storage::Storage;

mod access_token;
mod entries;
mod request;
mod response;

/// Get the Axum router for all API routes
///
/// `GET /entry` is not an API route, it resolves the slug "entry" like any other slug
pub fn router<S: Storage>() -> Router {
    Router::new()
        .route("/entries", get(entries::list::<S>))
        .route("/entry", post(entries::create::<S>).get(root::root::<S>))
        .route("/entry/{slug}", delete(entries::delete::<S>))
}
