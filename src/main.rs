#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::ServiceExt;
use axum::extract::Request;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::Layer;
use tower::util::MapRequest;
use tower::util::MapRequestLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::AccessToken;
use crate::storage::Storage;
use crate::utils::env_var_or_else;

mod api;
mod graceful_shutdown;
mod paths;
mod root;
mod slugs;
mod storage;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "linkstash=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_BEARER_TOKEN: &str = "default_token";
const DEFAULT_DATA_FILE: &str = "data.json";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app();

    let address = setup_address()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// The router, behind the path normalization that has to happen before routing
type App = NormalizePath<MapRequest<Router, fn(Request) -> Request>>;

/// Create and setup the app with its dependencies
///
/// Entries are kept in the file from `DATA_FILE`
fn setup_app() -> App {
    let data_file = env_var_or_else("DATA_FILE", || String::from(DEFAULT_DATA_FILE));
    tracing::info!("Keeping entries in {data_file}");

    let storage = storage::setup(data_file);

    create_router(storage, setup_access_token())
}

/// Create the router for Linkstash
///
/// The specific API routes take precedence over the single segment slug route. A trailing slash
/// is ignored and management paths are case-insensitive.
fn create_router<S: Storage>(storage: S, access_token: AccessToken) -> App {
    let router = Router::new()
        .merge(api::router::<S>())
        .route("/{slug}", get(root::root::<S>))
        .fallback(root::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
        .layer(Extension(access_token));

    let fold_management_path: fn(Request) -> Request = paths::fold_management_path;
    let router = MapRequestLayer::new(fold_management_path).layer(router);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_access_token() -> AccessToken {
    let token = env_var_or_else("BEARER_TOKEN", || {
        tracing::warn!("`BEARER_TOKEN` is not set, using the default token");
        String::from(DEFAULT_BEARER_TOKEN)
    });

    AccessToken::new(&token)
}

fn setup_address() -> Result<SocketAddr> {
    let mut address =
        env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS)).parse::<SocketAddr>()?;

    // optional override of just the port
    if let Ok(port) = std::env::var("PORT") {
        // only check non-empty strings
        if !port.is_empty() {
            let port = port.parse::<u16>()?;

            address.set_port(port);
        }
    }

    Ok(address)
}
