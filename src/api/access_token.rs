//! Access token service
//!
//! Guard the management endpoints based on the Authorization header

use std::sync::Arc;

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::Error;

/// Prefix of the Authorization header, the token follows directly after
const BEARER_PREFIX: &str = "Bearer ";

/// The shared secret allowing access to the management endpoints
#[derive(Clone, Debug)]
pub struct AccessToken {
    /// The secret itself
    token: Arc<str>,
}

impl AccessToken {
    /// Create an access token from a secret
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::from(token),
        }
    }

    /// Check a full Authorization header value against the token
    ///
    /// The prefix is case-sensitive and the token has to match exactly
    fn allows(&self, authorization: &str) -> bool {
        authorization
            .strip_prefix(BEARER_PREFIX)
            .is_some_and(|token| token == &*self.token)
    }
}

/// Proof the request carries the right access token
///
/// Put it first in the handler arguments, nothing else is extracted when it is missing
#[derive(Debug)]
pub struct Authorized;

impl<S> FromRequestParts<S> for Authorized
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(access_token) = parts
            .extract::<Extension<AccessToken>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get access token"))?;

        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match authorization {
            Some(authorization) if access_token.allows(authorization) => Ok(Authorized),
            Some(_) => {
                tracing::debug!("Invalid access token for {}", parts.uri.path());

                Err(Error::forbidden("Forbidden"))
            }
            None => {
                tracing::debug!("Missing access token for {}", parts.uri.path());

                Err(Error::forbidden("Forbidden"))
            }
        }
    }
}
