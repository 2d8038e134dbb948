//! API response helpers

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

/// Hold data for a successful API interaction
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    data: V,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: V) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            data,
        }
    }
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        (self.status_code, Json(self.data)).into_response()
    }
}

/// Response body with just a message
#[derive(Debug, Serialize)]
pub struct Message {
    message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
}

impl Error {
    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    pub fn forbidden<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::FORBIDDEN,
            message: message.to_string(),
        }
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }

    pub fn internal_server_error<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorWrapper {
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(ErrorWrapper {
                message: self.message,
            }),
        )
            .into_response()
    }
}
