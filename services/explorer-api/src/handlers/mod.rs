//! HTTP request handlers for the explorer API.

pub mod health;
pub mod pages;
pub mod sessions;

use axum::{
    http::{header, StatusCode},
    response::Response,
};
use explorer_common::ExplorerError;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// JSON response with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(json.into())
            .unwrap_or_default(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body("Serialization error".into())
                .unwrap_or_default()
        }
    }
}

/// Error response carrying the error kind and message.
pub fn error_response(err: &ExplorerError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(
        status,
        &ErrorBody {
            error: err.kind(),
            message: err.to_string(),
        },
    )
}
