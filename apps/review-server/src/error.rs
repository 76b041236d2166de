//! Error types for the review server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared_pdf::ExtractError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Document cannot be reviewed: {0}")]
    UnreadableDocument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ServerError::UnreadableDocument(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNREADABLE_DOCUMENT", msg)
            }
            ServerError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractError> for ServerError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidPdf(_) => ServerError::InvalidRequest(err.to_string()),
            ExtractError::PasswordProtected | ExtractError::ScannedPdfNeedsOcr => {
                ServerError::UnreadableDocument(err.to_string())
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}
