#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document could not be opened: {0}")]
    DocumentUnreadable(String),

    #[error("Document has no pages")]
    DocumentEmpty,

    #[error("No text could be extracted from the document")]
    NoTextFound,

    #[error("Could not parse any meals or ingredients: {0}")]
    ParseFailure(String),

    #[error("Failed to save data: {0}")]
    PersistenceWrite(String),

    #[error("Failed to load data: {0}")]
    PersistenceRead(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DocumentUnreadable(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_UNREADABLE",
                self.to_string(),
            ),
            AppError::DocumentEmpty => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_EMPTY",
                self.to_string(),
            ),
            AppError::NoTextFound => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_TEXT_FOUND",
                self.to_string(),
            ),
            AppError::ParseFailure(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PARSE_FAILURE",
                self.to_string(),
            ),
            AppError::PersistenceWrite(msg) => {
                tracing::error!("persistence write error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_WRITE_FAILURE",
                    self.to_string(),
                )
            }
            AppError::PersistenceRead(msg) => {
                tracing::error!("persistence read error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_READ_FAILURE",
                    self.to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
