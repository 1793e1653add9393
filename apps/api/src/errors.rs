#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// None of these are fatal to the process — every variant maps to an inline
/// JSON error body and the client may retry the action immediately.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Document extraction failed: {0}")]
    Extraction(String),

    #[error("Diagnosis failed: {0}")]
    Diagnosis(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                "MISSING_CREDENTIAL",
                "Provide an inference API key in the x-api-key header".to_string(),
            ),
            AppError::MissingInput(msg) => (StatusCode::BAD_REQUEST, "MISSING_INPUT", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            // The cause is surfaced verbatim: the user decides whether to retry,
            // and a cached prior diagnosis (if any) is left untouched.
            AppError::Diagnosis(msg) => {
                tracing::error!("Diagnosis error: {msg}");
                (StatusCode::BAD_GATEWAY, "DIAGNOSIS_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
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
