use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compiler::CompileError;
use crate::latex::TemplateError;
use crate::preview::PreviewError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Compilation error: {0}")]
    Compile(#[from] CompileError),

    #[error("Conflict: {0}")]
    Superseded(#[from] PreviewError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Compile(e) if e.is_transport() => {
                tracing::error!("Compiler unreachable: {e:?}");
                (
                    StatusCode::BAD_GATEWAY,
                    "COMPILE_TRANSPORT_ERROR",
                    e.to_string(),
                )
            }
            AppError::Compile(e) => {
                tracing::warn!("Compilation rejected: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "COMPILE_REMOTE_ERROR",
                    e.to_string(),
                )
            }
            AppError::Superseded(e) => (StatusCode::CONFLICT, "SUPERSEDED", e.to_string()),
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_ERROR",
                    "The document template could not be loaded".to_string(),
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
