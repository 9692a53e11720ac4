use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::job_description::AcquireError;
use crate::llm_client::LlmError;
use crate::render::RenderError;
use crate::resume::extract::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure is terminal for the current action; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Document parse error: {0}")]
    DocumentParse(String),

    #[error("Job description fetch error: {0}")]
    Fetch(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat(_) => AppError::UnsupportedFormat(e.to_string()),
            ExtractError::Parse(_) | ExtractError::Zip(_) | ExtractError::Xml(_) => {
                AppError::DocumentParse(e.to_string())
            }
        }
    }
}

impl From<AcquireError> for AppError {
    fn from(e: AcquireError) -> Self {
        match e {
            AcquireError::MissingInput | AcquireError::InvalidUrl(_) => {
                AppError::Validation(e.to_string())
            }
            AcquireError::Fetch(_) | AcquireError::Status(_) | AcquireError::EmptyPage => {
                AppError::Fetch(e.to_string())
            }
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::OverlayNeedsPdf | RenderError::OverlayOutputMustBePdf => {
                AppError::Validation(e.to_string())
            }
            _ => AppError::Render(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            AppError::DocumentParse(msg) => {
                tracing::warn!("Document parse error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_PARSE_ERROR",
                    msg.clone(),
                )
            }
            AppError::Fetch(msg) => {
                tracing::warn!("Job description fetch error: {msg}");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", msg.clone())
            }
            // Surfaced verbatim: the user sees exactly what the generation API reported.
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR", msg.clone())
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    msg.clone(),
                )
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
