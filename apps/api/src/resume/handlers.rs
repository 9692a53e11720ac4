//! Axum route handlers for resume upload and the completeness check.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{MediaType, UploadedDocument};
use crate::resume::completeness::{check_completeness, CompletenessReport};
use crate::resume::extract::extract_text;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub media_type: MediaType,
    pub text: String,
    pub completeness: CompletenessReport,
}

#[derive(Debug, Deserialize)]
pub struct CompletenessRequest {
    pub text: String,
}

/// POST /api/v1/sessions/:id/resume
///
/// Extracts the uploaded resume's text, stores upload and text in the session,
/// and reports which standard sections look missing. A new upload discards any
/// earlier rewrite.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    if state.sessions.get(id).await.is_none() {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }

    let upload = read_upload(multipart).await?;
    let media_type = upload.media_type;
    let for_extraction = upload.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&for_extraction))
        .await
        .map_err(anyhow::Error::from)??;

    info!(
        "Extracted {} chars from {:?} resume ({} bytes)",
        text.len(),
        media_type,
        upload.bytes.len()
    );

    let completeness = check_completeness(&text);
    let stored_text = text.clone();
    state
        .sessions
        .update(id, move |session| {
            session.resume = Some(upload);
            session.resume_text = Some(stored_text);
            session.rewritten = None;
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    Ok(Json(ResumeUploadResponse {
        media_type,
        text,
        completeness,
    }))
}

/// POST /api/v1/completeness
///
/// Stateless: runs the completeness heuristic over caller-supplied text.
pub async fn handle_check_completeness(
    Json(request): Json<CompletenessRequest>,
) -> Json<CompletenessReport> {
    Json(check_completeness(&request.text))
}

/// Pulls the `file` field out of the multipart body and resolves its format.
async fn read_upload(mut multipart: Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let declared = field.content_type().map(str::to_string);
        let media_type = MediaType::detect(declared.as_deref(), file_name.as_deref())
            .ok_or_else(|| {
                AppError::UnsupportedFormat(format!(
                    "cannot read {} (declared type {})",
                    file_name.as_deref().unwrap_or("upload"),
                    declared.as_deref().unwrap_or("none")
                ))
            })?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        return Ok(UploadedDocument {
            bytes,
            media_type,
            file_name,
        });
    }

    Err(AppError::Validation(format!(
        "multipart body has no '{FILE_FIELD}' field"
    )))
}
