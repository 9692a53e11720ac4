//! Axum route handler for the rewrite step.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::optimizer::rewriter::rewrite_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized_text: String,
}

/// POST /api/v1/sessions/:id/optimize
///
/// Rewrites the session's resume text against its job description and stores
/// the result for download.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    let resume_text = session
        .resume_text
        .ok_or_else(|| AppError::Validation("upload a resume before optimizing".to_string()))?;
    let job_description = session.job_description.ok_or_else(|| {
        AppError::Validation("provide a job description before optimizing".to_string())
    })?;

    let optimized_text = rewrite_resume(&resume_text, &job_description.text, &state.llm).await?;

    let stored = optimized_text.clone();
    state
        .sessions
        .update(id, move |session| session.rewritten = Some(stored))
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    Ok(Json(OptimizeResponse { optimized_text }))
}
