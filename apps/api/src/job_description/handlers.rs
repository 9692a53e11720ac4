use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::job_description::{acquire, JobDescriptionInput, JobDescriptionSource};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub job_description: String,
    pub source: JobDescriptionSource,
}

/// POST /api/v1/sessions/:id/job-description
///
/// Accepts pasted text or a posting URL. On failure the session is left with
/// no job description.
pub async fn handle_set_job_description(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<JobDescriptionInput>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    if state.sessions.get(id).await.is_none() {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }

    let description = match acquire(input, &state.fetcher).await {
        Ok(description) => description,
        Err(e) => {
            state
                .sessions
                .update(id, |session| session.job_description = None)
                .await;
            return Err(e.into());
        }
    };

    info!(
        "Job description set for session {id}: {} chars ({:?})",
        description.text.len(),
        description.source
    );

    let response = JobDescriptionResponse {
        job_description: description.text.clone(),
        source: description.source.clone(),
    };
    state
        .sessions
        .update(id, move |session| session.job_description = Some(description))
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    Ok(Json(response))
}
