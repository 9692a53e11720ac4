use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    debug!("Created session {session_id}");
    (StatusCode::CREATED, Json(SessionCreatedResponse { session_id }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    debug!("Dropped session {id}");
    Ok(StatusCode::NO_CONTENT)
}
