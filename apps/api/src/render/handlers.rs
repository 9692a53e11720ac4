use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::{render, OutputFormat, RenderMode};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub mode: RenderMode,
    #[serde(default)]
    pub format: OutputFormat,
}

/// GET /api/v1/sessions/:id/download?mode=overlay|rebuilt&format=pdf|docx|txt
///
/// Renders the session's rewritten resume as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    let text = session
        .rewritten
        .ok_or_else(|| AppError::Validation("optimize the resume before downloading".to_string()))?;
    let original = session.resume;

    let DownloadQuery { mode, format } = query;
    let rendered =
        tokio::task::spawn_blocking(move || render(&text, mode, format, original.as_ref()))
            .await
            .map_err(anyhow::Error::from)??;

    info!(
        "Rendered {} ({} bytes, {:?} mode) for session {id}",
        rendered.file_name(),
        rendered.bytes.len(),
        mode
    );

    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, rendered.media_type.mime().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}
