pub mod health;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::job_description::handlers as job_description;
use crate::optimizer::handlers as optimizer;
use crate::render::handlers as render;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Largest accepted request body (resume uploads).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            delete(sessions::handle_delete_session),
        )
        // Pipeline
        .route(
            "/api/v1/sessions/:id/resume",
            post(resume::handle_upload_resume),
        )
        .route(
            "/api/v1/sessions/:id/job-description",
            post(job_description::handle_set_job_description),
        )
        .route(
            "/api/v1/sessions/:id/optimize",
            post(optimizer::handle_optimize),
        )
        .route(
            "/api/v1/sessions/:id/download",
            get(render::handle_download),
        )
        // Stateless
        .route(
            "/api/v1/completeness",
            post(resume::handle_check_completeness),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
