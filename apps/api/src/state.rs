use crate::job_description::JobPageFetcher;
use crate::llm_client::LlmClient;
use crate::models::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Per-user values (upload, texts, rewrite) that survive between actions.
    pub sessions: SessionStore,
    pub fetcher: JobPageFetcher,
}
