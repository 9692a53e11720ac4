use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::job_description::JobDescription;
use crate::models::document::UploadedDocument;

/// Sessions untouched for longer than this are dropped on the next `create`.
pub const SESSION_TTL_MINUTES: i64 = 120;

/// Values that must survive between user actions.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub resume: Option<UploadedDocument>,
    pub resume_text: Option<String>,
    pub job_description: Option<JobDescription>,
    pub rewritten: Option<String>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_used_at: now,
            resume: None,
            resume_text: None,
            job_description: None,
            rewritten: None,
        }
    }
}

/// In-memory, session-scoped key-value store. Nothing is persisted.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;

        let cutoff = now - Duration::minutes(SESSION_TTL_MINUTES);
        let before = sessions.len();
        sessions.retain(|_, s| s.last_used_at >= cutoff);
        if sessions.len() < before {
            debug!("Purged {} idle sessions", before - sessions.len());
        }

        let session = Session::new(now);
        let id = session.id;
        sessions.insert(id, session);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Applies `f` to the session, returning `None` if it does not exist.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id)?;
        session.last_used_at = Utc::now();
        Some(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    #[cfg(test)]
    async fn backdate(&self, id: Uuid, minutes: i64) {
        if let Some(s) = self.inner.write().await.get_mut(&id) {
            s.last_used_at -= Duration::minutes(minutes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get() {
        let store = SessionStore::new();
        let id = store.create().await;
        let session = store.get(id).await.unwrap();
        assert_eq!(session.id, id);
        assert!(session.resume_text.is_none());
    }

    #[tokio::test]
    async fn test_update_persists_values() {
        let store = SessionStore::new();
        let id = store.create().await;
        store
            .update(id, |s| s.rewritten = Some("JANE DOE".to_string()))
            .await
            .unwrap();
        assert_eq!(store.get(id).await.unwrap().rewritten.as_deref(), Some("JANE DOE"));
    }

    #[tokio::test]
    async fn test_update_unknown_session_is_none() {
        let store = SessionStore::new();
        assert!(store.update(Uuid::new_v4(), |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_sessions_are_purged_on_create() {
        let store = SessionStore::new();
        let stale = store.create().await;
        store.backdate(stale, SESSION_TTL_MINUTES + 1).await;
        let fresh = store.create().await;
        assert!(store.get(stale).await.is_none());
        assert!(store.get(fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new();
        let id = store.create().await;
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
    }
}
