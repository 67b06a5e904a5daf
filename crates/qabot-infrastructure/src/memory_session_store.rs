//! In-memory session store.

use async_trait::async_trait;
use qabot_core::session::{ReportSession, SessionStore};
use qabot_core::{ChatId, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps report sessions in process memory.
///
/// Nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<ChatId, ReportSession>>>,
}

impl InMemorySessionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats currently mid-report.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, chat_id: ChatId) -> Result<Option<ReportSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&chat_id).cloned())
    }

    async fn save(&self, session: ReportSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.chat_id, session);
        Ok(())
    }

    async fn remove(&self, chat_id: ChatId) -> Result<Option<ReportSession>> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(&chat_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qabot_core::report::ReportField;

    #[tokio::test]
    async fn test_save_and_get() {
        let store = InMemorySessionStore::new();
        let session = ReportSession::start(ChatId(42));

        store.save(session.clone()).await.unwrap();

        assert_eq!(store.get(ChatId(42)).await.unwrap(), Some(session));
        assert_eq!(store.get(ChatId(7)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_session() {
        let store = InMemorySessionStore::new();
        let mut first = ReportSession::start(ChatId(42));
        first.answers.insert(ReportField::DateRange, "old week");
        store.save(first).await.unwrap();

        let fresh = ReportSession::start(ChatId(42));
        store.save(fresh.clone()).await.unwrap();

        let loaded = store.get(ChatId(42)).await.unwrap().unwrap();
        assert_eq!(loaded.report_id, fresh.report_id);
        assert!(loaded.answers.is_empty());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::new();
        store.save(ReportSession::start(ChatId(42))).await.unwrap();

        assert!(store.remove(ChatId(42)).await.unwrap().is_some());
        assert!(store.remove(ChatId(42)).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
