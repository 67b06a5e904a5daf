//! Session store trait.

use super::model::ReportSession;
use crate::chat::ChatId;
use crate::error::Result;
use async_trait::async_trait;

/// Holds in-progress report sessions, keyed by chat.
///
/// Injected into the use case so each test can start from an empty store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Finds the in-progress session of a chat.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))`: The chat is mid-report
    /// - `Ok(None)`: The chat is idle
    async fn get(&self, chat_id: ChatId) -> Result<Option<ReportSession>>;

    /// Stores a session, replacing any previous one for the same chat.
    async fn save(&self, session: ReportSession) -> Result<()>;

    /// Removes the session of a chat, returning it if one existed.
    async fn remove(&self, chat_id: ChatId) -> Result<Option<ReportSession>>;
}
