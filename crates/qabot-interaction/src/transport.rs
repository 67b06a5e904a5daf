//! Transport traits.

use async_trait::async_trait;
use qabot_core::{ChatId, IncomingMessage, Result};

/// Outbound half of the transport.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends a plain text message to a chat.
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

/// One poll's worth of inbound messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBatch {
    /// Messages in arrival order
    pub messages: Vec<IncomingMessage>,
    /// Offset acknowledging everything fetched, including updates that
    /// carried no message
    pub next_offset: Option<i64>,
}

/// Inbound half of the transport.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Fetches updates with `update_id >= offset`.
    ///
    /// Implementations may block up to their long-poll timeout when nothing
    /// is pending. Passing `offset` acknowledges every earlier update.
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<UpdateBatch>;
}
