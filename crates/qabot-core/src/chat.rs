//! Chat identities and inbound message types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a conversation (private chat, group or channel).
///
/// Group and channel identifiers are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single inbound message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Transport-assigned sequence number of the update carrying this message
    pub update_id: i64,
    /// The conversation the message arrived in
    pub chat_id: ChatId,
    /// The user who sent it, absent for channel posts
    pub sender_id: Option<i64>,
    /// Text body; `None` for stickers, photos and service messages
    pub text: Option<String>,
}

impl IncomingMessage {
    /// Convenience constructor for a plain text message.
    pub fn text(update_id: i64, chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            update_id,
            chat_id,
            sender_id: Some(chat_id.0),
            text: Some(text.into()),
        }
    }
}

/// Commands the bot recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// `/start`: generic greeting
    Start,
    /// `/report`: begin a new report session
    Report,
}

impl BotCommand {
    /// Parses a command token such as `/report` or `/report@qa_bot`.
    ///
    /// Returns `None` for unknown commands and for anything that is not a
    /// command at all.
    pub fn parse(token: &str) -> Option<Self> {
        let name = token.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name {
            "start" => Some(Self::Start),
            "report" => Some(Self::Report),
            _ => None,
        }
    }
}

/// Classified text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// A recognized bot command.
    Command(BotCommand),
    /// Any other text, taken verbatim.
    Text(String),
}

impl UserInput {
    /// Classifies a message body.
    ///
    /// Only the first whitespace-separated token is inspected for a command;
    /// unknown commands fall through as plain text so they can be recorded
    /// as answers.
    pub fn classify(text: &str) -> Self {
        let first = text.split_whitespace().next().unwrap_or_default();
        match BotCommand::parse(first) {
            Some(command) => Self::Command(command),
            None => Self::Text(text.to_string()),
        }
    }
}
