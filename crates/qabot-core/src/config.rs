//! Runtime configuration model.
//!
//! Loading from the environment lives in `qabot-infrastructure`; this module
//! only defines the shape and the built-in defaults.

use crate::chat::ChatId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat allowed to run `/report`.
pub const DEFAULT_AUTHORIZED_CHAT_ID: ChatId = ChatId(473_798_501);
/// Department chat that receives completed reports.
pub const DEFAULT_REPORT_CHAT_ID: ChatId = ChatId(-1_003_133_537_449);
pub const DEFAULT_LIVENESS_PORT: u16 = 8080;
pub const DEFAULT_SELF_PING_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
/// Public Bot API host.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Bot credential. `Debug` and `Display` never print the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(***)")
    }
}

/// Keep-alive settings. Disabled when `url` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepAliveSettings {
    pub url: Option<String>,
    pub interval_secs: u64,
}

impl Default for KeepAliveSettings {
    fn default() -> Self {
        Self {
            url: None,
            interval_secs: DEFAULT_SELF_PING_INTERVAL_SECS,
        }
    }
}

/// Everything the bot needs to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    pub bot_token: BotToken,
    /// Bot API host; a self-hosted Bot API server can stand in for the public one
    pub api_url: String,
    pub authorized_chat_id: ChatId,
    pub report_chat_id: ChatId,
    pub liveness_port: u16,
    pub poll_timeout_secs: u64,
    #[serde(default)]
    pub keep_alive: KeepAliveSettings,
}

impl BotConfig {
    /// Builds a config with the built-in defaults for everything but the token.
    pub fn with_token(bot_token: BotToken) -> Self {
        Self {
            bot_token,
            api_url: DEFAULT_API_URL.to_string(),
            authorized_chat_id: DEFAULT_AUTHORIZED_CHAT_ID,
            report_chat_id: DEFAULT_REPORT_CHAT_ID,
            liveness_port: DEFAULT_LIVENESS_PORT,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            keep_alive: KeepAliveSettings::default(),
        }
    }
}
