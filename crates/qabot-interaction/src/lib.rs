//! Messaging transport for qabot.
//!
//! Defines the seams the use case and the polling loop talk to, and the
//! Telegram Bot API client implementing both.

pub mod telegram_api_client;
pub mod transport;

pub use telegram_api_client::TelegramApiClient;
pub use transport::{MessageSender, UpdateBatch, UpdateSource};
