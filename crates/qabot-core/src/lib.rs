//! Domain layer for the QA report bot.
//!
//! Holds the report field table, the pure report formatter, the session model
//! with its transition function, and the traits the outer crates implement.

pub mod chat;
pub mod config;
pub mod error;
pub mod report;
pub mod session;

pub use chat::{BotCommand, ChatId, IncomingMessage, UserInput};
pub use error::{QaBotError, Result};
