//! Error types for the QA report bot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every qabot crate.
///
/// Variants are typed so callers can tell a fatal configuration problem
/// apart from a transient transport failure.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum QaBotError {
    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Messaging transport or HTTP failure
    #[error("Transport error: {message}")]
    Transport {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (sockets, listeners)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QaBotError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Transport error without an HTTP status
    pub fn transport(message: impl Into<String>, is_retryable: bool) -> Self {
        Self::Transport {
            status_code: None,
            message: message.into(),
            is_retryable,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if a transport error is worth retrying.
    ///
    /// Non-transport errors are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                is_retryable: true,
                ..
            }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for QaBotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for QaBotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, QaBotError>`.
pub type Result<T> = std::result::Result<T, QaBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_retryable_transport_errors_are_retryable() {
        assert!(QaBotError::transport("timeout", true).is_retryable());
        assert!(!QaBotError::transport("bad request", false).is_retryable());
        assert!(!QaBotError::config("BOT_TOKEN").is_retryable());
    }

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: QaBotError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        match err {
            QaBotError::Io { message } => {
                assert!(message.contains("port taken"));
                assert!(message.contains("AddrInUse"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
