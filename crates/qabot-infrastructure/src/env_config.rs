//! Environment-backed configuration loader.
//!
//! Reads `BotConfig` from process environment variables, after merging an
//! optional `.env` file from the working directory.

use qabot_core::config::{BotConfig, BotToken};
use qabot_core::{ChatId, QaBotError, Result};
use std::str::FromStr;

pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
pub const AUTHORIZED_CHAT_ID_VAR: &str = "QABOT_AUTHORIZED_CHAT_ID";
pub const REPORT_CHAT_ID_VAR: &str = "QABOT_REPORT_CHAT_ID";
pub const SELF_PING_URL_VAR: &str = "SELF_PING_URL";
pub const SELF_PING_INTERVAL_VAR: &str = "QABOT_SELF_PING_INTERVAL_SECS";
pub const PORT_VAR: &str = "PORT";
pub const POLL_TIMEOUT_VAR: &str = "QABOT_POLL_TIMEOUT_SECS";
pub const API_URL_VAR: &str = "QABOT_TELEGRAM_API_URL";

/// Loads configuration from environment variables.
///
/// # Example
///
/// ```ignore
/// use qabot_infrastructure::EnvConfigLoader;
///
/// let config = EnvConfigLoader::new().load()?;
/// println!("reports go to {}", config.report_chat_id);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvConfigLoader {
    skip_dotenv: bool,
}

impl EnvConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables reading `.env`; only the real environment is consulted.
    pub fn without_dotenv(mut self) -> Self {
        self.skip_dotenv = true;
        self
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `QaBotError::Config` if `BOT_TOKEN` is missing or blank, or if
    /// any numeric variable does not parse.
    pub fn load(&self) -> Result<BotConfig> {
        if !self.skip_dotenv {
            match dotenvy::dotenv() {
                Ok(path) => tracing::debug!(target: "qabot::config", "Loaded {}", path.display()),
                Err(e) if e.not_found() => {}
                Err(e) => tracing::warn!(target: "qabot::config", "Ignoring unreadable .env: {}", e),
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<BotConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(BOT_TOKEN_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                QaBotError::config(format!("{BOT_TOKEN_VAR} is not set; the bot cannot start"))
            })?;

        let mut config = BotConfig::with_token(BotToken::new(token));

        if let Some(id) = parse_var::<i64>(&lookup, AUTHORIZED_CHAT_ID_VAR)? {
            config.authorized_chat_id = ChatId(id);
        }
        if let Some(id) = parse_var::<i64>(&lookup, REPORT_CHAT_ID_VAR)? {
            config.report_chat_id = ChatId(id);
        }
        if let Some(port) = parse_var::<u16>(&lookup, PORT_VAR)? {
            config.liveness_port = port;
        }
        if let Some(timeout) = parse_var::<u64>(&lookup, POLL_TIMEOUT_VAR)? {
            config.poll_timeout_secs = timeout;
        }
        if let Some(interval) = parse_var::<u64>(&lookup, SELF_PING_INTERVAL_VAR)? {
            if interval == 0 {
                return Err(QaBotError::config(format!(
                    "{SELF_PING_INTERVAL_VAR} must be greater than zero"
                )));
            }
            config.keep_alive.interval_secs = interval;
        }
        config.keep_alive.url = non_blank(&lookup, SELF_PING_URL_VAR);
        if let Some(url) = non_blank(&lookup, API_URL_VAR) {
            config.api_url = url;
        }

        Ok(config)
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_blank(lookup, key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| QaBotError::config(format!("{key}='{raw}' is invalid: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qabot_core::config::{DEFAULT_API_URL, DEFAULT_AUTHORIZED_CHAT_ID, DEFAULT_LIVENESS_PORT};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = EnvConfigLoader::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(BOT_TOKEN_VAR));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let err = EnvConfigLoader::from_lookup(lookup_from(&[(BOT_TOKEN_VAR, "   ")])).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_defaults_apply() {
        let config = EnvConfigLoader::from_lookup(lookup_from(&[(BOT_TOKEN_VAR, "123:abc")])).unwrap();
        assert_eq!(config.bot_token.expose(), "123:abc");
        assert_eq!(config.authorized_chat_id, DEFAULT_AUTHORIZED_CHAT_ID);
        assert_eq!(config.liveness_port, DEFAULT_LIVENESS_PORT);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.keep_alive.url, None);
    }

    #[test]
    fn test_overrides() {
        let config = EnvConfigLoader::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (AUTHORIZED_CHAT_ID_VAR, "11"),
            (REPORT_CHAT_ID_VAR, "-100500"),
            (PORT_VAR, "9000"),
            (SELF_PING_URL_VAR, "https://qabot.example.net/"),
            (SELF_PING_INTERVAL_VAR, "60"),
            (API_URL_VAR, "http://127.0.0.1:8081"),
        ]))
        .unwrap();

        assert_eq!(config.authorized_chat_id, ChatId(11));
        assert_eq!(config.report_chat_id, ChatId(-100500));
        assert_eq!(config.liveness_port, 9000);
        assert_eq!(config.keep_alive.url.as_deref(), Some("https://qabot.example.net/"));
        assert_eq!(config.keep_alive.interval_secs, 60);
        assert_eq!(config.api_url, "http://127.0.0.1:8081");
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let err = EnvConfigLoader::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (PORT_VAR, "eighty"),
        ]))
        .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(PORT_VAR));
    }

    #[test]
    fn test_zero_ping_interval_is_rejected() {
        let err = EnvConfigLoader::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (SELF_PING_INTERVAL_VAR, "0"),
        ]))
        .unwrap_err();
        assert!(err.is_config());
    }
}
