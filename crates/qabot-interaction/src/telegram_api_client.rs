//! TelegramApiClient - Direct Bot API implementation of the transport.
//!
//! Talks to `https://api.telegram.org/bot<token>/<method>` over HTTPS using
//! long polling for inbound updates.

use crate::transport::{MessageSender, UpdateBatch, UpdateSource};
use async_trait::async_trait;
use qabot_core::config::{BotToken, DEFAULT_API_URL};
use qabot_core::{ChatId, IncomingMessage, QaBotError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bot API limit for a single message, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);
/// Headroom on top of the long-poll timeout before the HTTP request gives up.
const REQUEST_GRACE: Duration = Duration::from_secs(10);

/// Transport implementation that talks to the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramApiClient {
    client: Client,
    token: BotToken,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramApiClient {
    /// Creates a new client for the given bot token.
    pub fn new(token: BotToken) -> Self {
        Self {
            client: Client::new(),
            token,
            base_url: DEFAULT_API_URL.to_string(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Overrides the API host, e.g. for a self-hosted Bot API server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the HTTP client so it can be shared with other components.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Sets how long `getUpdates` may block waiting for new messages.
    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token.expose(), method)
    }

    async fn call<P, R>(&self, method: &str, params: &P, timeout: Duration) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        // reqwest errors carry the URL, which embeds the token
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(params)
            .send()
            .await
            .map_err(|err| {
                let err = err.without_url();
                QaBotError::Transport {
                    status_code: None,
                    message: format!("Telegram {method} request failed: {err}"),
                    is_retryable: err.is_connect() || err.is_timeout(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            QaBotError::transport(
                format!("Failed to read Telegram {method} response: {}", err.without_url()),
                true,
            )
        })?;

        parse_api_response(method, status, &body)
    }
}

#[async_trait]
impl MessageSender for TelegramApiClient {
    /// Sends `text`, split into several messages when over the Bot API limit.
    ///
    /// Chunks are not sent atomically: if a later chunk fails, the earlier
    /// ones stay delivered and a resend repeats them.
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let chunks = split_message(text, MAX_MESSAGE_LEN);
        let total = chunks.len();
        for (index, chunk) in chunks.iter().enumerate() {
            let request = SendMessageRequest {
                chat_id: chat_id.0,
                text: chunk,
            };
            let sent: Result<serde_json::Value> = self.call("sendMessage", &request, REQUEST_GRACE).await;
            if let Err(e) = sent {
                if index > 0 {
                    tracing::warn!(
                        target: "qabot::transport",
                        chat_id = chat_id.0,
                        delivered = index,
                        total,
                        "Message partially delivered"
                    );
                }
                return Err(e);
            }
        }
        tracing::debug!(target: "qabot::transport", chat_id = chat_id.0, "Message sent");
        Ok(())
    }
}

#[async_trait]
impl UpdateSource for TelegramApiClient {
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<UpdateBatch> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: &["message"],
        };
        let updates: Vec<Update> = self
            .call("getUpdates", &request, self.poll_timeout + REQUEST_GRACE)
            .await?;
        Ok(into_batch(updates))
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Serialize)]
struct GetUpdatesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<u16>,
    parameters: Option<ResponseParameters>,
}

#[derive(Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    from: Option<User>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
}

fn parse_api_response<R: DeserializeOwned>(method: &str, status: StatusCode, body: &str) -> Result<R> {
    let parsed: ApiResponse<R> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) if status.is_success() => {
            return Err(QaBotError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse Telegram {method} response: {err}"),
            });
        }
        Err(_) => {
            return Err(map_http_error(method, status, body.to_string(), None));
        }
    };

    if parsed.ok {
        return parsed.result.ok_or_else(|| {
            QaBotError::internal(format!("Telegram {method} returned ok without a result"))
        });
    }

    let code = parsed
        .error_code
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(status);
    let retry_after = parsed.parameters.and_then(|p| p.retry_after);
    let description = parsed
        .description
        .unwrap_or_else(|| "no description".to_string());
    Err(map_http_error(method, code, description, retry_after))
}

fn map_http_error(method: &str, status: StatusCode, message: String, retry_after: Option<u64>) -> QaBotError {
    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    let message = match retry_after {
        Some(seconds) => format!("Telegram {method} failed ({status}): {message}; retry after {seconds}s"),
        None => format!("Telegram {method} failed ({status}): {message}"),
    };

    QaBotError::Transport {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
    }
}

fn into_batch(updates: Vec<Update>) -> UpdateBatch {
    let next_offset = updates.iter().map(|u| u.update_id).max().map(|id| id + 1);
    let messages = updates
        .into_iter()
        .filter_map(|update| {
            let message = update.message?;
            Some(IncomingMessage {
                update_id: update.update_id,
                chat_id: ChatId(message.chat.id),
                sender_id: message.from.map(|user| user.id),
                text: message.text,
            })
        })
        .collect();

    UpdateBatch {
        messages,
        next_offset,
    }
}

/// Splits `text` into chunks of at most `limit` UTF-16 code units.
///
/// Breaks on line boundaries where possible; a single over-long line is cut
/// at character boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let units = |s: &str| s.encode_utf16().count();
    if units(text) <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_units = 0;

    for line in text.split_inclusive('\n') {
        let line_units = units(line);
        if current_units + line_units > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_units = 0;
        }

        if line_units > limit {
            for ch in line.chars() {
                let ch_units = ch.len_utf16();
                if current_units + ch_units > limit {
                    chunks.push(std::mem::take(&mut current));
                    current_units = 0;
                }
                current.push(ch);
                current_units += ch_units;
            }
        } else {
            current.push_str(line);
            current_units += line_units;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_batch_skips_non_message_updates_but_advances_offset() {
        let updates: Vec<Update> = serde_json::from_str(
            r#"[
                {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 473798501, "type": "private"}, "from": {"id": 473798501, "is_bot": false}, "text": "/report"}},
                {"update_id": 11, "edited_message": {"message_id": 1}},
                {"update_id": 12, "message": {"message_id": 2, "chat": {"id": 5, "type": "private"}, "sticker": {}}}
            ]"#,
        )
        .unwrap();

        let batch = into_batch(updates);

        assert_eq!(batch.next_offset, Some(13));
        assert_eq!(batch.messages.len(), 2);
        assert_eq!(batch.messages[0].chat_id, ChatId(473798501));
        assert_eq!(batch.messages[0].sender_id, Some(473798501));
        assert_eq!(batch.messages[0].text.as_deref(), Some("/report"));
        assert_eq!(batch.messages[1].text, None);
    }

    #[test]
    fn test_into_batch_empty() {
        let batch = into_batch(Vec::new());
        assert_eq!(batch, UpdateBatch::default());
    }

    #[test]
    fn test_parse_ok_response() {
        let result: Vec<Update> =
            parse_api_response("getUpdates", StatusCode::OK, r#"{"ok": true, "result": []}"#).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_parse_rate_limited_response_is_retryable() {
        let body = r#"{"ok": false, "error_code": 429, "description": "Too Many Requests", "parameters": {"retry_after": 5}}"#;
        let err = parse_api_response::<serde_json::Value>("sendMessage", StatusCode::TOO_MANY_REQUESTS, body)
            .unwrap_err();

        assert!(err.is_retryable());
        assert!(err.to_string().contains("retry after 5s"));
    }

    #[test]
    fn test_parse_bad_request_is_not_retryable() {
        let body = r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#;
        let err = parse_api_response::<serde_json::Value>("sendMessage", StatusCode::BAD_REQUEST, body)
            .unwrap_err();

        match err {
            QaBotError::Transport {
                status_code,
                message,
                is_retryable,
            } => {
                assert_eq!(status_code, Some(400));
                assert!(message.contains("chat not found"));
                assert!(!is_retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_json_gateway_error() {
        let err = parse_api_response::<serde_json::Value>("getUpdates", StatusCode::BAD_GATEWAY, "<html>")
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_method_url_embeds_token() {
        let client = TelegramApiClient::new(BotToken::new("123:abc"));
        assert_eq!(client.method_url("getMe"), "https://api.telegram.org/bot123:abc/getMe");

        let local = client.with_base_url("http://localhost:8081/");
        assert_eq!(local.method_url("getMe"), "http://localhost:8081/bot123:abc/getMe");
    }

    #[test]
    fn test_split_short_message_is_untouched() {
        assert_eq!(split_message("hello", 10), vec!["hello".to_string()]);
    }

    #[test]
    fn test_split_on_line_boundaries() {
        let chunks = split_message("aaaa\nbbbb\ncccc", 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n".to_string(), "cccc".to_string()]);
    }

    #[test]
    fn test_split_counts_utf16_units() {
        // Each emoji is two UTF-16 units
        let chunks = split_message("🪲🪲🪲", 4);
        assert_eq!(chunks, vec!["🪲🪲".to_string(), "🪲".to_string()]);
    }
}
