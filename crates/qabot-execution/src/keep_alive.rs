//! Periodic self-ping keeping the hosting platform from idling the process.

use qabot_core::config::KeepAliveSettings;
use qabot_core::{QaBotError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues a GET against a fixed URL on a fixed interval.
#[derive(Clone)]
pub struct KeepAlive {
    client: Client,
    url: String,
    interval: Duration,
}

impl KeepAlive {
    pub fn new(url: impl Into<String>, interval: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            interval,
        }
    }

    /// Builds the pinger from settings; `None` when no URL is configured.
    pub fn from_settings(settings: &KeepAliveSettings) -> Option<Self> {
        let url = settings.url.as_ref()?;
        Some(Self::new(url.clone(), Duration::from_secs(settings.interval_secs)))
    }

    /// Replaces the HTTP client, e.g. to change proxy settings.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one ping.
    ///
    /// # Errors
    ///
    /// Returns a transport error on connection failure or a non-success
    /// status.
    pub async fn ping_once(&self) -> Result<StatusCode> {
        let response = self
            .client
            .get(&self.url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| QaBotError::transport(format!("Self-ping failed: {e}"), true))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QaBotError::Transport {
                status_code: Some(status.as_u16()),
                message: format!("Self-ping returned {status}"),
                is_retryable: true,
            });
        }
        Ok(status)
    }

    /// Pings every interval until `cancel` fires.
    ///
    /// The first ping happens one interval after start. Failures are logged
    /// and retried on the next tick.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(target: "qabot::keep_alive", "Keep-alive started ({:?} interval)", self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match self.ping_once().await {
                Ok(status) => tracing::debug!(target: "qabot::keep_alive", %status, "Self-ping ok"),
                Err(e) => tracing::warn!(target: "qabot::keep_alive", "{}", e),
            }
        }

        tracing::info!(target: "qabot::keep_alive", "Keep-alive stopped");
    }
}
