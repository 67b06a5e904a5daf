//! Update polling loop.
//!
//! Fetches updates one batch at a time and hands each message to the
//! `ReportUseCase` in arrival order. Nothing a single message does can stop
//! the loop: errors and panics are logged and the next message is processed.

use futures::FutureExt;
use qabot_application::{HandleOutcome, ReportUseCase};
use qabot_core::{IncomingMessage, Result};
use qabot_interaction::UpdateSource;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Sequential consumer of inbound updates.
pub struct UpdatePoller {
    source: Arc<dyn UpdateSource>,
    usecase: Arc<ReportUseCase>,
    offset: Option<i64>,
    error_backoff: Duration,
}

impl UpdatePoller {
    pub fn new(source: Arc<dyn UpdateSource>, usecase: Arc<ReportUseCase>) -> Self {
        Self {
            source,
            usecase,
            offset: None,
            error_backoff: DEFAULT_ERROR_BACKOFF,
        }
    }

    /// Sets the pause after a failed fetch.
    pub fn with_error_backoff(mut self, error_backoff: Duration) -> Self {
        self.error_backoff = error_backoff;
        self
    }

    /// Offset passed on the next fetch.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetches one batch and handles every message in it.
    ///
    /// # Returns
    ///
    /// The number of messages handled without error.
    ///
    /// # Errors
    ///
    /// Only a failed fetch is returned; per-message failures are logged.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let batch = self.source.fetch_updates(self.offset).await?;
        if let Some(next) = batch.next_offset {
            self.offset = Some(next);
        }

        let mut handled = 0;
        for message in &batch.messages {
            if self.dispatch(message).await {
                handled += 1;
            }
        }
        Ok(handled)
    }

    async fn dispatch(&self, message: &IncomingMessage) -> bool {
        let result = AssertUnwindSafe(self.usecase.handle_message(message))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(outcome)) => {
                if outcome != HandleOutcome::Ignored {
                    tracing::debug!(
                        target: "qabot::polling",
                        update_id = message.update_id,
                        ?outcome,
                        "Message handled"
                    );
                }
                true
            }
            Ok(Err(e)) => {
                tracing::error!(
                    target: "qabot::polling",
                    update_id = message.update_id,
                    chat_id = message.chat_id.0,
                    "Failed to handle message: {}",
                    e
                );
                false
            }
            Err(_) => {
                tracing::error!(
                    target: "qabot::polling",
                    update_id = message.update_id,
                    chat_id = message.chat_id.0,
                    "Message handler panicked"
                );
                false
            }
        }
    }

    /// Polls until `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(target: "qabot::polling", "Polling started");

        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => break,
                result = self.poll_once() => result,
            };

            if let Err(e) = result {
                tracing::warn!(
                    target: "qabot::polling",
                    "Fetching updates failed, retrying in {:?}: {}",
                    self.error_backoff,
                    e
                );
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(self.error_backoff) => {}
                }
            }
        }

        tracing::info!(target: "qabot::polling", "Polling stopped");
    }
}
