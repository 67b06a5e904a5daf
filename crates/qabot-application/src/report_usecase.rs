//! Report use case implementation.
//!
//! This module provides the `ReportUseCase` which routes each inbound message
//! through the authorization guard and the session transition function, and
//! performs the outbound sends each transition calls for.

use crate::messages::{GREETING, REPORT_SENT, UNAUTHORIZED};
use chrono::Utc;
use qabot_core::report::{ReportField, render_report};
use qabot_core::session::{ReportSession, SessionStore, Transition, advance};
use qabot_core::{BotCommand, ChatId, IncomingMessage, Result, UserInput};
use qabot_interaction::MessageSender;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What handling one message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// `/start` answered with the greeting
    Greeted,
    /// `/report` from a chat other than the operator's
    Rejected,
    /// A new session began; `discarded_previous` is true if one was replaced
    Started { discarded_previous: bool },
    /// An answer was recorded and the next question sent
    Prompted(ReportField),
    /// The final answer arrived and the report went to the shared chat
    ReportDispatched,
    /// Nothing to do (idle text, non-text message)
    Ignored,
}

/// Use case driving the guided report conversation.
///
/// # Responsibilities
///
/// - Answering `/start` with a greeting
/// - Guarding `/report` so only the authorized chat can start a session
/// - Recording answers and sending the next question
/// - Rendering and dispatching the finished report, then clearing the session
///
/// # Thread Safety
///
/// Message handling is serialized by an internal mutex, so one message's
/// transition is never interleaved with another's.
pub struct ReportUseCase {
    /// Store for in-progress sessions
    store: Arc<dyn SessionStore>,
    /// Outbound transport
    sender: Arc<dyn MessageSender>,
    /// The only chat allowed to start a report
    authorized_chat_id: ChatId,
    /// Chat receiving completed reports
    report_chat_id: ChatId,
    turn: Mutex<()>,
}

impl ReportUseCase {
    /// Creates a new `ReportUseCase` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - Store holding in-progress sessions
    /// * `sender` - Transport used for every outbound message
    /// * `authorized_chat_id` - The operator's chat
    /// * `report_chat_id` - The shared chat receiving reports
    pub fn new(
        store: Arc<dyn SessionStore>,
        sender: Arc<dyn MessageSender>,
        authorized_chat_id: ChatId,
        report_chat_id: ChatId,
    ) -> Self {
        Self {
            store,
            sender,
            authorized_chat_id,
            report_chat_id,
            turn: Mutex::new(()),
        }
    }

    /// Handles one inbound message.
    ///
    /// # Errors
    ///
    /// Returns transport or store errors. A failure leaves the stored session
    /// as it was before the message, except when the report already reached
    /// the shared chat and only the confirmation failed.
    pub async fn handle_message(&self, message: &IncomingMessage) -> Result<HandleOutcome> {
        let Some(text) = message.text.as_deref() else {
            tracing::debug!(
                target: "qabot::session",
                chat_id = message.chat_id.0,
                update_id = message.update_id,
                "Ignoring message without text"
            );
            return Ok(HandleOutcome::Ignored);
        };

        let _turn = self.turn.lock().await;

        match UserInput::classify(text) {
            UserInput::Command(BotCommand::Start) => {
                self.sender.send_message(message.chat_id, GREETING).await?;
                Ok(HandleOutcome::Greeted)
            }
            UserInput::Command(BotCommand::Report) => self.start_report(message).await,
            UserInput::Text(answer) => self.record_answer(message.chat_id, answer).await,
        }
    }

    async fn start_report(&self, message: &IncomingMessage) -> Result<HandleOutcome> {
        let chat_id = message.chat_id;
        if chat_id != self.authorized_chat_id {
            tracing::warn!(
                target: "qabot::auth",
                chat_id = chat_id.0,
                sender_id = ?message.sender_id,
                "Unauthorized /report attempt"
            );
            self.sender.send_message(chat_id, UNAUTHORIZED).await?;
            return Ok(HandleOutcome::Rejected);
        }

        let previous = self.store.get(chat_id).await?;
        if let Some(previous) = &previous {
            tracing::info!(
                target: "qabot::session",
                report_id = %previous.report_id,
                answered = previous.answers.len(),
                "Discarding unfinished report"
            );
        }

        let session = ReportSession::start(chat_id);
        let report_id = session.report_id;
        self.sender.send_message(chat_id, session.pending_prompt()).await?;
        self.store.save(session).await?;
        tracing::info!(
            target: "qabot::session",
            %report_id,
            chat_id = chat_id.0,
            "Report session started"
        );

        Ok(HandleOutcome::Started {
            discarded_previous: previous.is_some(),
        })
    }

    async fn record_answer(&self, chat_id: ChatId, answer: String) -> Result<HandleOutcome> {
        let Some(session) = self.store.get(chat_id).await? else {
            tracing::debug!(target: "qabot::session", chat_id = chat_id.0, "Ignoring text outside a report");
            return Ok(HandleOutcome::Ignored);
        };

        let report_id = session.report_id;
        let answered = session.current_step;

        match advance(session, answer) {
            Transition::Prompt { session, step } => {
                self.sender.send_message(chat_id, step.prompt).await?;
                self.store.save(session).await?;
                tracing::debug!(
                    target: "qabot::session",
                    %report_id,
                    field = %answered,
                    "Answer recorded"
                );
                Ok(HandleOutcome::Prompted(step.field))
            }
            Transition::Completed { session, report } => {
                let text = render_report(&report);
                self.sender.send_message(self.report_chat_id, &text).await?;

                let elapsed = Utc::now() - session.started_at;
                tracing::info!(
                    target: "qabot::report",
                    report_id = %session.report_id,
                    report_chat_id = self.report_chat_id.0,
                    elapsed_secs = elapsed.num_seconds(),
                    "Report dispatched"
                );

                self.store.remove(chat_id).await?;
                self.sender.send_message(chat_id, REPORT_SENT).await?;
                Ok(HandleOutcome::ReportDispatched)
            }
        }
    }
}
