//! Report session model.

use crate::chat::ChatId;
use crate::report::{ReportAnswers, ReportField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A report being collected in one chat.
///
/// A chat with no stored session is idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSession {
    /// Correlates log lines belonging to one report
    pub report_id: Uuid,
    /// Conversation the answers come from
    pub chat_id: ChatId,
    /// Field whose answer is pending
    pub current_step: ReportField,
    /// Answers collected so far
    pub answers: ReportAnswers,
    pub started_at: DateTime<Utc>,
}

impl ReportSession {
    /// Starts a fresh session at the first question with no answers.
    pub fn start(chat_id: ChatId) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            chat_id,
            current_step: ReportField::first(),
            answers: ReportAnswers::new(),
            started_at: Utc::now(),
        }
    }

    /// The question the operator is expected to answer next.
    pub fn pending_prompt(&self) -> &'static str {
        self.current_step.prompt()
    }
}
