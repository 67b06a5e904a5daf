//! Report session transitions.

use super::model::ReportSession;
use crate::report::{CompletedReport, ReportStep};

/// Result of feeding one answer into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// More questions remain; `session` now waits on `step`.
    Prompt {
        session: ReportSession,
        step: ReportStep,
    },
    /// The last answer arrived and the report is ready.
    Completed {
        session: ReportSession,
        report: CompletedReport,
    },
}

/// Records `text` under the pending field and moves to the next one.
///
/// `session` is consumed: the caller persists whichever session the
/// transition hands back. On completion the same session is returned alongside
/// the report so the caller can keep it until dispatch succeeds.
pub fn advance(mut session: ReportSession, text: impl Into<String>) -> Transition {
    let answered = session.current_step;
    session.answers.insert(answered, text);

    match answered.next() {
        Some(next) => {
            session.current_step = next;
            Transition::Prompt {
                step: ReportStep {
                    field: next,
                    prompt: next.prompt(),
                },
                session,
            }
        }
        None => match session.answers.clone().into_completed() {
            Ok(report) => Transition::Completed { session, report },
            // Unreachable while every step answers its own field, but a gap
            // must send the operator back rather than emit a partial report.
            Err(missing) => {
                session.current_step = missing;
                Transition::Prompt {
                    step: ReportStep {
                        field: missing,
                        prompt: missing.prompt(),
                    },
                    session,
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatId;
    use crate::report::{REPORT_STEPS, ReportField};

    #[test]
    fn test_first_answer_moves_to_total() {
        let session = ReportSession::start(ChatId(1));
        match advance(session, "14–18 Oct") {
            Transition::Prompt { session, step } => {
                assert_eq!(step.field, ReportField::Total);
                assert_eq!(step.prompt, ReportField::Total.prompt());
                assert_eq!(session.current_step, ReportField::Total);
                assert_eq!(session.answers.get(ReportField::DateRange), Some("14–18 Oct"));
            }
            other => panic!("expected prompt, got {other:?}"),
        }
    }

    #[test]
    fn test_ten_answers_complete_the_report() {
        let mut session = ReportSession::start(ChatId(1));
        let mut completed = None;

        for (index, step) in REPORT_STEPS.iter().enumerate() {
            match advance(session.clone(), format!("answer {index}")) {
                Transition::Prompt { session: next, .. } => {
                    assert!(!step.field.is_last());
                    session = next;
                }
                Transition::Completed { report, .. } => {
                    assert!(step.field.is_last());
                    completed = Some(report);
                }
            }
        }

        let report = completed.expect("report should complete on the last answer");
        assert_eq!(report.date_range, "answer 0");
        assert_eq!(report.qa_suggestions, "answer 9");
    }

    #[test]
    fn test_empty_answer_is_accepted() {
        let session = ReportSession::start(ChatId(1));
        match advance(session, "") {
            Transition::Prompt { session, step } => {
                assert_eq!(step.field, ReportField::Total);
                assert_eq!(session.answers.get(ReportField::DateRange), Some(""));
            }
            other => panic!("expected a prompt: {other:?}"),
        }
    }

    #[test]
    fn test_gap_sends_operator_back() {
        let mut session = ReportSession::start(ChatId(1));
        session.current_step = ReportField::QaSuggestions;
        session.answers.insert(ReportField::DateRange, "week");

        match advance(session, "suggestions") {
            Transition::Prompt { step, session } => {
                assert_eq!(step.field, ReportField::Total);
                assert_eq!(session.current_step, ReportField::Total);
            }
            other => panic!("partial report must not complete: {other:?}"),
        }
    }
}
