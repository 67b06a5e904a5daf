//! Application layer for qabot.
//!
//! Coordinates the session store, the transition function and the transport
//! to run the guided report conversation.

pub mod messages;
pub mod report_usecase;

pub use report_usecase::{HandleOutcome, ReportUseCase};
