//! Report domain module.
//!
//! # Module Structure
//!
//! - `field`: The ordered field/prompt table (`ReportField`, `REPORT_STEPS`)
//! - `answers`: Collected answers and the completed report (`ReportAnswers`, `CompletedReport`)
//! - `formatter`: Pure rendering of a completed report

mod answers;
mod field;
mod formatter;

pub use answers::{CompletedReport, ReportAnswers};
pub use field::{REPORT_STEPS, ReportField, ReportStep};
pub use formatter::render_report;
