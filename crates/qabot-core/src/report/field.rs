//! The fixed question sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One named slot in the report.
///
/// Variant order is the order in which questions are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportField {
    DateRange,
    Total,
    High,
    Medium,
    Low,
    Reopened,
    Prod,
    RiskZones,
    RootCauses,
    QaSuggestions,
}

/// A single entry of the question table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStep {
    pub field: ReportField,
    pub prompt: &'static str,
}

/// The question table, walked front to back by the session machine.
pub const REPORT_STEPS: [ReportStep; 10] = [
    ReportStep {
        field: ReportField::DateRange,
        prompt: "📅 Укажи диапазон дат отчёта (например: 14–18 октября):",
    },
    ReportStep {
        field: ReportField::Total,
        prompt: "🪲 Сколько всего багов?",
    },
    ReportStep {
        field: ReportField::High,
        prompt: "🚨 Сколько High?",
    },
    ReportStep {
        field: ReportField::Medium,
        prompt: "🧩 Сколько Medium?",
    },
    ReportStep {
        field: ReportField::Low,
        prompt: "🪶 Сколько Low?",
    },
    ReportStep {
        field: ReportField::Reopened,
        prompt: "🔁 Сколько повторных?",
    },
    ReportStep {
        field: ReportField::Prod,
        prompt: "🧨 Сколько найдено на проде?",
    },
    ReportStep {
        field: ReportField::RiskZones,
        prompt: "⚠️ Опиши зоны риска:",
    },
    ReportStep {
        field: ReportField::RootCauses,
        prompt: "🧠 Основные причины?",
    },
    ReportStep {
        field: ReportField::QaSuggestions,
        prompt: "🧰 Предложения QA:",
    },
];

impl ReportField {
    /// The first question of every session.
    pub fn first() -> Self {
        REPORT_STEPS[0].field
    }

    /// Stable snake_case name, as used in logs and serialized answers.
    pub const fn key(self) -> &'static str {
        match self {
            Self::DateRange => "date_range",
            Self::Total => "total",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Reopened => "reopened",
            Self::Prod => "prod",
            Self::RiskZones => "risk_zones",
            Self::RootCauses => "root_causes",
            Self::QaSuggestions => "qa_suggestions",
        }
    }

    /// Zero-based index into `REPORT_STEPS`.
    pub const fn position(self) -> usize {
        self as usize
    }

    pub fn prompt(self) -> &'static str {
        REPORT_STEPS[self.position()].prompt
    }

    /// The field asked after this one, `None` for the last field.
    pub fn next(self) -> Option<Self> {
        REPORT_STEPS.get(self.position() + 1).map(|step| step.field)
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub fn all() -> impl Iterator<Item = Self> {
        REPORT_STEPS.iter().map(|step| step.field)
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
