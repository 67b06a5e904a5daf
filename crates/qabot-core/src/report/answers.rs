//! Collected answers.

use super::field::ReportField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers submitted so far, keyed by field.
///
/// Values are stored verbatim; empty strings are valid answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportAnswers(BTreeMap<ReportField, String>);

impl ReportAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, replacing any previous one for the same field.
    pub fn insert(&mut self, field: ReportField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn get(&self, field: ReportField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first field in question order that has no answer yet.
    pub fn first_missing(&self) -> Option<ReportField> {
        ReportField::all().find(|field| !self.0.contains_key(field))
    }

    /// Converts into a `CompletedReport`.
    ///
    /// Fails with the first missing field when the answers are incomplete.
    pub fn into_completed(mut self) -> Result<CompletedReport, ReportField> {
        if let Some(missing) = self.first_missing() {
            return Err(missing);
        }

        let mut take = |field: ReportField| self.0.remove(&field).unwrap_or_default();
        Ok(CompletedReport {
            date_range: take(ReportField::DateRange),
            total: take(ReportField::Total),
            high: take(ReportField::High),
            medium: take(ReportField::Medium),
            low: take(ReportField::Low),
            reopened: take(ReportField::Reopened),
            prod: take(ReportField::Prod),
            risk_zones: take(ReportField::RiskZones),
            root_causes: take(ReportField::RootCauses),
            qa_suggestions: take(ReportField::QaSuggestions),
        })
    }
}

/// A report with every field answered.
///
/// Only obtainable through `ReportAnswers::into_completed`, so the formatter
/// never sees a partial report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedReport {
    pub date_range: String,
    pub total: String,
    pub high: String,
    pub medium: String,
    pub low: String,
    pub reopened: String,
    pub prod: String,
    pub risk_zones: String,
    pub root_causes: String,
    pub qa_suggestions: String,
}

impl CompletedReport {
    pub fn get(&self, field: ReportField) -> &str {
        match field {
            ReportField::DateRange => &self.date_range,
            ReportField::Total => &self.total,
            ReportField::High => &self.high,
            ReportField::Medium => &self.medium,
            ReportField::Low => &self.low,
            ReportField::Reopened => &self.reopened,
            ReportField::Prod => &self.prod,
            ReportField::RiskZones => &self.risk_zones,
            ReportField::RootCauses => &self.root_causes,
            ReportField::QaSuggestions => &self.qa_suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_answers() -> ReportAnswers {
        let mut answers = ReportAnswers::new();
        for field in ReportField::all() {
            answers.insert(field, format!("value-{}", field.key()));
        }
        answers
    }

    #[test]
    fn test_incomplete_answers_report_first_gap() {
        let mut answers = ReportAnswers::new();
        answers.insert(ReportField::DateRange, "14–18 Oct");
        answers.insert(ReportField::High, "3");

        assert_eq!(answers.first_missing(), Some(ReportField::Total));
        assert_eq!(answers.into_completed(), Err(ReportField::Total));
    }

    #[test]
    fn test_completed_report_maps_every_field() {
        let report = full_answers().into_completed().unwrap();
        for field in ReportField::all() {
            assert_eq!(report.get(field), format!("value-{}", field.key()));
        }
    }

    #[test]
    fn test_insert_overwrites() {
        let mut answers = ReportAnswers::new();
        answers.insert(ReportField::Low, "1");
        answers.insert(ReportField::Low, "");
        assert_eq!(answers.get(ReportField::Low), Some(""));
        assert_eq!(answers.len(), 1);
    }
}
