//! Report rendering.

use super::answers::CompletedReport;

const TITLE: &str = "📅 QA Quality Report —";
const STATS_HEADING: &str = "📊 Статистика";
const RISK_ZONES_HEADING: &str = "⚠️ Зоны риска";
const ROOT_CAUSES_HEADING: &str = "🧠 Основные причины";
const QA_SUGGESTIONS_HEADING: &str = "🧰 Предложения QA";

/// Renders a completed report into the fixed layout posted to the shared chat.
///
/// Pure: the same report always renders to the same bytes. Answers are
/// inserted verbatim.
pub fn render_report(report: &CompletedReport) -> String {
    let mut lines = vec![
        format!("{TITLE} {}", report.date_range),
        String::new(),
        STATS_HEADING.to_string(),
        format!("🪲 Всего багов: {}", report.total),
        format!(
            "🚨 High: {} | 🧩 Medium: {} | 🪶 Low: {}",
            report.high, report.medium, report.low
        ),
        format!("🔁 Повторные: {} | 🧨 Прод: {}", report.reopened, report.prod),
    ];

    for (heading, body) in [
        (RISK_ZONES_HEADING, &report.risk_zones),
        (ROOT_CAUSES_HEADING, &report.root_causes),
        (QA_SUGGESTIONS_HEADING, &report.qa_suggestions),
    ] {
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.push(body.clone());
    }

    lines.join("\n")
}
