//! Fixed replies sent to the operator.

pub const GREETING: &str = "👋 Привет! Я QA Quality Bot.\nНапиши /report чтобы создать новый QA-отчёт.";
pub const UNAUTHORIZED: &str = "⚠️ Этот режим доступен только в личном чате с ботом.";
pub const REPORT_SENT: &str = "🚀 Отчёт успешно сформирован и отправлен в общий чат отдела!";
