//! Tracing subscriber setup for the bot binary.

use qabot_core::{QaBotError, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "info";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info`.
///
/// # Errors
///
/// Fails if `RUST_LOG` does not parse or a global subscriber is already set.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| QaBotError::config(format!("Invalid RUST_LOG '{directives}': {e}")))?,
        _ => EnvFilter::new(DEFAULT_FILTER),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_current_span(false)).try_init(),
    };

    installed.map_err(|e| QaBotError::internal(format!("Failed to install tracing subscriber: {e}")))
}
