use anyhow::{Context, Result};
use qabot_execution::telemetry::{LogFormat, init_tracing};

use crate::bootstrap;
use crate::commands::config_loader;

pub async fn run(json_logs: bool, no_dotenv: bool) -> Result<()> {
    let format = if json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format)?;

    // Must fail before any update is accepted
    let config = match config_loader(no_dotenv).load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(target: "qabot::config", "{}", e);
            return Err(e).context("Refusing to start");
        }
    };

    bootstrap::run_bot(config).await
}
