use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use qabot_application::ReportUseCase;
use qabot_core::config::BotConfig;
use qabot_execution::{KeepAlive, LivenessServer, UpdatePoller};
use qabot_infrastructure::InMemorySessionStore;
use qabot_interaction::TelegramApiClient;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Wires the components together and runs until Ctrl-C.
///
/// The liveness responder and keep-alive pinger run as separate tasks; the
/// polling loop runs on the current task.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let mut background = JoinSet::new();
    let http = reqwest::Client::new();

    let liveness_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.liveness_port));
    let liveness = LivenessServer::bind(liveness_addr)
        .await
        .with_context(|| format!("Failed to bind liveness endpoint on {liveness_addr}"))?;
    background.spawn(liveness.serve(cancel.clone()));

    match KeepAlive::from_settings(&config.keep_alive) {
        Some(keep_alive) => {
            background.spawn(keep_alive.with_client(http.clone()).run(cancel.clone()));
        }
        None => tracing::info!(target: "qabot::keep_alive", "SELF_PING_URL not set, keep-alive disabled"),
    }

    let client = Arc::new(
        TelegramApiClient::new(config.bot_token.clone())
            .with_http_client(http)
            .with_base_url(config.api_url.clone())
            .with_poll_timeout(Duration::from_secs(config.poll_timeout_secs)),
    );
    let usecase = Arc::new(ReportUseCase::new(
        Arc::new(InMemorySessionStore::new()),
        client.clone(),
        config.authorized_chat_id,
        config.report_chat_id,
    ));
    let poller = UpdatePoller::new(client, usecase);

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        tracing::info!("Interrupt received, shutting down");
        signal_cancel.cancel();
    });

    tracing::info!(
        authorized_chat_id = config.authorized_chat_id.0,
        report_chat_id = config.report_chat_id.0,
        "🤖 QA Quality Bot started"
    );
    poller.run(cancel.clone()).await;

    cancel.cancel();
    while background.join_next().await.is_some() {}

    Ok(())
}
