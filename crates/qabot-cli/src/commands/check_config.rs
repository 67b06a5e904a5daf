use anyhow::{Context, Result};

use crate::commands::config_loader;

pub fn check(no_dotenv: bool) -> Result<()> {
    let config = config_loader(no_dotenv)
        .load()
        .context("Configuration is invalid")?;

    println!("✅ Configuration is valid");
    println!("  - BOT_TOKEN: set");
    println!("  - Bot API: {}", config.api_url);
    println!("  - Authorized chat: {}", config.authorized_chat_id);
    println!("  - Report chat: {}", config.report_chat_id);
    println!("  - Liveness port: {}", config.liveness_port);
    println!("  - Long-poll timeout: {}s", config.poll_timeout_secs);
    match &config.keep_alive.url {
        Some(url) => println!(
            "  - Keep-alive: {} every {}s",
            url, config.keep_alive.interval_secs
        ),
        None => println!("  - Keep-alive: disabled"),
    }

    Ok(())
}
