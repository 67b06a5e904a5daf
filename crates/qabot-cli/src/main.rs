use anyhow::Result;
use clap::{Parser, Subcommand};

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "qabot")]
#[command(about = "QABOT - guided weekly QA quality report bot for Telegram", long_about = None)]
struct Cli {
    /// Ignore any `.env` file and read only the process environment
    #[arg(long, global = true)]
    no_dotenv: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot until interrupted (default)
    Run {
        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },
    /// Validate the environment configuration and print the resolved values
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run { json_logs: false }) {
        Commands::Run { json_logs } => commands::run::run(json_logs, cli.no_dotenv).await?,
        Commands::CheckConfig => commands::check_config::check(cli.no_dotenv)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["qabot"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_dotenv);
    }

    #[test]
    fn test_no_dotenv_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["qabot", "check-config", "--no-dotenv"]).unwrap();
        assert!(cli.no_dotenv);
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }

    #[test]
    fn test_run_with_json_logs() {
        let cli = Cli::try_parse_from(["qabot", "run", "--json-logs"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Run { json_logs: true })));
    }
}
