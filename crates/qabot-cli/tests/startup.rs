use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Fresh working directory, optionally holding a `.env`.
fn workdir(name: &str, dotenv: Option<&str>) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("qabot-startup-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("test dir should be creatable");
    if let Some(contents) = dotenv {
        std::fs::write(dir.join(".env"), contents).expect(".env should be writable");
    }
    dir
}

fn qabot(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qabot"))
        .args(args)
        .current_dir(dir)
        .env_remove("BOT_TOKEN")
        .env_remove("QABOT_REPORT_CHAT_ID")
        .env_remove("SELF_PING_URL")
        .env("RUST_LOG", "error")
        .output()
        .expect("qabot binary should launch")
}

#[test]
fn test_run_without_token_exits_non_zero() {
    let dir = workdir("run-no-token", None);
    let output = qabot(&dir, &["run", "--no-dotenv"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BOT_TOKEN"), "stderr was: {stderr}");
}

#[test]
fn test_check_config_without_token_exits_non_zero() {
    let dir = workdir("check-no-token", None);
    let output = qabot(&dir, &["check-config", "--no-dotenv"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
}

#[test]
fn test_check_config_prints_resolved_values() {
    let dir = workdir("check-values", None);
    let output = Command::new(env!("CARGO_BIN_EXE_qabot"))
        .args(["check-config", "--no-dotenv"])
        .current_dir(&dir)
        .env("BOT_TOKEN", "123:not-a-real-token")
        .env("QABOT_REPORT_CHAT_ID", "-100777")
        .env_remove("SELF_PING_URL")
        .output()
        .expect("qabot binary should launch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Report chat: -100777"));
    assert!(stdout.contains("Keep-alive: disabled"));
    assert!(!stdout.contains("not-a-real-token"));
}

#[test]
fn test_dotenv_supplies_token() {
    let dir = workdir("dotenv-token", Some("BOT_TOKEN=123:from-dotenv\nQABOT_REPORT_CHAT_ID=-100888\n"));
    let output = qabot(&dir, &["check-config"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Report chat: -100888"));
}

#[test]
fn test_no_dotenv_ignores_dotenv_file() {
    let dir = workdir("dotenv-ignored", Some("BOT_TOKEN=123:from-dotenv\n"));
    let output = qabot(&dir, &["check-config", "--no-dotenv"]);

    assert!(!output.status.success());
}
