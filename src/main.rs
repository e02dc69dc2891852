use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use verify_bot::config::AppConfig;
use verify_bot::error::AppError;
use verify_bot::runner;

/// Triage the issue event a CI job was started for.
#[derive(Debug, Parser)]
#[command(name = "verify-bot", about = "Release verification issue triage bot")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Path to the `issues` event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let result = run(cli).await;

    if let Err(e) = &result {
        // Workflow command: marks the CI step as failed with this message
        if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
            println!("::error::{e}");
        }
    }

    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let event_path = cli.event_path.ok_or_else(|| {
        AppError::Config("No event file given (use --event-path or GITHUB_EVENT_PATH)".to_string())
    })?;

    let outcome = runner::run_once(&config, &event_path).await?;
    tracing::debug!(?outcome, "Run finished");

    Ok(())
}
