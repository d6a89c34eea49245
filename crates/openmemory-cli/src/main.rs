//! `openmemory`: command-line client for an OpenMemory canister.

use clap::Parser;
use openmemory_cli::{failure_message, run, Cli, CliError};
use openmemory_client::MemoryClient;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = MemoryClient::new(&cli.base_url, cli.token.clone());
    tracing::debug!(base_url = %client.config().base_url(), "client configured");

    let mut stdout = std::io::stdout().lock();
    match run(cli.command, &client, &mut stdout).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::Client(e)) => {
            eprintln!("{}", failure_message(&e));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
