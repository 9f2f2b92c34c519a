//! Availability monitor binary

use availability_monitor::{Cli, LogFormat, load_endpoints, run};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Exits with a usage message when the endpoint file argument is missing
    let cli = Cli::parse();

    match cli.log_format {
        LogFormat::Text => common::logging::init(&cli.log_level)?,
        LogFormat::Json => common::logging::init_json(&cli.log_level)?,
    }

    let endpoints = load_endpoints(&cli.config).inspect_err(|e| tracing::error!("{:#}", e))?;

    let shutdown = Arc::new(Notify::new());
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current cycle");
            signal.notify_one();
        }
    });

    run(cli.to_settings(), endpoints, shutdown).await
}
