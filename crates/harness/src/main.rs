use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use harness::{Harness, HarnessConfig, LogFormat};

/// Run the Verbex conformance suite against a live server.
#[derive(Parser, Debug)]
#[command(name = "verbex-harness")]
#[command(version)]
#[command(after_help = "Example:\n  verbex-harness http://localhost:8080 verbexadmin")]
struct Cli {
    /// The Verbex server endpoint (e.g., http://localhost:8080)
    endpoint: String,

    /// The bearer token for authentication
    access_key: String,
}

fn init_tracing(settings: &HarnessConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    match settings.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let settings = HarnessConfig::load().context("failed to load harness configuration")?;
    init_tracing(&settings);

    let mut harness = Harness::new(cli.endpoint, cli.access_key, settings, io::stdout());
    let report = harness.run().await?;

    Ok(ExitCode::from(report.exit_code()))
}
