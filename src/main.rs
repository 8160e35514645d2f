//! hostinger-ddns - one-shot dynamic DNS updater for the Hostinger DNS API
//!
//! Architecture:
//! - Resolves the host's public IPv4 via an IP-echo endpoint (ifconfig.me)
//! - Compares against the last published IP cached in a one-line state file
//! - On change, replaces the zone's A record through the Hostinger API
//! - Meant to be invoked periodically by cron or a systemd timer
//! - Uses reqwest for HTTP (rustls)

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use hostinger_ddns::config::Config;
use hostinger_ddns::constants::ENV_API_TOKEN;
use hostinger_ddns::hostinger::HostingerClient;
use hostinger_ddns::resolver::HttpIpResolver;
use hostinger_ddns::state::StateStore;
use hostinger_ddns::updater::Updater;

/// Application version
const VERSION: &str = "1.0.0";

//==============================================================================
// Main
//==============================================================================

#[derive(Debug, Parser)]
#[command(name = "hostinger-ddns")]
#[command(version = VERSION)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Resolve and compare but do not send the update or touch state
    #[arg(long)]
    dry_run: bool,
}

/// Initializes tracing with the configured log file as the writer.
///
/// Best-effort: if the log file cannot be opened, logging falls back to
/// stderr. Logging problems never abort the update flow.
fn init_logging(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if config.verbose { "debug" } else { "info" }));

    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&config.log_file)
    {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            warn!(
                "Could not open log file {}: {}; logging to stderr",
                config.log_file.display(),
                e
            );
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = init_logging(&config);

    if config.api_token.is_empty() {
        warn!(
            "{} is not set; a pending update will fail until it is",
            ENV_API_TOKEN
        );
    }

    let resolver = match HttpIpResolver::new(config.timeout) {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("IP resolver setup failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    let client = match HostingerClient::new(config.api_token.as_str(), config.timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Hostinger client setup failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    let store = StateStore::new(config.state_file.clone());

    let updater = Updater::new(
        Arc::new(config),
        Arc::new(resolver),
        Arc::new(client),
        store,
    )
    .with_dry_run(args.dry_run);

    if updater.run().await.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
