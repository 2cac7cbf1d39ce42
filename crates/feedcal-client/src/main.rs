//! feedcal CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use feedcal_client::cli::{Cli, Command, ConfigAction};
use feedcal_client::commands;
use feedcal_client::config::ClientConfig;
use feedcal_client::error::ClientResult;
use feedcal_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else if matches!(cli.command, Command::Watch { .. }) {
        TracingConfig::watcher()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli, &config, &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &ClientConfig, config_path: &std::path::Path) -> ClientResult<()> {
    let relay_url = cli.relay_url.as_deref();
    match cli.command {
        Command::Fetch {
            file: Some(file), ..
        } => commands::fetch::from_file(&file, cli.json).await,
        Command::Fetch { url, file: None } => {
            commands::fetch::from_relay(url, relay_url, cli.json, config).await
        }
        Command::Watch { url, interval } => {
            commands::watch::run(url, interval, relay_url, cli.json, config).await
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(config, config_path),
            ConfigAction::Path => commands::config::path(config_path),
        },
    }
}
