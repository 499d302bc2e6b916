// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::process::ExitCode;

use anyhow::Result;
use rl_cli::{COMPONENT, Cli, Parser, RunConfig, discovery, driver, startup};
use rl_client_launcher::{ClientLauncher, ProcessProbe};
use rl_lcu_client::Connector;
use rl_replay::PollPolicy;
use tracing::{debug, error, info};

/// Conventional exit status after SIGINT
const INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = cli.logging.clone().init(COMPONENT) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let config = cli.run_config();
    debug!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "Run configuration"
    );

    tokio::select! {
        result = run(&config) => match result {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                error!("An error occurred during script execution: {:#}", e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted by user.");
            ExitCode::from(INTERRUPTED)
        }
    }
}

async fn run(config: &RunConfig) -> Result<bool> {
    let probe = ProcessProbe::client();
    let launcher = config.launch_client.then(ClientLauncher::new);
    startup::ensure_client(&probe, launcher.as_ref(), config.startup_delay).await;

    info!("Waiting for League client connection...");
    let connector = Connector::new(discovery::credential_source(config), config.connector_config());
    let connection = connector.connect().await?;

    Ok(driver::run_operation(&connection, config, PollPolicy::default()).await)
}
