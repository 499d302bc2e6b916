// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Making sure a client is running before waiting for its API

use std::time::Duration;

use rl_client_launcher::{ClientLauncher, ProcessProbe, ProcessSource, Spawner};
use tracing::{info, warn};

/// What the startup step found or did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    AlreadyRunning,
    Launched,
    /// Not running and not started; the user has to start it
    Unavailable,
}

/// Probe for the client and launch it when it is missing
///
/// `launcher` is `None` when launching is disabled. After a launch this
/// waits `startup_delay` to give the client time to come up. An
/// unavailable client is not an error: the caller still waits for the API.
pub async fn ensure_client<P, S>(
    probe: &ProcessProbe<P>,
    launcher: Option<&ClientLauncher<S>>,
    startup_delay: Duration,
) -> ClientStatus
where
    P: ProcessSource,
    S: Spawner,
{
    info!("Checking if League client is already running...");
    if probe.is_running() {
        info!("League client is already running.");
        return ClientStatus::AlreadyRunning;
    }

    info!("League client not detected.");
    let launched = match launcher {
        Some(launcher) => launcher.launch(),
        None => {
            info!("Launching is disabled.");
            false
        }
    };

    if launched {
        info!("Waiting for League client to initialize...");
        tokio::time::sleep(startup_delay).await;
        ClientStatus::Launched
    } else {
        warn!("Please start the League client manually before running this script.");
        ClientStatus::Unavailable
    }
}
