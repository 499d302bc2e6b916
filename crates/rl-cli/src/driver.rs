// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Runs the requested operation once over a live connection

use rl_lcu_client::ControlConnection;
use rl_replay::{MetadataLookup, PollPolicy, ReplayError, ReplayStateMachine};
use tracing::{error, info, warn};

use crate::config::{RunConfig, RunMode};

/// Run the operation selected by `config`, then close the connection
///
/// Returns whether the operation succeeded. Check-only mode succeeds once
/// the client has answered the query, whatever the answer was.
pub async fn run_operation<C>(connection: &C, config: &RunConfig, policy: PollPolicy) -> bool
where
    C: ControlConnection + ?Sized,
{
    let machine = ReplayStateMachine::with_policy(connection, policy);

    let succeeded = match config.mode {
        RunMode::CheckOnly => check_only(&machine, config.game_id).await,
        RunMode::Watch => {
            let succeeded = machine.watch_replay(config.game_id).await;
            if succeeded {
                info!("Operation completed successfully.");
            } else {
                error!("Operation failed.");
            }
            succeeded
        }
    };

    if let Err(e) = connection.close().await {
        warn!(error = %e, "Failed to close the client API connection");
    }
    info!("Exiting.");
    succeeded
}

async fn check_only<C>(machine: &ReplayStateMachine<'_, C>, game_id: u64) -> bool
where
    C: ControlConnection + ?Sized,
{
    match machine.check_metadata(game_id).await {
        Ok(MetadataLookup::Found(metadata)) => {
            info!("Metadata for game {}:", game_id);
            info!("{}", metadata.to_pretty_json());
            true
        }
        Ok(MetadataLookup::Missing { status, detail }) => {
            let err = ReplayError::RequestFailed {
                stage: rl_replay::RequestStage::Metadata,
                status,
                detail,
            };
            warn!("{}", err);
            true
        }
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}
