// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The replay flow: metadata, download, poll, watch
//!
//! ```text
//! metadata ── watch ─────────────────────────────┐
//!    │ not found / checking / downloading         ▼
//!    └─▶ download trigger ─▶ poll until watch ─▶ watch trigger
//! ```
//!
//! Any other state, a non-ok trigger or poll response, or running out of
//! poll attempts ends the flow with a [`ReplayError`].

use std::error::Error as _;
use std::time::Duration;

use rl_lcu_client::{ApiResponse, ControlConnection};
use tracing::{debug, error, info, warn};

use crate::endpoints;
use crate::error::{ReplayError, RequestStage};
use crate::metadata::{GameId, MetadataLookup, ReplayMetadata};

/// How often and how long to poll while the client downloads a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    /// 120 polls half a second apart
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_attempts: 120,
        }
    }
}

/// Drives one replay through the control API
pub struct ReplayStateMachine<'c, C: ControlConnection + ?Sized> {
    connection: &'c C,
    policy: PollPolicy,
}

impl<'c, C: ControlConnection + ?Sized> ReplayStateMachine<'c, C> {
    pub fn new(connection: &'c C) -> Self {
        Self::with_policy(connection, PollPolicy::default())
    }

    pub fn with_policy(connection: &'c C, policy: PollPolicy) -> Self {
        Self { connection, policy }
    }

    /// Make the replay playable and start it
    ///
    /// Every failure is logged here and reported as `false`; nothing is
    /// propagated to the caller.
    pub async fn watch_replay(&self, game_id: GameId) -> bool {
        match self.try_watch_replay(game_id).await {
            Ok(()) => true,
            Err(e) => {
                report_failure(&e);
                false
            }
        }
    }

    /// Same flow as [`Self::watch_replay`], returning the failure reason
    pub async fn try_watch_replay(&self, game_id: GameId) -> Result<(), ReplayError> {
        info!("Checking metadata for game ID: {}", game_id);
        let response = self.connection.get(&endpoints::metadata_path(game_id)).await?;

        if response.is_ok() {
            let metadata: ReplayMetadata = response.json()?;
            info!("Initial metadata: {}", metadata.to_pretty_json());

            if metadata.state.is_ready() {
                info!("Replay is already downloaded and ready to watch.");
            } else if metadata.state.is_in_progress() {
                info!(state = %metadata.state, "Replay preparation already in progress, requesting download...");
                self.download_and_wait(game_id).await?;
            } else {
                return Err(ReplayError::unexpected_state(metadata));
            }
        } else {
            info!(
                "Metadata not available (HTTP {}), initiating download...",
                response.status
            );
            self.download_and_wait(game_id).await?;
        }

        info!("Launching replay for game ID: {}", game_id);
        let response = self
            .connection
            .post(&endpoints::watch_path(game_id), &endpoints::context_data_body())
            .await?;
        ensure_ok(&response, RequestStage::Watch)?;

        info!("Replay launched successfully!");
        Ok(())
    }

    /// Trigger the download and poll until the client reports `watch`
    pub async fn download_and_wait(&self, game_id: GameId) -> Result<(), ReplayError> {
        info!("Requesting download for game ID: {}", game_id);
        let response = self
            .connection
            .post(&endpoints::download_path(game_id), &endpoints::context_data_body())
            .await?;
        ensure_ok(&response, RequestStage::Download)?;

        info!("Waiting for download to complete...");
        let path = endpoints::metadata_path(game_id);
        for attempt in 1..=self.policy.max_attempts {
            let response = self.connection.get(&path).await?;
            ensure_ok(&response, RequestStage::Poll)?;

            let metadata: ReplayMetadata = response.json()?;
            info!(attempt, "  Current state: {}", metadata.state);

            if metadata.state.is_ready() {
                info!("Download complete.");
                return Ok(());
            }
            if !metadata.state.is_in_progress() {
                return Err(ReplayError::unexpected_state(metadata));
            }
            tokio::time::sleep(self.policy.interval).await;
        }

        Err(ReplayError::Timeout {
            attempts: self.policy.max_attempts,
        })
    }

    /// One metadata query, nothing else
    pub async fn check_metadata(&self, game_id: GameId) -> Result<MetadataLookup, ReplayError> {
        let response = self.connection.get(&endpoints::metadata_path(game_id)).await?;
        if response.is_ok() {
            Ok(MetadataLookup::Found(response.json()?))
        } else {
            debug!(status = response.status, "Metadata query was not ok");
            Ok(MetadataLookup::Missing {
                status: response.status,
                detail: response.json_value(),
            })
        }
    }
}

fn ensure_ok(response: &ApiResponse, stage: RequestStage) -> Result<(), ReplayError> {
    if response.is_ok() {
        return Ok(());
    }
    Err(ReplayError::RequestFailed {
        stage,
        status: response.status,
        detail: response.json_value(),
    })
}

fn report_failure(err: &ReplayError) {
    match err {
        ReplayError::UnexpectedState {
            state,
            error_code,
            error_string,
            metadata,
        } => {
            warn!("Unexpected replay state: {}", state);
            warn!("Full metadata: {}", metadata.to_pretty_json());
            if let Some(code) = error_code {
                warn!("Error code: {}", code);
            }
            if let Some(text) = error_string {
                warn!("Error string: {}", text);
            }
        }
        ReplayError::RequestFailed { .. } | ReplayError::Timeout { .. } => {
            error!("{}", err);
        }
        ReplayError::Decode(_) | ReplayError::Connection(_) => {
            error!("An error occurred: {}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_caps_the_wait_at_a_minute() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_millis(500));
        assert_eq!(policy.max_attempts, 120);
        assert_eq!(policy.interval * policy.max_attempts, Duration::from_secs(60));
    }
}
