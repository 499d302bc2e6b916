// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Settings for one run, gathered from the command line

use std::path::PathBuf;
use std::time::Duration;

use rl_lcu_client::ConnectorConfig;
use rl_replay::GameId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Download if needed, then play
    Watch,
    /// One metadata query, no side effects
    CheckOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunConfig {
    pub game_id: GameId,
    pub mode: RunMode,
    pub launch_client: bool,
    pub startup_delay: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockfile: Option<PathBuf>,
}

impl RunConfig {
    pub fn connector_config(&self) -> ConnectorConfig {
        ConnectorConfig {
            timeout: self.connect_timeout,
            ..ConnectorConfig::default()
        }
    }
}
