// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::PathBuf;
use std::time::Duration;

use rl_logging::CliLoggingArgs;

pub mod config;
pub mod discovery;
pub mod driver;
pub mod startup;

pub use clap::Parser;
pub use config::{RunConfig, RunMode};

/// Name used for log files and the default log filter
pub const COMPONENT: &str = "launch-replay";

#[derive(clap::Parser, Debug)]
#[command(
    name = "launch-replay",
    about = "Launch a League of Legends replay by Game ID.",
    version
)]
pub struct Cli {
    /// The Game ID of the replay to watch.
    pub game_id: u64,

    /// Only check metadata without downloading
    #[arg(long)]
    pub check_only: bool,

    /// Never try to start the client; wait for one to appear
    #[arg(long)]
    pub no_launch: bool,

    /// Seconds to wait after launching the client
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    pub startup_delay: u64,

    /// Give up waiting for the client API after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub connect_timeout: Option<u64>,

    /// Read the API credentials from this lockfile
    #[arg(long, value_name = "PATH")]
    pub lockfile: Option<PathBuf>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            game_id: self.game_id,
            mode: if self.check_only {
                RunMode::CheckOnly
            } else {
                RunMode::Watch
            },
            launch_client: !self.no_launch,
            startup_delay: Duration::from_secs(self.startup_delay),
            connect_timeout: self.connect_timeout.map(Duration::from_secs),
            lockfile: self.lockfile.clone(),
        }
    }
}
