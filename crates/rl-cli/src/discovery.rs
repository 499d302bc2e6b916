// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Where the CLI looks for API credentials

use rl_client_launcher::{ProcessProbe, ProcessSource, SystemProcessSource, UX_PROCESS_NAME};
use rl_lcu_client::{CredentialSource, Credentials, LcuResult, LockfileSource, SourceChain};
use tracing::debug;

use crate::config::RunConfig;

/// Reads credentials from the command line of the running client UI
pub struct ProcessArgsSource<P = SystemProcessSource> {
    probe: ProcessProbe<P>,
}

impl ProcessArgsSource<SystemProcessSource> {
    pub fn new() -> Self {
        Self::with_probe(ProcessProbe::new(SystemProcessSource, UX_PROCESS_NAME))
    }
}

impl Default for ProcessArgsSource<SystemProcessSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ProcessSource> ProcessArgsSource<P> {
    pub fn with_probe(probe: ProcessProbe<P>) -> Self {
        Self { probe }
    }
}

impl<P: ProcessSource> CredentialSource for ProcessArgsSource<P> {
    fn discover(&self) -> LcuResult<Option<Credentials>> {
        // Helper processes (LeagueClientUxRender) match the name too but carry
        // no API arguments
        let credentials = self.probe.matches().find_map(|process| {
            let credentials = Credentials::from_command_line(process.cmd.as_slice());
            if credentials.is_none() {
                debug!(pid = process.pid, name = %process.name, "No API arguments on process");
            }
            credentials
        });
        Ok(credentials)
    }
}

/// Lockfile first (the explicit one, or the install defaults), then the UI
/// process arguments
pub fn credential_source(config: &RunConfig) -> SourceChain {
    let lockfiles = match &config.lockfile {
        Some(path) => LockfileSource::new(vec![path.clone()]),
        None => LockfileSource::default_locations(),
    };
    SourceChain::new().with(lockfiles).with(ProcessArgsSource::new())
}
