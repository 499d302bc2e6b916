// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Process detection

use sysinfo::{ProcessStatus, System};
use thiserror::Error;
use tracing::{debug, trace};

/// Executable name of the client's launcher process
#[cfg(target_os = "windows")]
pub const CLIENT_PROCESS_NAME: &str = "LeagueClient.exe";
#[cfg(not(target_os = "windows"))]
pub const CLIENT_PROCESS_NAME: &str = "LeagueClient";

/// Executable name of the UI process, which carries the API credentials on
/// its command line
pub const UX_PROCESS_NAME: &str = "LeagueClientUx";

/// One process as seen at snapshot time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub cmd: Vec<String>,
}

/// A process that could not be inspected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("process {pid} is not accessible")]
    Inaccessible { pid: u32 },

    #[error("process {pid} exited during inspection")]
    Vanished { pid: u32 },
}

/// Something that can enumerate processes
///
/// Enumeration is a fallible iterator: one entry failing does not end the
/// scan.
pub trait ProcessSource: Send + Sync {
    fn processes(&self) -> Box<dyn Iterator<Item = Result<ProcessEntry, ProbeError>> + '_>;
}

/// [`ProcessSource`] backed by an OS process snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessSource;

impl ProcessSource for SystemProcessSource {
    fn processes(&self) -> Box<dyn Iterator<Item = Result<ProcessEntry, ProbeError>> + '_> {
        let mut system = System::new();
        system.refresh_processes();

        let entries: Vec<_> = system
            .processes()
            .iter()
            .map(|(pid, process)| {
                let pid = pid.as_u32();
                if matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead) {
                    return Err(ProbeError::Vanished { pid });
                }
                let name = process.name();
                if name.is_empty() {
                    return Err(ProbeError::Inaccessible { pid });
                }
                Ok(ProcessEntry {
                    pid,
                    name: name.to_string(),
                    cmd: process.cmd().to_vec(),
                })
            })
            .collect();

        Box::new(entries.into_iter())
    }
}

/// Looks for a process whose name contains `target`
pub struct ProcessProbe<S = SystemProcessSource> {
    source: S,
    target: String,
}

impl ProcessProbe<SystemProcessSource> {
    /// Probe for the client on this machine
    pub fn client() -> Self {
        Self::new(SystemProcessSource, CLIENT_PROCESS_NAME)
    }
}

impl<S: ProcessSource> ProcessProbe<S> {
    pub fn new(source: S, target: impl Into<String>) -> Self {
        Self {
            source,
            target: target.into(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.find().is_some()
    }

    /// First matching process
    pub fn find(&self) -> Option<ProcessEntry> {
        self.matches().next()
    }

    /// Every matching process in snapshot order, skipping entries that fail
    /// inspection
    pub fn matches(&self) -> impl Iterator<Item = ProcessEntry> + '_ {
        self.source.processes().filter_map(move |entry| match entry {
            Ok(process) if process.name.contains(&self.target) => {
                debug!(pid = process.pid, name = %process.name, "Found matching process");
                Some(process)
            }
            Ok(_) => None,
            Err(e) => {
                trace!(error = %e, "Skipping process");
                None
            }
        })
    }
}
