// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Launching the client
//!
//! Where the client lives depends on the platform: Windows installs are
//! looked up in a few well-known directories, macOS opens the app bundle
//! and everything else is unsupported. [`LaunchPlan::for_platform`] makes
//! that decision without side effects; [`ClientLauncher`] carries it out.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{error, info};

/// App bundle opened on macOS
pub const MACOS_APP_BUNDLE: &str = "/Applications/League of Legends.app";

const WINDOWS_INSTALL_PATHS: &[&str] = &[
    r"C:\Riot Games\League of Legends\LeagueClient.exe",
    r"D:\Riot Games\League of Legends\LeagueClient.exe",
    r"C:\Program Files\Riot Games\League of Legends\LeagueClient.exe",
    r"C:\Program Files (x86)\Riot Games\League of Legends\LeagueClient.exe",
];

/// Well-known client executable locations on Windows, in lookup order
pub fn default_install_paths() -> Vec<PathBuf> {
    WINDOWS_INSTALL_PATHS.iter().map(PathBuf::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Other(String),
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::MacOs => f.write_str("macos"),
            Platform::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Could not find League client. Please open it manually.")]
    NotInstalled { searched: Vec<PathBuf> },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Error launching League client: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to run to start the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// Run the client executable directly
    Executable(PathBuf),
    /// Hand the app bundle to `open`
    OpenBundle(PathBuf),
}

impl LaunchPlan {
    /// Decide how to launch on `platform`
    ///
    /// `candidates` are tried in order on Windows; `exists` is the existence
    /// check applied to them.
    pub fn for_platform(
        platform: &Platform,
        candidates: &[PathBuf],
        exists: impl Fn(&Path) -> bool,
    ) -> Result<Self, LaunchError> {
        match platform {
            Platform::Windows => candidates
                .iter()
                .find(|path| exists(path))
                .map(|path| LaunchPlan::Executable(path.clone()))
                .ok_or_else(|| LaunchError::NotInstalled {
                    searched: candidates.to_vec(),
                }),
            Platform::MacOs => Ok(LaunchPlan::OpenBundle(PathBuf::from(MACOS_APP_BUNDLE))),
            Platform::Other(name) => Err(LaunchError::UnsupportedPlatform(name.clone())),
        }
    }

    /// Program and arguments to spawn
    pub fn command(&self) -> (PathBuf, Vec<OsString>) {
        match self {
            LaunchPlan::Executable(path) => (path.clone(), Vec::new()),
            LaunchPlan::OpenBundle(bundle) => {
                (PathBuf::from("open"), vec![bundle.clone().into_os_string()])
            }
        }
    }
}

/// Starts a program without waiting for it
pub trait Spawner: Send + Sync {
    fn spawn(&self, program: &Path, args: &[OsString]) -> io::Result<()>;
}

/// [`Spawner`] using `std::process::Command`, detached from this process
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn(&self, program: &Path, args: &[OsString]) -> io::Result<()> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            command.creation_flags(DETACHED_PROCESS);
        }

        // The client outlives us; the child handle is dropped without waiting
        command.spawn().map(drop)
    }
}

/// Starts the client for the current platform
pub struct ClientLauncher<S = SystemSpawner> {
    platform: Platform,
    candidates: Vec<PathBuf>,
    spawner: S,
}

impl ClientLauncher<SystemSpawner> {
    pub fn new() -> Self {
        Self::with_spawner(Platform::current(), default_install_paths(), SystemSpawner)
    }
}

impl Default for ClientLauncher<SystemSpawner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Spawner> ClientLauncher<S> {
    pub fn with_spawner(platform: Platform, candidates: Vec<PathBuf>, spawner: S) -> Self {
        Self {
            platform,
            candidates,
            spawner,
        }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Issue the launch; `true` means the command was started, not that the
    /// client is up yet
    pub fn launch(&self) -> bool {
        match self.try_launch() {
            Ok(_) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    pub fn try_launch(&self) -> Result<LaunchPlan, LaunchError> {
        info!("Attempting to open League of Legends client...");
        let plan = LaunchPlan::for_platform(&self.platform, &self.candidates, Path::exists)?;
        if let LaunchPlan::Executable(path) = &plan {
            info!("Found League client at: {}", path.display());
        }

        let (program, args) = plan.command();
        self.spawner
            .spawn(&program, &args)
            .map_err(|source| LaunchError::Spawn { program, source })?;

        info!("League client launch initiated, waiting for it to start...");
        Ok(plan)
    }
}
