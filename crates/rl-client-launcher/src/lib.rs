// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Detecting and launching the game client
//!
//! [`ProcessProbe`] answers "is the client running?" from a process
//! snapshot and [`ClientLauncher`] starts it when it is not. Both sit on a
//! small trait ([`ProcessSource`], [`Spawner`]) so the decisions can be
//! tested without touching real processes.

pub mod launcher;
pub mod probe;

pub use launcher::{
    ClientLauncher, LaunchError, LaunchPlan, MACOS_APP_BUNDLE, Platform, Spawner, SystemSpawner,
    default_install_paths,
};
pub use probe::{
    CLIENT_PROCESS_NAME, ProbeError, ProcessEntry, ProcessProbe, ProcessSource,
    SystemProcessSource, UX_PROCESS_NAME,
};
