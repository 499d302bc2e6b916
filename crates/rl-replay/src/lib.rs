// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Replay download and playback over the client's control API
//!
//! [`ReplayStateMachine`] drives one replay from whatever state the client
//! reports to playback: it queries the metadata, triggers a download when
//! the replay is not local yet, polls until it is ready and finally asks the
//! client to start watching it.

pub mod endpoints;
pub mod error;
pub mod metadata;
pub mod state_machine;

pub use error::{ReplayError, RequestStage};
pub use metadata::{GameId, MetadataLookup, ReplayMetadata, ReplayState};
pub use state_machine::{PollPolicy, ReplayStateMachine};
