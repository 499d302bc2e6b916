// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client for the game client's local control API (the "LCU" API)
//!
//! The replay flow only needs a small slice of this API, so the crate is
//! organised around the [`ControlConnection`] trait: one authenticated
//! request primitive returning a status code and a body. [`LcuClient`] is the
//! HTTP implementation; [`Connector`] discovers credentials and waits until
//! the API answers before handing out a client.

pub mod auth;
pub mod client;
pub mod connection;
pub mod connector;
pub mod credentials;
pub mod error;

pub use auth::AuthConfig;
pub use client::LcuClient;
pub use connection::{ApiResponse, ControlConnection, RequestMethod};
pub use connector::{Connector, ConnectorConfig, READINESS_PATH};
pub use credentials::{
    CredentialSource, Credentials, LockfileSource, SourceChain, default_lockfile_paths,
};
pub use error::{LcuError, LcuResult};
