// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the control API client

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while talking to the control API
#[derive(Debug, Error)]
pub enum LcuError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid control API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid authorization header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lockfile: {0}")]
    Lockfile(String),

    #[error("timed out after {0:?} waiting for the client API")]
    ConnectTimeout(Duration),

    #[error("connection to the client API is closed")]
    Closed,
}

/// Result type for control API operations
pub type LcuResult<T> = Result<T, LcuError>;
