// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use rl_lcu_client::LcuError;
use serde_json::Value;
use thiserror::Error;

use crate::metadata::{ReplayMetadata, ReplayState};

/// Request that a [`ReplayError::RequestFailed`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Metadata,
    Download,
    Poll,
    Watch,
}

impl std::fmt::Display for RequestStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RequestStage::Metadata => "Error getting metadata",
            RequestStage::Download => "Error downloading replay",
            RequestStage::Poll => "Error checking replay status",
            RequestStage::Watch => "Error launching replay",
        };
        f.write_str(text)
    }
}

/// Why a replay operation did not complete
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Unexpected replay state: {state}")]
    UnexpectedState {
        state: ReplayState,
        error_code: Option<Value>,
        error_string: Option<String>,
        metadata: Box<ReplayMetadata>,
    },

    #[error("{stage}: {}", http_summary(*status, detail.as_ref()))]
    RequestFailed {
        stage: RequestStage,
        status: u16,
        detail: Option<Value>,
    },

    #[error("Timed out waiting for the replay to download ({attempts} attempts)")]
    Timeout { attempts: u32 },

    #[error("invalid replay metadata: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Connection(#[from] LcuError),
}

impl ReplayError {
    pub(crate) fn unexpected_state(metadata: ReplayMetadata) -> Self {
        ReplayError::UnexpectedState {
            state: metadata.state.clone(),
            error_code: metadata.error_code.clone(),
            error_string: metadata.error_string.clone(),
            metadata: Box::new(metadata),
        }
    }
}

fn http_summary(status: u16, detail: Option<&Value>) -> String {
    match detail {
        Some(detail) => format!("HTTP {} - {}", status, detail),
        None => format!("HTTP {}", status),
    }
}
