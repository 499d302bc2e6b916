// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Replay metadata as reported by the client

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a recorded game
pub type GameId = u64;

/// Server-side preparation state of a replay
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReplayState {
    /// No state reported
    #[default]
    Unknown,
    Checking,
    Downloading,
    /// Downloaded and ready to play
    Watch,
    Other(String),
}

impl ReplayState {
    pub fn as_str(&self) -> &str {
        match self {
            ReplayState::Unknown => "unknown",
            ReplayState::Checking => "checking",
            ReplayState::Downloading => "downloading",
            ReplayState::Watch => "watch",
            ReplayState::Other(s) => s,
        }
    }

    /// Whether the client is still fetching or verifying the replay
    pub fn is_in_progress(&self) -> bool {
        matches!(self, ReplayState::Checking | ReplayState::Downloading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ReplayState::Watch)
    }
}

impl From<String> for ReplayState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unknown" => ReplayState::Unknown,
            "checking" => ReplayState::Checking,
            "downloading" => ReplayState::Downloading,
            "watch" => ReplayState::Watch,
            _ => ReplayState::Other(value),
        }
    }
}

impl From<ReplayState> for String {
    fn from(value: ReplayState) -> Self {
        match value {
            ReplayState::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ReplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata record for one replay
///
/// Only the fields the flow acts on are typed; everything else the client
/// sends is kept in `extra` so the record can be printed back in full.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayMetadata {
    #[serde(default)]
    pub state: ReplayState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_string: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReplayMetadata {
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// Outcome of a single metadata query
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataLookup {
    Found(ReplayMetadata),
    /// The client answered with a non-ok status
    Missing { status: u16, detail: Option<Value> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_states_parse_and_others_are_kept_verbatim() {
        let states: Vec<ReplayState> = ["checking", "downloading", "watch", "unknown", "incompatible"]
            .into_iter()
            .map(|s| ReplayState::from(s.to_string()))
            .collect();
        assert_eq!(
            states,
            vec![
                ReplayState::Checking,
                ReplayState::Downloading,
                ReplayState::Watch,
                ReplayState::Unknown,
                ReplayState::Other("incompatible".into()),
            ]
        );
        assert_eq!(ReplayState::Other("lost".into()).to_string(), "lost");
    }

    #[test]
    fn metadata_keeps_unknown_fields() {
        let metadata: ReplayMetadata = serde_json::from_value(json!({
            "gameId": 123456789,
            "state": "incompatible",
            "errorCode": 7,
            "errorString": "version mismatch",
            "downloadProgress": 0
        }))
        .unwrap();

        assert_eq!(metadata.state, ReplayState::Other("incompatible".into()));
        assert_eq!(metadata.error_code, Some(json!(7)));
        assert_eq!(metadata.error_string.as_deref(), Some("version mismatch"));
        assert_eq!(metadata.extra.get("gameId"), Some(&json!(123456789)));

        let round: Value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(round["state"], json!("incompatible"));
        assert_eq!(round["downloadProgress"], json!(0));
    }

    #[test]
    fn missing_state_defaults_to_unknown() {
        let metadata: ReplayMetadata = serde_json::from_value(json!({"gameId": 1})).unwrap();
        assert_eq!(metadata.state, ReplayState::Unknown);
        assert!(metadata.error_code.is_none());

        let round: Value = serde_json::to_value(&metadata).unwrap();
        assert!(round.get("errorCode").is_none());
    }

    #[test]
    fn progress_predicates() {
        assert!(ReplayState::Checking.is_in_progress());
        assert!(ReplayState::Downloading.is_in_progress());
        assert!(!ReplayState::Watch.is_in_progress());
        assert!(ReplayState::Watch.is_ready());
        assert!(!ReplayState::Unknown.is_ready());
    }
}
