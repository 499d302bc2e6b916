// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Replay endpoints of the control API

use serde_json::{Value, json};

use crate::metadata::GameId;

pub fn metadata_path(game_id: GameId) -> String {
    format!("/lol-replays/v1/metadata/{}", game_id)
}

pub fn download_path(game_id: GameId) -> String {
    format!("/lol-replays/v1/rofls/{}/download", game_id)
}

pub fn watch_path(game_id: GameId) -> String {
    format!("/lol-replays/v1/rofls/{}/watch", game_id)
}

/// Body sent with the download and watch triggers
///
/// The API rejects trigger requests without a `contextData` object, even an
/// empty one.
pub fn context_data_body() -> Value {
    json!({ "contextData": {} })
}
