// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The request/response contract the replay flow depends on

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::LcuResult;

/// HTTP methods used against the control API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestMethod::Get => write!(f, "GET"),
            RequestMethod::Post => write!(f, "POST"),
        }
    }
}

/// A completed exchange: the status code and the raw body text
///
/// Non-ok statuses are data here, not errors. Callers decide what a 404
/// means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the HTTP success range
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// The body as JSON, or `None` when it does not decode
    pub fn json_value(&self) -> Option<Value> {
        self.json().ok()
    }
}

/// One live, authenticated session with the control API
#[async_trait]
pub trait ControlConnection: Send + Sync {
    /// Issue a request and return whatever the API answered
    ///
    /// Only transport failures are errors; every HTTP status is returned as
    /// an [`ApiResponse`].
    async fn request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<&Value>,
    ) -> LcuResult<ApiResponse>;

    /// End the session. Requests issued afterwards fail.
    async fn close(&self) -> LcuResult<()>;

    async fn get(&self, path: &str) -> LcuResult<ApiResponse> {
        self.request(RequestMethod::Get, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> LcuResult<ApiResponse> {
        self.request(RequestMethod::Post, path, Some(body)).await
    }
}
