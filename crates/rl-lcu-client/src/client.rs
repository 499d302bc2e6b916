// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! HTTP implementation of [`ControlConnection`]

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::auth::AuthConfig;
use crate::connection::{ApiResponse, ControlConnection, RequestMethod};
use crate::credentials::Credentials;
use crate::error::{LcuError, LcuResult};

/// Per-request timeout. The API is local, so anything slower is a hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the local control API
///
/// The API listens on loopback with a self-signed certificate, so
/// certificate validation is disabled for this client only.
#[derive(Debug)]
pub struct LcuClient {
    http_client: HttpClient,
    base_url: Url,
    auth: AuthConfig,
    closed: AtomicBool,
}

impl LcuClient {
    /// Create a client for the given base URL
    pub fn new(base_url: Url, auth: AuthConfig) -> LcuResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(concat!("replay-launcher/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            auth,
            closed: AtomicBool::new(false),
        })
    }

    /// Create a client from discovered credentials
    pub fn from_credentials(credentials: &Credentials) -> LcuResult<Self> {
        Self::new(credentials.base_url()?, credentials.auth())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl ControlConnection for LcuClient {
    async fn request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<&Value>,
    ) -> LcuResult<ApiResponse> {
        if self.is_closed() {
            return Err(LcuError::Closed);
        }

        let url = self.base_url.join(path)?;
        let method = match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
        };
        debug!(%method, %url, "Sending control API request");

        let mut request = self.http_client.request(method, url).headers(self.auth.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body_len = body.len(), "Control API responded");

        Ok(ApiResponse { status, body })
    }

    async fn close(&self) -> LcuResult<()> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("LCU API connection closed.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LcuClient {
        let url = Url::parse("https://127.0.0.1:54321/").unwrap();
        LcuClient::new(url, AuthConfig::basic("riot", "pw")).unwrap()
    }

    #[tokio::test]
    async fn requests_after_close_fail_without_network() {
        let client = client();
        client.close().await.unwrap();
        assert!(client.is_closed());

        let err = client.get("/lol-replays/v1/metadata/1").await.unwrap_err();
        assert!(matches!(err, LcuError::Closed));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let client = client();
        client.close().await.unwrap();
        client.close().await.unwrap();
        assert!(client.is_closed());
    }
}
