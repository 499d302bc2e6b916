// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Waiting for the control API to come up
//!
//! A freshly launched client takes a while before it writes its lockfile and
//! longer still before the API answers. [`Connector::connect`] resolves once,
//! with a client whose readiness probe has been answered.

use std::time::Duration;

use tracing::{debug, info};

use crate::client::LcuClient;
use crate::connection::ControlConnection;
use crate::credentials::CredentialSource;
use crate::error::{LcuError, LcuResult};

/// Endpoint used to check that the API is serving requests
pub const READINESS_PATH: &str = "/riotclient/region-locale";

/// How the connector waits for the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Delay between discovery attempts
    pub retry_interval: Duration,
    /// Give up after this long; `None` waits until interrupted
    pub timeout: Option<Duration>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_secs(2),
            timeout: None,
        }
    }
}

/// Discovers credentials and hands out a ready [`LcuClient`]
pub struct Connector<S> {
    source: S,
    config: ConnectorConfig,
}

impl<S: CredentialSource> Connector<S> {
    pub fn new(source: S, config: ConnectorConfig) -> Self {
        Self { source, config }
    }

    /// Wait until the API answers, or until the configured timeout
    pub async fn connect(&self) -> LcuResult<LcuClient> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.wait_until_ready())
                .await
                .map_err(|_| LcuError::ConnectTimeout(limit))?,
            None => self.wait_until_ready().await,
        }
    }

    async fn wait_until_ready(&self) -> LcuResult<LcuClient> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.try_connect().await {
                Ok(Some(client)) => {
                    info!(url = %client.base_url(), "LCU API connection established.");
                    return Ok(client);
                }
                Ok(None) => debug!(attempt, "Client API credentials not available yet"),
                Err(e) => debug!(attempt, error = %e, "Client API not ready yet"),
            }
            tokio::time::sleep(self.config.retry_interval).await;
        }
    }

    async fn try_connect(&self) -> LcuResult<Option<LcuClient>> {
        let Some(credentials) = self.source.discover()? else {
            return Ok(None);
        };
        debug!(port = credentials.port, protocol = %credentials.protocol, "Discovered client API credentials");

        let client = LcuClient::from_credentials(&credentials)?;
        // Any HTTP status proves the server is up; only transport errors retry
        let response = client.get(READINESS_PATH).await?;
        debug!(status = response.status, "Readiness probe answered");
        Ok(Some(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct NeverThere {
        calls: AtomicU32,
    }

    impl CredentialSource for NeverThere {
        fn discover(&self) -> LcuResult<Option<Credentials>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_timeout() {
        let source = NeverThere {
            calls: AtomicU32::new(0),
        };
        let config = ConnectorConfig {
            retry_interval: Duration::from_secs(2),
            timeout: Some(Duration::from_secs(9)),
        };
        let connector = Connector::new(source, config);

        let err = connector.connect().await.unwrap_err();
        assert!(matches!(err, LcuError::ConnectTimeout(d) if d == Duration::from_secs(9)));
        // attempts at t = 0, 2, 4, 6, 8
        assert_eq!(connector.source.calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn default_waits_forever() {
        let config = ConnectorConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.retry_interval, Duration::from_secs(2));
    }
}
