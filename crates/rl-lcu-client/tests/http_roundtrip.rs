// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

mod support;

use std::time::Duration;

use rl_lcu_client::{
    AuthConfig, Connector, ConnectorConfig, ControlConnection, LcuClient, LockfileSource,
    READINESS_PATH,
};
use rl_test_utils::{TestLogger, logged_assert, logged_assert_eq};
use serde_json::json;
use support::StubServer;
use url::Url;

fn client_for(port: u16) -> LcuClient {
    let base_url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
    LcuClient::new(base_url, AuthConfig::basic("riot", "pw")).unwrap()
}

#[tokio::test]
async fn get_returns_error_status_as_data_and_sends_basic_auth() {
    let mut logger = TestLogger::new("get_returns_error_status_as_data_and_sends_basic_auth").unwrap();

    let mut server = StubServer::start(vec![(404, json!({"message": "missing"}).to_string())]).await;
    let client = client_for(server.port);

    let response = client.get("/lol-replays/v1/metadata/123456789").await.unwrap();
    logger.log(&format!("Response: {:?}", response)).unwrap();
    logged_assert_eq!(logger, response.status, 404);
    logged_assert!(logger, !response.is_ok());
    logged_assert_eq!(logger, response.json_value(), Some(json!({"message": "missing"})));

    let request = server.next_request().await;
    logger.log(&format!("Captured: {:?}", request)).unwrap();
    logged_assert_eq!(
        logger,
        request.request_line,
        "GET /lol-replays/v1/metadata/123456789 HTTP/1.1"
    );
    logged_assert_eq!(logger, request.header("authorization"), Some("Basic cmlvdDpwdw=="));
    logged_assert_eq!(logger, request.header("accept"), Some("application/json"));

    logger.finish_success().unwrap();
}

#[tokio::test]
async fn post_sends_json_body() {
    let mut logger = TestLogger::new("post_sends_json_body").unwrap();

    let mut server = StubServer::start(vec![(204, String::new())]).await;
    let client = client_for(server.port);

    let response = client
        .post("/lol-replays/v1/rofls/42/download", &json!({"contextData": {}}))
        .await
        .unwrap();
    logged_assert!(logger, response.is_ok());

    let request = server.next_request().await;
    logger.log(&format!("Captured: {:?}", request)).unwrap();
    logged_assert_eq!(
        logger,
        request.request_line,
        "POST /lol-replays/v1/rofls/42/download HTTP/1.1"
    );
    logged_assert_eq!(logger, request.body, r#"{"contextData":{}}"#);
    logged_assert_eq!(logger, request.header("content-type"), Some("application/json"));

    logger.finish_success().unwrap();
}

#[tokio::test]
async fn connector_reads_lockfile_and_probes_readiness() {
    let mut logger = TestLogger::new("connector_reads_lockfile_and_probes_readiness").unwrap();

    let mut server = StubServer::start(vec![(200, json!("en_US").to_string())]).await;
    let dir = tempfile::tempdir().unwrap();
    let lockfile = dir.path().join("lockfile");
    std::fs::write(&lockfile, format!("LeagueClient:4242:{}:pw:http", server.port)).unwrap();

    let connector = Connector::new(
        LockfileSource::new(vec![dir.path().join("missing"), lockfile]),
        ConnectorConfig {
            retry_interval: Duration::from_millis(50),
            timeout: Some(Duration::from_secs(10)),
        },
    );
    let client = connector.connect().await.unwrap();
    logged_assert_eq!(
        logger,
        client.base_url().as_str().to_string(),
        format!("http://127.0.0.1:{}/", server.port)
    );

    let request = server.next_request().await;
    logged_assert_eq!(
        logger,
        request.request_line,
        format!("GET {} HTTP/1.1", READINESS_PATH)
    );

    client.close().await.unwrap();
    logged_assert!(logger, client.is_closed());

    logger.finish_success().unwrap();
}
