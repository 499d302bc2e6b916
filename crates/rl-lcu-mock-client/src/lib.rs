// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Scripted control API connection for testing
//!
//! [`MockLcuConnection`] answers requests from a queue of canned replies, in
//! order, and records every request it receives. Once the queue runs dry it
//! repeats the fallback reply if one is set, otherwise it fails the request
//! with a transport error so that an unexpected extra call is visible.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rl_lcu_client::{ApiResponse, ControlConnection, LcuError, LcuResult, RequestMethod};
use serde_json::Value;

/// A request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(ApiResponse),
    TransportError(String),
}

impl Reply {
    fn into_result(self) -> LcuResult<ApiResponse> {
        match self {
            Reply::Response(response) => Ok(response),
            Reply::TransportError(message) => Err(LcuError::Transport(message)),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    replies: VecDeque<Reply>,
    fallback: Option<Reply>,
    requests: Vec<RecordedRequest>,
    closed: bool,
    close_calls: usize,
}

/// Mock connection implementing [`ControlConnection`]
#[derive(Debug, Clone, Default)]
pub struct MockLcuConnection {
    state: Arc<Mutex<State>>,
}

impl MockLcuConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with a JSON body
    pub fn reply(self, status: u16, body: Value) -> Self {
        self.reply_raw(status, body.to_string())
    }

    /// Queue a reply with a raw body
    pub fn reply_raw(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Reply::Response(ApiResponse::new(status, body)))
    }

    /// Queue a transport failure
    pub fn reply_transport_error(self, message: impl Into<String>) -> Self {
        self.push(Reply::TransportError(message.into()))
    }

    /// Answer with this once the queue is empty
    pub fn fallback(self, status: u16, body: Value) -> Self {
        self.lock().fallback = Some(Reply::Response(ApiResponse::new(status, body.to_string())));
        self
    }

    fn push(self, reply: Reply) -> Self {
        self.lock().replies.push_back(reply);
        self
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Number of requests with the given method and path
    pub fn count_matching(&self, method: RequestMethod, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn close_calls(&self) -> usize {
        self.lock().close_calls
    }
}

#[async_trait]
impl ControlConnection for MockLcuConnection {
    async fn request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<&Value>,
    ) -> LcuResult<ApiResponse> {
        let reply = {
            let mut state = self.lock();
            if state.closed {
                return Err(LcuError::Closed);
            }
            state.requests.push(RecordedRequest {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
            match state.replies.pop_front() {
                Some(reply) => reply,
                None => match &state.fallback {
                    Some(reply) => reply.clone(),
                    None => Reply::TransportError(format!("no scripted reply for {} {}", method, path)),
                },
            }
        };

        reply.into_result()
    }

    async fn close(&self) -> LcuResult<()> {
        let mut state = self.lock();
        state.closed = true;
        state.close_calls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replies_are_served_in_order_then_fallback() {
        let mock = MockLcuConnection::new()
            .reply(404, json!({"message": "nope"}))
            .reply_raw(204, "")
            .fallback(200, json!({"state": "downloading"}));

        assert_eq!(mock.get("/a").await.unwrap().status, 404);
        assert_eq!(mock.post("/b", &json!({})).await.unwrap().status, 204);
        assert_eq!(mock.get("/c").await.unwrap().status, 200);
        assert_eq!(mock.get("/c").await.unwrap().status, 200);

        assert_eq!(mock.request_count(), 4);
        assert_eq!(mock.count_matching(RequestMethod::Get, "/c"), 2);
        let requests = mock.requests();
        assert_eq!(requests[1].method, RequestMethod::Post);
        assert_eq!(requests[1].body, Some(json!({})));
    }

    #[tokio::test]
    async fn unscripted_request_is_a_transport_error() {
        let mock = MockLcuConnection::new();
        let err = mock.get("/x").await.unwrap_err();
        assert!(matches!(err, LcuError::Transport(_)));
    }

    #[tokio::test]
    async fn closed_mock_rejects_requests() {
        let mock = MockLcuConnection::new().reply(200, json!({}));
        mock.close().await.unwrap();
        assert!(matches!(mock.get("/x").await.unwrap_err(), LcuError::Closed));
        assert!(mock.is_closed());
        assert_eq!(mock.request_count(), 0);
    }
}
