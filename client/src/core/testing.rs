//! In-memory [`HttpBackend`] for unit tests.
//!
//! Replies are scripted per `(method, path)` and consumed in order. Every
//! request is recorded before its reply is produced, so tests can assert on
//! the exact call sequence. A reply can be held until a [`Notify`] fires,
//! which lets a test park one request and issue another meanwhile.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::sync::Notify;

use super::error::{ClientError, Result};
use super::service::{HttpBackend, HttpRequest, HttpResponse};
use crate::app::App;

/// Base URL the mock answers under. Paths are scripted without the `/api` prefix.
pub(crate) const TEST_BASE: &str = "http://api.test/api";
const TEST_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub(crate) struct MockReply {
    status: u16,
    body: Vec<u8>,
    network_error: Option<String>,
    hold: Option<Arc<Notify>>,
}

impl MockReply {
    pub(crate) fn json(status: u16, body: Value) -> Self {
        Self::bytes(status, body.to_string().into_bytes())
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self::bytes(status, body.as_bytes().to_vec())
    }

    pub(crate) fn empty(status: u16) -> Self {
        Self::bytes(status, Vec::new())
    }

    pub(crate) fn bytes(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            body,
            network_error: None,
            hold: None,
        }
    }

    pub(crate) fn network(message: &str) -> Self {
        Self {
            network_error: Some(message.to_string()),
            ..Self::empty(0)
        }
    }

    /// Answer only after `gate` is notified
    pub(crate) fn held(mut self, gate: Arc<Notify>) -> Self {
        self.hold = Some(gate);
        self
    }
}

#[derive(Default)]
pub(crate) struct MockBackend {
    replies: Mutex<HashMap<(Method, String), VecDeque<MockReply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`
    pub(crate) fn on(&self, method: Method, path: &str, reply: MockReply) {
        self.replies
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Recorded requests as `"METHOD /path?query"`
    pub(crate) fn calls(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|request| {
                let path = relative_path(request);
                match request.url.query() {
                    Some(query) => format!("{} {}?{}", request.method, path, query),
                    None => format!("{} {}", request.method, path),
                }
            })
            .collect()
    }

    /// Yield until at least `count` requests were recorded
    pub(crate) async fn wait_for_requests(&self, count: usize) {
        for _ in 0..10_000 {
            if self.requests.lock().len() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!(
            "expected {} requests, saw {:?}",
            count,
            self.calls()
        );
    }
}

fn relative_path(request: &HttpRequest) -> String {
    let path = request.url.path();
    path.strip_prefix(TEST_PREFIX).unwrap_or(path).to_string()
}

#[async_trait]
impl HttpBackend for MockBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = (request.method.clone(), relative_path(&request));
        self.requests.lock().push(request);

        let reply = self
            .replies
            .lock()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        let Some(reply) = reply else {
            return Err(ClientError::network(format!("no mock reply for {} {}", key.0, key.1)));
        };

        if let Some(gate) = &reply.hold {
            gate.notified().await;
        }
        if let Some(message) = reply.network_error {
            return Err(ClientError::network(message));
        }

        let status = StatusCode::from_u16(reply.status)
            .map_err(|e| ClientError::network(format!("bad mock status: {}", e)))?;
        Ok(HttpResponse {
            status,
            body: reply.body,
        })
    }
}

/// An [`App`] wired to `backend`
pub(crate) fn test_app(backend: &Arc<MockBackend>) -> App {
    App::with_backend(backend.clone(), TEST_BASE)
}
