//! In-memory [`HttpTransport`] for unit tests.
//!
//! Enabled by the `test-support` feature. Client crates list
//! `contracts = { workspace = true, features = ["test-support"] }` under
//! `[dev-dependencies]` and assert on the exact requests their operations build.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{HttpRequest, HttpResponse, HttpTransport, TransportError};

type Reply = Result<HttpResponse, TransportError>;

/// Records every request and replies from a queue of canned outcomes.
///
/// When the queue is empty it answers `200 {}`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl RecordingTransport {
    /// Creates a transport that answers every request with `200 {}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a `200` reply carrying `body`.
    pub fn reply_json(self, body: Value) -> Self {
        self.reply(HttpResponse::new(200, body.to_string()))
    }

    /// Queues an arbitrary response.
    pub fn reply(self, response: HttpResponse) -> Self {
        self.lock_replies().push_back(Ok(response));
        self
    }

    /// Queues a transport failure.
    pub fn fail(self, error: TransportError) -> Self {
        self.lock_replies().push_back(Err(error));
        self
    }

    /// Returns a copy of every request sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the only request sent, panicking if there was not exactly one.
    pub fn single_request(&self) -> HttpRequest {
        let mut requests = self.requests();
        assert_eq!(
            requests.len(),
            1,
            "expected exactly one request, got {requests:?}"
        );
        requests.remove(0)
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        self.lock_replies()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}
