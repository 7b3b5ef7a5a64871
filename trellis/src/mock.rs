//! Scripted in-memory transport for unit tests

use crate::transport::{FailureKind, PreparedRequest, RawResponse, Transport, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

type Responder =
    Box<dyn Fn(&PreparedRequest) -> Result<RawResponse, TransportError> + Send + Sync>;

/// Answers every request with a closure and records what it was sent
pub(crate) struct MockTransport {
    responder: Responder,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl MockTransport {
    pub(crate) fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&PreparedRequest) -> Result<RawResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub(crate) fn servers_hit(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.server.to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn dispatch(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().push(request.clone());
        (self.responder)(request)
    }
}

pub(crate) fn json_response(status: u16, body: serde_json::Value) -> RawResponse {
    RawResponse {
        status,
        reason: None,
        content_type: Some("application/json; charset=UTF-8".to_string()),
        body: body.to_string().into_bytes(),
    }
}

pub(crate) fn refused(request: &PreparedRequest) -> TransportError {
    TransportError::new(FailureKind::ConnectRefused, &request.url, "Connection refused")
}
