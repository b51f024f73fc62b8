//! Recording fake transport for adapter and dispatch tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::AdapterError;
use super::http::{HttpTransport, ProviderRequest, ProviderResponse, ResponseMeta};

/// A transport double that answers from a script and records every
/// request it sees.
#[derive(Default)]
pub struct RecordingTransport {
    script: Mutex<VecDeque<Result<ProviderResponse, AdapterError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a status and no body.
    pub fn respond(&self, status: u16) -> &Self {
        self.push(Ok(ProviderResponse {
            status,
            meta: ResponseMeta::default(),
            body: None,
        }))
    }

    /// Queue a response with a JSON body.
    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(ProviderResponse {
            status,
            meta: ResponseMeta::default(),
            body: Some(body),
        }))
    }

    /// Queue a 429 with a `Retry-After` header.
    pub fn respond_throttled(&self, retry_after_secs: u64) -> &Self {
        self.push(Ok(ProviderResponse {
            status: 429,
            meta: ResponseMeta {
                retry_after: Some(retry_after_secs),
                remaining: Some(0),
            },
            body: None,
        }))
    }

    /// Queue a transport-level failure (timeout, connection refused).
    pub fn respond_unavailable(&self) -> &Self {
        self.push(Err(AdapterError::unavailable("scripted transport failure")))
    }

    fn push(&self, entry: Result<ProviderResponse, AdapterError>) -> &Self {
        self.script.lock().unwrap().push_back(entry);
        self
    }

    /// Requests issued so far.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse, AdapterError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdapterError::internal("no scripted response left")))
    }
}
