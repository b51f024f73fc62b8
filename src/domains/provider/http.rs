//! Outbound HTTP seam for the provider adapter.
//!
//! One provider call is one `ProviderRequest` in and one
//! `ProviderResponse` out. The adapter only ever talks to the
//! `HttpTransport` trait; production wires in `ReqwestTransport`, tests a
//! recording fake with scripted responses.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::error::AdapterError;
use super::rate_limit::EndpointClass;

/// One outbound HTTP exchange about to be issued. Transient, never
/// persisted.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub method: reqwest::Method,
    pub url: String,
    /// Bearer access token attached as the Authorization header.
    pub bearer: String,
    pub body: Option<serde_json::Value>,
    pub class: EndpointClass,
}

impl ProviderRequest {
    pub fn new(
        method: reqwest::Method,
        url: impl Into<String>,
        bearer: impl Into<String>,
        class: EndpointClass,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            bearer: bearer.into(),
            body: None,
            class,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Throttling-relevant response headers, already parsed.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// `Retry-After` in seconds, when the provider sent one.
    pub retry_after: Option<u64>,

    /// Remaining request quota for the endpoint class, when advertised.
    pub remaining: Option<u32>,
}

/// The provider's answer to one exchange.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub meta: ResponseMeta,
    /// Parsed JSON body; `None` for empty bodies (e.g. 204).
    pub body: Option<serde_json::Value>,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes provider HTTP exchanges.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse, AdapterError>;
}

/// Production transport backed by a shared reqwest client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the per-call timeout applied at the client
    /// level, so every provider call is bounded.
    pub fn new(timeout_secs: u64) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AdapterError::internal(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse, AdapterError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .bearer_auth(&request.bearer);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AdapterError::unavailable("provider call timed out")
            } else {
                AdapterError::unavailable(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let meta = ResponseMeta {
            retry_after: header_u64(response.headers(), "retry-after"),
            remaining: header_u64(response.headers(), "x-ratelimit-remaining")
                .map(|v| v as u32),
        };

        let text = response
            .text()
            .await
            .map_err(|e| AdapterError::unavailable(e.to_string()))?;
        let body = if text.trim().is_empty() {
            None
        } else {
            // Non-JSON error pages from intermediaries are tolerated; the
            // adapter decides based on the status code.
            serde_json::from_str(&text).ok()
        };

        Ok(ProviderResponse { status, meta, body })
    }
}

fn header_u64(headers: &reqwest::header::HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = ProviderRequest::new(
            reqwest::Method::PUT,
            "https://api.example/v1/me/player/pause",
            "token",
            EndpointClass::Playback,
        )
        .with_body(serde_json::json!({"device_id": "d1"}));

        assert_eq!(req.method, reqwest::Method::PUT);
        assert_eq!(req.class, EndpointClass::Playback);
        assert!(req.body.is_some());
    }

    #[test]
    fn test_header_parsing() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("retry-after", "2".parse().unwrap());
        headers.insert("x-ratelimit-remaining", " 17 ".parse().unwrap());
        assert_eq!(header_u64(&headers, "retry-after"), Some(2));
        assert_eq!(header_u64(&headers, "x-ratelimit-remaining"), Some(17));
        assert_eq!(header_u64(&headers, "absent"), None);
    }

    #[test]
    fn test_success_range() {
        let ok = ProviderResponse {
            status: 204,
            meta: ResponseMeta::default(),
            body: None,
        };
        assert!(ok.is_success());
        let throttled = ProviderResponse {
            status: 429,
            meta: ResponseMeta::default(),
            body: None,
        };
        assert!(!throttled.is_success());
    }
}
