//! HTTP transport abstraction
//!
//! The registry only ever issues one kind of request: a POST with a handful of
//! headers, a string body and a timeout. `HttpTransport` captures exactly that
//! so hosts and tests can swap in their own client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// An outgoing POST request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub timeout: Duration,
}

impl PostRequest {
    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors raised by a transport before a response is available
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Header name or value rejected by the client
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Failure reported by a non-reqwest transport
    #[error("Transport error: {0}")]
    Other(String),
}

/// Something that can POST a request and hand back the response
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: PostRequest) -> Result<HttpResponse, TransportError>;
}

/// `HttpTransport` backed by a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a transport around an existing client (proxies, custom TLS, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: PostRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .body(request.body);

        for (name, value) in &request.headers {
            if name.trim().is_empty() {
                return Err(TransportError::InvalidHeader("empty header name".to_string()));
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
