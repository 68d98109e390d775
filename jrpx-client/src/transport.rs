//! HTTP transport seam
//!
//! The client hands every exchange to a [`Transport`]: one POST, one status
//! code, one text body. Anything beyond that (connection pooling, TLS,
//! proxies) belongs to the implementation.
//!
//! [`HttpTransport`] is the default, backed by `reqwest`. Tests and
//! applications with special needs plug in their own implementation through
//! `ClientBuilder::transport`.
//!
//! # Errors
//!
//! Implementations report connection failures as `Error::Transport` and an
//! elapsed timeout as `Error::Timeout`. A non-200 status is *not* an error at
//! this layer; the client decides what to do with it.

use async_trait::async_trait;
use jrpx_core::{Error, Result};
use std::time::Duration;

/// Content type sent with every request
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// One outbound POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Target URL
    pub url: String,
    /// Request body
    pub body: String,
    /// Upper bound for the whole exchange
    pub timeout: Duration,
    /// Extra headers, in order
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// A JSON POST with `content-type: application/json`
    pub fn json(url: impl Into<String>, body: String, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            body,
            timeout,
            headers: vec![("content-type".to_string(), CONTENT_TYPE_JSON.to_string())],
        }
    }

    /// Look up a header value, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs a single HTTP POST
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the status and body
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh connection pool
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Reuse an existing `reqwest` client (and its pool, proxies, TLS setup)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .body(request.body);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(err.to_string())
    }
}
