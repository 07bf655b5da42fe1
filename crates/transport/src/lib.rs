//! reqwest-backed HTTP transport.
//!
//! Implements the [`contracts::HttpTransport`] port with [`reqwest::Client`].
//! Client crates depend on the port only; this crate is the single place where
//! an HTTP library is named.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection handling, TLS (rustls), and body encoding
//! live here. Status interpretation and JSON decoding do not: the transport
//! returns every response the server produced, whatever its status code.

use async_trait::async_trait;
use contracts::{
    ConfigError, HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
    TransportErrorKind,
};
use tracing::trace;

/// [`HttpTransport`] over a shared [`reqwest::Client`].
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with reqwest's default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::Transport(map_error(&e)))?;
        Ok(Self { client })
    }

    /// Wraps a caller-configured client (timeouts, proxies, default headers).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        // `.json()` sets `Content-Type: application/json`.
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| map_error(&e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| map_error(&e))?;

        trace!(status, bytes = body.len(), url = %request.url, "reqwest exchange complete");

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

fn map_error(error: &reqwest::Error) -> TransportError {
    let kind = if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_body() || error.is_decode() {
        TransportErrorKind::Body
    } else {
        TransportErrorKind::Request
    };
    TransportError::new(kind, error.to_string())
}
