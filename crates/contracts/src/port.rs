//! The HTTP transport port and the JSON call helper built on it.
//!
//! Service clients never talk to an HTTP library directly. They build an
//! [`HttpRequest`] and hand it to [`JsonApi::call`], which sends it through an
//! [`HttpTransport`] exactly once and interprets the response:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | no response | [`ClientError::Transport`] |
//! | non-`2xx` status | [`ClientError::Status`] |
//! | `2xx`, body not JSON | [`ClientError::Decode`] |
//! | `2xx`, JSON body | `Ok(Value)`, returned unmodified |

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{BaseUrl, ClientError, HttpRequest, HttpResponse, RequestId, TransportError};

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Sends one [`HttpRequest`] and returns the raw [`HttpResponse`].
///
/// Implementations must not retry, and must return `Ok` for every response the
/// server produced, whatever its status code. Status interpretation belongs to
/// [`JsonApi`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs the network exchange for `request`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

// ---------------------------------------------------------------------------
// JSON call helper
// ---------------------------------------------------------------------------

/// A base URL paired with a transport: the shared core of every service client.
#[derive(Debug, Clone)]
pub struct JsonApi<T> {
    base_url: BaseUrl,
    transport: T,
}

impl<T: HttpTransport> JsonApi<T> {
    /// Creates a helper that resolves paths against `base_url`.
    pub fn new(base_url: BaseUrl, transport: T) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Resolves `path` against the base URL without escaping it.
    pub fn url(&self, path: &str) -> String {
        self.base_url.join(path)
    }

    /// Sends `request` once and decodes a successful body as JSON.
    ///
    /// # Errors
    ///
    /// See the module documentation for the outcome table.
    #[instrument(
        name = "http_call",
        skip_all,
        fields(
            request_id = %RequestId::new_random(),
            method = %request.method,
            url = %request.url,
        )
    )]
    pub async fn call(&self, request: HttpRequest) -> Result<Value, ClientError> {
        let url = request.url.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(source) => {
                warn!(
                    kind = %source.kind,
                    error = %source.message,
                    "Request failed before a response was received"
                );
                return Err(ClientError::Transport { url, source });
            }
        };

        debug!(
            status = response.status,
            bytes = response.body.len(),
            "Response received"
        );

        if !response.is_success() {
            warn!(status = response.status, "Non-success status");
            return Err(ClientError::Status {
                url,
                status: response.status,
                body: response.body_text(),
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| {
            warn!(error = %source, "Response body is not valid JSON");
            ClientError::Decode { url, source }
        })
    }
}
