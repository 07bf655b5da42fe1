//! Error types shared by every service client.
//!
//! [`ConfigError`] covers problems detected while constructing a client; a
//! client that was built successfully never reports them again.
//! [`ClientError`] covers the outcome of a single call: the request never
//! completed ([`ClientError::Transport`]), the server answered with a non-`2xx`
//! status ([`ClientError::Status`]), or the body was not JSON
//! ([`ClientError::Decode`]).
//!
//! Neither client retries. [`ClientError::is_retryable`] lets callers decide.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

/// Broad category of a failed network exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The connection could not be established (refused, DNS, TLS).
    Connect,
    /// The request or response did not complete in time.
    Timeout,
    /// The request could not be built or sent.
    Request,
    /// The response body could not be read.
    Body,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Request => "request",
            TransportErrorKind::Body => "body",
        };
        write!(f, "{label}")
    }
}

/// A network exchange that did not produce an HTTP response.
///
/// Transport implementations flatten their library-specific errors into this
/// type so that [`crate::HttpTransport`] stays independent of any HTTP crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    /// Failure category.
    pub kind: TransportErrorKind,
    /// Human-readable description from the underlying library.
    pub message: String,
}

impl TransportError {
    /// Creates a [`TransportError`].
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction-time errors
// ---------------------------------------------------------------------------

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured inference service type names no known backend dialect.
    #[error("Unsupported backend kind: '{0}' (expected one of: vllm, tgi, triton)")]
    UnsupportedBackendKind(String),

    /// The base URL could not be used as a request prefix.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The value as supplied by the caller.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be initialised.
    #[error("HTTP transport could not be initialised: {0}")]
    Transport(#[source] TransportError),
}

// ---------------------------------------------------------------------------
// Per-call errors
// ---------------------------------------------------------------------------

/// Errors returned by a single client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request did not produce an HTTP response.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Target URL of the failed request.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-`2xx` status code.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        /// Target URL of the request.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body as (lossy) UTF-8 text.
        body: String,
    },

    /// The server answered `2xx` but the body is not valid JSON.
    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        /// Target URL of the request.
        url: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An argument was rejected before any request was sent.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending argument.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ClientError {
    /// Returns the HTTP status code for [`ClientError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if repeating the same call may succeed.
    ///
    /// Connection failures, timeouts, `408`, `429`, and `5xx` responses are
    /// retryable. Decode failures and client-side validation errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { source, .. } => matches!(
                source.kind,
                TransportErrorKind::Connect | TransportErrorKind::Timeout
            ),
            Self::Status { status, .. } => matches!(status, 408 | 429 | 500..=599),
            Self::Decode { .. } | Self::InvalidInput { .. } => false,
        }
    }
}
