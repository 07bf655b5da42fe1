//! Shared value types for outgoing HTTP calls.
//!
//! These types describe a request and its response independently of any HTTP
//! client library. Service clients build an [`HttpRequest`]; an
//! [`crate::HttpTransport`] implementation turns it into a network call and
//! hands back an [`HttpResponse`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ConfigError;

// ---------------------------------------------------------------------------
// Base URL
// ---------------------------------------------------------------------------

/// Root URL of a remote service, e.g. `http://vllm.inference.svc:8000`.
///
/// Validated once at client construction. Trailing `/` characters are removed
/// so that [`BaseUrl::join`] never yields a doubled separator. Deserialising
/// goes through [`BaseUrl::parse`] as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parses a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value is empty or does not
    /// start with an `http://` or `https://` scheme.
    pub fn parse(value: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = value.into();
        let trimmed = raw.trim_end_matches('/');

        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"));

        match host {
            Some(rest) if !rest.is_empty() => Ok(Self(trimmed.to_string())),
            Some(_) => Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: "missing host".to_string(),
            }),
            None => Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: "expected an http:// or https:// scheme".to_string(),
            }),
        }
    }

    /// Appends `path` (which must begin with `/`) without escaping it.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }

    /// Returns the base URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BaseUrl {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// HTTP verbs used by the service clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read-only query (`GET`).
    Get,
    /// Create or trigger (`POST`).
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

// ---------------------------------------------------------------------------

/// A fully-formed outgoing request.
///
/// `body` is `None` for bodiless calls (`GET`, and `POST` endpoints that take
/// no payload). When present it is sent as `application/json`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute URL, already joined to the service's [`BaseUrl`].
    pub url: String,
    /// JSON payload, if any.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Builds a bodiless `GET`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    /// Builds a `POST` carrying a JSON body.
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    /// Builds a `POST` with an empty body.
    pub fn post_empty(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: None,
        }
    }
}

// ---------------------------------------------------------------------------

/// A response as received from the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from a status code and raw body bytes.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for `2xx` status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_strips_trailing_slashes() {
        let url = BaseUrl::parse("http://orchestrator:8000//").unwrap();
        assert_eq!(url.as_str(), "http://orchestrator:8000");
        assert_eq!(url.join("/tasks"), "http://orchestrator:8000/tasks");
    }

    #[test]
    fn base_url_requires_http_scheme() {
        let err = BaseUrl::parse("orchestrator:8000").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn base_url_rejects_empty_and_hostless_values() {
        assert!(BaseUrl::parse("").is_err());
        assert!(BaseUrl::parse("https://").is_err());
    }

    #[test]
    fn join_does_not_escape_path() {
        let url = BaseUrl::parse("https://svc").unwrap();
        assert_eq!(
            url.join("/workflows/a b%2F/execute"),
            "https://svc/workflows/a b%2F/execute"
        );
    }

    #[test]
    fn deserialising_validates_like_parse() {
        assert!(serde_json::from_value::<BaseUrl>(json!("")).is_err());
        assert!(serde_json::from_value::<BaseUrl>(json!("not-a-url")).is_err());
        assert!(serde_json::from_value::<BaseUrl>(json!("not-a-url/")).is_err());

        let url: BaseUrl = serde_json::from_value(json!("http://svc:8000/")).unwrap();
        assert_eq!(url.join("/tasks"), "http://svc:8000/tasks");
        assert_eq!(serde_json::to_value(&url).unwrap(), json!("http://svc:8000"));
    }

    #[test]
    fn success_covers_only_2xx() {
        assert!(HttpResponse::new(200, "{}").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn body_text_is_lossy() {
        let response = HttpResponse::new(500, vec![b'o', b'k', 0xff]);
        assert_eq!(response.body_text(), "ok\u{fffd}");
    }
}
