//! Shared contracts for the agentic platform service clients.
//!
//! This crate contains the identifiers, request/response value types, error
//! taxonomy, and transport port used by both the orchestration client and the
//! inference client. Transport crates implement [`HttpTransport`]; client crates
//! build [`HttpRequest`]s and run them through [`JsonApi`].
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no HTTP client dependency.
//! It defines *what* a call looks like; the `transport` crate defines *how* it
//! reaches the network.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`TaskId`, `WorkflowId`, `ModelName`, etc.) |
//! | [`types`] | Value types (`BaseUrl`, `HttpRequest`, `HttpResponse`) |
//! | [`errors`] | `ConfigError`, `ClientError`, `TransportError` |
//! | [`port`] | The `HttpTransport` trait and the `JsonApi` call helper |
//! | `testing` | `RecordingTransport` fake (feature `test-support`) |

pub mod errors;
pub mod identifiers;
pub mod port;
pub mod types;

#[cfg(feature = "test-support")]
pub mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ClientError, ConfigError, TransportError, TransportErrorKind};
pub use identifiers::{AgentName, ModelName, RequestId, TaskId, WorkflowId};
pub use port::{HttpTransport, JsonApi};
pub use types::{BaseUrl, HttpMethod, HttpRequest, HttpResponse};
