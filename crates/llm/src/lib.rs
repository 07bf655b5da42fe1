//! Text-generation inference client.
//!
//! [`InferenceClient`] presents one `generate` and one `chat` operation over
//! three inference servers (vLLM, TGI, Triton) that speak two wire dialects.
//! The dialect is resolved from the configured [`ServiceType`] once, when the
//! client is built; an unrecognised service type is a construction error, not
//! a silent no-op at call time.
//!
//! ## Architectural Layer
//!
//! **Client.** Request shaping lives here; HTTP transport is supplied through
//! [`contracts::HttpTransport`] (by default `transport::ReqwestTransport`).
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`backend`] | `ServiceType`, `BackendKind`, and the per-dialect request builders |
//! | [`request`] | `GenerationParams`, `ChatMessage`, `ChatRole` |
//! | [`client`] | `InferenceClient` and its builder |

pub mod backend;
pub mod client;
pub mod request;

pub use backend::{BackendKind, ServiceType};
pub use client::{InferenceClient, InferenceClientBuilder};
pub use request::{ChatMessage, ChatRole, GenerationParams};

/// Inference server address used by the reference in-cluster deployment.
pub const DEFAULT_BASE_URL: &str = "http://vllm-inference-server.inference.svc.cluster.local:8000";
