//! Newtype identifiers for the remote services' domain concepts.
//!
//! A [`TaskId`] returned by the orchestrator and a [`WorkflowId`] chosen by the
//! caller are both strings on the wire, but they address different endpoints.
//! Wrapping each in its own type keeps them from being swapped at a call site.
//!
//! Identifiers are interpolated into request paths verbatim: no escaping, no
//! normalisation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — orchestration service
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a task created on the orchestration service.
    ///
    /// Assigned by the server in the task-creation response (`task_id` field).
    TaskId
}

string_id! {
    /// Identifies a workflow definition known to the orchestration service.
    ///
    /// Chosen by the caller (e.g. `"research-writing-workflow"`).
    WorkflowId
}

string_id! {
    /// Name of an agent that a task is assigned to (e.g. `"researcher"`).
    AgentName
}

// ---------------------------------------------------------------------------
// Identifiers — inference service
// ---------------------------------------------------------------------------

string_id! {
    /// Model addressed by inference requests.
    ///
    /// Sent as the `model` field on OpenAI-compatible routes and interpolated
    /// into the path on the tensor-protocol route.
    ModelName
}

impl ModelName {
    /// Model served by the reference inference deployments.
    pub const DEFAULT: &'static str = "llama2-7b";
}

impl Default for ModelName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Correlates the tracing output of one outgoing HTTP call.
///
/// Generated fresh for every request. It is recorded on the request span only;
/// it is never sent to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifiers_are_rejected() {
        assert!(TaskId::new("").is_none());
        assert!(WorkflowId::new(String::new()).is_none());
        assert!(AgentName::new("").is_none());
    }

    #[test]
    fn identifiers_keep_their_value_verbatim() {
        let id = WorkflowId::new("a b/c?d").unwrap();
        assert_eq!(id.as_str(), "a b/c?d");
        assert_eq!(id.to_string(), "a b/c?d");
    }

    #[test]
    fn model_name_defaults_to_reference_model() {
        assert_eq!(ModelName::default().as_str(), "llama2-7b");
    }

    #[test]
    fn identifiers_serialize_as_plain_strings() {
        let agent = AgentName::new("researcher").unwrap();
        assert_eq!(serde_json::to_value(&agent).unwrap(), serde_json::json!("researcher"));
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::new_random(), RequestId::new_random());
    }
}
