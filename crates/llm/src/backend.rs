//! Backend dialects and the request shapes they expect.
//!
//! Three inference servers are supported through two wire dialects:
//!
//! | [`ServiceType`] | [`BackendKind`] | `generate` route |
//! |-----------------|-----------------|------------------|
//! | `vllm` | OpenAI-compatible | `POST /v1/completions` |
//! | `tgi` | OpenAI-compatible | `POST /v1/completions` |
//! | `triton` | tensor protocol | `POST /v2/models/{model}/infer` |
//!
//! The dialect is resolved once, when the client is built. Chat requests always
//! use the OpenAI-compatible `POST /v1/chat/completions` route; see
//! [`chat_request`].

use std::str::FromStr;

use contracts::{BaseUrl, ConfigError, HttpRequest, ModelName};
use serde_json::json;

use crate::{ChatMessage, GenerationParams};

// ---------------------------------------------------------------------------
// Service type
// ---------------------------------------------------------------------------

/// Named inference server flavour, as configured by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceType {
    /// vLLM (OpenAI-compatible server).
    #[default]
    Vllm,
    /// Hugging Face Text Generation Inference (OpenAI-compatible messages API).
    Tgi,
    /// NVIDIA Triton Inference Server (KServe v2 tensor protocol).
    Triton,
}

impl ServiceType {
    /// Returns the wire dialect this server speaks for `generate`.
    pub fn backend_kind(self) -> BackendKind {
        match self {
            ServiceType::Vllm | ServiceType::Tgi => BackendKind::OpenAiCompatible,
            ServiceType::Triton => BackendKind::TensorProtocol,
        }
    }

    /// Returns the lowercase configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Vllm => "vllm",
            ServiceType::Tgi => "tgi",
            ServiceType::Triton => "triton",
        }
    }
}

impl FromStr for ServiceType {
    type Err = ConfigError;

    /// Parses exactly `vllm`, `tgi`, or `triton`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vllm" => Ok(ServiceType::Vllm),
            "tgi" => Ok(ServiceType::Tgi),
            "triton" => Ok(ServiceType::Triton),
            _ => Err(ConfigError::UnsupportedBackendKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Backend kind
// ---------------------------------------------------------------------------

/// Wire dialect for completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// `POST /v1/completions` with `{model, prompt, max_tokens, temperature}`.
    OpenAiCompatible,
    /// `POST /v2/models/{model}/infer` with a tensor envelope.
    TensorProtocol,
}

impl BackendKind {
    /// Builds the completion request for `prompt` in this dialect.
    ///
    /// The tensor protocol has no sampling fields in its envelope, so `params`
    /// only affects the OpenAI-compatible shape.
    pub fn completion_request(
        self,
        base_url: &BaseUrl,
        model: &ModelName,
        prompt: &str,
        params: &GenerationParams,
    ) -> HttpRequest {
        match self {
            BackendKind::OpenAiCompatible => HttpRequest::post_json(
                base_url.join("/v1/completions"),
                json!({
                    "model": model,
                    "prompt": prompt,
                    "max_tokens": params.max_tokens,
                    "temperature": params.temperature,
                }),
            ),
            BackendKind::TensorProtocol => HttpRequest::post_json(
                base_url.join(&format!("/v2/models/{}/infer", model.as_str())),
                json!({
                    "inputs": [{
                        "name": "text_input",
                        "shape": [1],
                        "datatype": "BYTES",
                        "data": [prompt],
                    }],
                    "outputs": [{ "name": "text_output" }],
                }),
            ),
        }
    }
}

/// Builds an OpenAI-compatible chat completion request.
///
/// Used for every backend kind, including the tensor protocol.
pub fn chat_request(
    base_url: &BaseUrl,
    model: &ModelName,
    messages: &[ChatMessage],
    params: &GenerationParams,
) -> HttpRequest {
    HttpRequest::post_json(
        base_url.join("/v1/chat/completions"),
        json!({
            "model": model,
            "messages": messages,
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::HttpMethod;

    fn base() -> BaseUrl {
        BaseUrl::parse("http://inference:8000").unwrap()
    }

    #[test]
    fn service_types_parse_their_exact_names() {
        assert_eq!("vllm".parse::<ServiceType>().unwrap(), ServiceType::Vllm);
        assert_eq!("tgi".parse::<ServiceType>().unwrap(), ServiceType::Tgi);
        assert_eq!("triton".parse::<ServiceType>().unwrap(), ServiceType::Triton);
    }

    #[test]
    fn other_spellings_are_rejected() {
        for spelling in [" VLLM ", "Triton", "tgi "] {
            let err = spelling.parse::<ServiceType>().unwrap_err();
            assert!(matches!(err, ConfigError::UnsupportedBackendKind(ref v) if v == spelling));
        }
    }

    #[test]
    fn unknown_service_type_is_rejected() {
        let err = "onnx".parse::<ServiceType>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedBackendKind(ref v) if v == "onnx"));
        assert!("".parse::<ServiceType>().is_err());
    }

    #[test]
    fn service_types_map_onto_two_dialects() {
        assert_eq!(ServiceType::Vllm.backend_kind(), BackendKind::OpenAiCompatible);
        assert_eq!(ServiceType::Tgi.backend_kind(), BackendKind::OpenAiCompatible);
        assert_eq!(ServiceType::Triton.backend_kind(), BackendKind::TensorProtocol);
        assert_eq!(ServiceType::default(), ServiceType::Vllm);
    }

    #[test]
    fn openai_completion_shape() {
        let request = BackendKind::OpenAiCompatible.completion_request(
            &base(),
            &ModelName::default(),
            "X",
            &GenerationParams::new(50, 0.5),
        );

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://inference:8000/v1/completions");
        assert_eq!(
            request.body,
            Some(json!({"model": "llama2-7b", "prompt": "X", "max_tokens": 50, "temperature": 0.5}))
        );
    }

    #[test]
    fn tensor_envelope_shape() {
        let request = BackendKind::TensorProtocol.completion_request(
            &base(),
            &ModelName::default(),
            "X",
            &GenerationParams::default(),
        );

        assert_eq!(request.url, "http://inference:8000/v2/models/llama2-7b/infer");
        let body = request.body.unwrap();
        let input = &body["inputs"][0];
        assert_eq!(input["name"], "text_input");
        assert_eq!(input["shape"], json!([1]));
        assert_eq!(input["datatype"], "BYTES");
        assert_eq!(input["data"], json!(["X"]));
        assert_eq!(body["outputs"], json!([{"name": "text_output"}]));
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[test]
    fn tensor_route_uses_configured_model() {
        let model = ModelName::new("mistral-7b").unwrap();
        let request = BackendKind::TensorProtocol.completion_request(
            &base(),
            &model,
            "p",
            &GenerationParams::default(),
        );
        assert_eq!(request.url, "http://inference:8000/v2/models/mistral-7b/infer");
    }

    #[test]
    fn chat_shape() {
        let request = chat_request(
            &base(),
            &ModelName::default(),
            &[ChatMessage::user("Explain transformer architecture")],
            &GenerationParams::default().with_max_tokens(200),
        );

        assert_eq!(request.url, "http://inference:8000/v1/chat/completions");
        assert_eq!(
            request.body,
            Some(json!({
                "model": "llama2-7b",
                "messages": [{"role": "user", "content": "Explain transformer architecture"}],
                "max_tokens": 200,
                "temperature": 0.7,
            }))
        );
    }
}
