//! The inference client and its builder.

use contracts::{BaseUrl, ClientError, ConfigError, HttpTransport, JsonApi, ModelName};
use serde_json::Value;
use tracing::{debug, instrument};
use transport::ReqwestTransport;

use crate::backend::chat_request;
use crate::{BackendKind, ChatMessage, GenerationParams, ServiceType};

/// Text-generation client for one inference server.
///
/// The server's [`ServiceType`], and therefore its [`BackendKind`], is fixed at
/// construction. Each operation sends exactly one request and returns the
/// decoded JSON body unchanged.
#[derive(Debug, Clone)]
pub struct InferenceClient<T = ReqwestTransport> {
    api: JsonApi<T>,
    service_type: ServiceType,
    backend: BackendKind,
    model: ModelName,
}

impl InferenceClient<ReqwestTransport> {
    /// Creates a client for `base_url` speaking the dialect named by
    /// `service_type` (`vllm`, `tgi`, or `triton`), with the default model.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedBackendKind`] for any other `service_type`;
    /// [`ConfigError::InvalidBaseUrl`] or [`ConfigError::Transport`] otherwise.
    pub fn new(base_url: impl Into<String>, service_type: &str) -> Result<Self, ConfigError> {
        Self::builder(base_url).service_type(service_type).build()
    }

    /// Starts a builder for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> InferenceClientBuilder {
        InferenceClientBuilder::new(base_url)
    }
}

impl<T: HttpTransport> InferenceClient<T> {
    /// Returns the configured server flavour.
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Returns the wire dialect used by [`generate`](Self::generate).
    pub fn backend_kind(&self) -> BackendKind {
        self.backend
    }

    /// Returns the model addressed by every request.
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    /// Returns the base URL this client targets.
    pub fn base_url(&self) -> &BaseUrl {
        self.api.base_url()
    }

    /// Generates text from `prompt` using the configured backend dialect.
    ///
    /// Pass [`GenerationParams::default()`] for `max_tokens = 100`,
    /// `temperature = 0.7`.
    #[instrument(
        skip_all,
        fields(
            backend = ?self.backend,
            model = %self.model,
            max_tokens = params.max_tokens,
            temperature = params.temperature,
        )
    )]
    pub async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<Value, ClientError> {
        let request = self
            .backend
            .completion_request(self.api.base_url(), &self.model, prompt, &params);
        self.api.call(request).await
    }

    /// Sends a chat completion request.
    ///
    /// Always uses the OpenAI-compatible `/v1/chat/completions` route, even
    /// when the client was configured for the tensor protocol.
    #[instrument(
        skip_all,
        fields(
            model = %self.model,
            messages = messages.len(),
            max_tokens = params.max_tokens,
            temperature = params.temperature,
        )
    )]
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<Value, ClientError> {
        if self.backend != BackendKind::OpenAiCompatible {
            debug!(
                service_type = %self.service_type,
                "Chat uses the OpenAI-compatible route for every backend"
            );
        }
        let request = chat_request(self.api.base_url(), &self.model, messages, &params);
        self.api.call(request).await
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures an [`InferenceClient`].
///
/// Validation (base URL, service type) happens in [`build`](Self::build) and
/// [`build_with_transport`](Self::build_with_transport), never at call time.
#[derive(Debug, Clone)]
pub struct InferenceClientBuilder {
    base_url: String,
    service_type: String,
    model: ModelName,
}

impl InferenceClientBuilder {
    /// Starts a builder with service type `vllm` and the default model.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_type: ServiceType::default().as_str().to_string(),
            model: ModelName::default(),
        }
    }

    /// Sets the server flavour by name (`vllm`, `tgi`, or `triton`).
    #[must_use]
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Sets the model name (default `llama2-7b`).
    #[must_use]
    pub fn model(mut self, model: ModelName) -> Self {
        self.model = model;
        self
    }

    /// Builds a client over the default reqwest transport.
    pub fn build(self) -> Result<InferenceClient<ReqwestTransport>, ConfigError> {
        // Resolve the service type first so an unsupported kind is reported
        // even if the transport would also fail.
        self.service_type.parse::<ServiceType>()?;
        self.build_with_transport(ReqwestTransport::new()?)
    }

    /// Builds a client over `transport`.
    pub fn build_with_transport<T: HttpTransport>(
        self,
        transport: T,
    ) -> Result<InferenceClient<T>, ConfigError> {
        let service_type: ServiceType = self.service_type.parse()?;
        let base_url = BaseUrl::parse(self.base_url)?;
        let backend = service_type.backend_kind();

        debug!(
            %base_url,
            %service_type,
            ?backend,
            model = %self.model,
            "Inference client configured"
        );

        Ok(InferenceClient {
            api: JsonApi::new(base_url, transport),
            service_type,
            backend,
            model: self.model,
        })
    }
}
