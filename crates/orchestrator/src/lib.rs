//! Multi-agent task orchestration client.
//!
//! [`TaskOrchestrationClient`] translates three intents into HTTP calls
//! against one orchestration service:
//!
//! | Operation | Method | Path | Body |
//! |-----------|--------|------|------|
//! | `create_task` | `POST` | `/tasks` | `{description, agents}` |
//! | `execute_workflow` | `POST` | `/workflows/{id}/execute` | none |
//! | `get_status` | `GET` | `/tasks/{id}/status` | none |
//!
//! Every operation issues exactly one request and returns the decoded JSON
//! body unchanged. Nothing is retried; calling `create_task` twice with the
//! same arguments creates two tasks.

use contracts::{
    AgentName, BaseUrl, ClientError, ConfigError, HttpRequest, HttpTransport, JsonApi, TaskId,
    WorkflowId,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use transport::ReqwestTransport;

/// Orchestrator address used by the reference in-cluster deployment.
pub const DEFAULT_BASE_URL: &str = "http://crewai-orchestrator.agentic.svc.cluster.local:8000";

/// Client for the task orchestration API.
#[derive(Debug, Clone)]
pub struct TaskOrchestrationClient<T = ReqwestTransport> {
    api: JsonApi<T>,
}

impl TaskOrchestrationClient<ReqwestTransport> {
    /// Creates a client for `base_url` using the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for an unusable base URL, or
    /// [`ConfigError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_transport(base_url, ReqwestTransport::new()?)
    }
}

impl<T: HttpTransport> TaskOrchestrationClient<T> {
    /// Creates a client that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for an unusable base URL.
    pub fn with_transport(
        base_url: impl Into<String>,
        transport: T,
    ) -> Result<Self, ConfigError> {
        let base_url = BaseUrl::parse(base_url)?;
        Ok(Self {
            api: JsonApi::new(base_url, transport),
        })
    }

    /// Returns the base URL this client targets.
    pub fn base_url(&self) -> &BaseUrl {
        self.api.base_url()
    }

    /// Creates a task and assigns it to `agents`.
    ///
    /// Returns the creation response verbatim; use [`task_id_of`] to read the
    /// server-assigned identifier.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidInput`] if `description` is empty (no request is
    /// sent), otherwise any error from [`JsonApi::call`].
    #[instrument(skip_all, fields(agents = agents.len()))]
    pub async fn create_task(
        &self,
        description: &str,
        agents: &[AgentName],
    ) -> Result<Value, ClientError> {
        if description.is_empty() {
            return Err(ClientError::InvalidInput {
                field: "description",
                reason: "must not be empty".to_string(),
            });
        }

        let body = json!({
            "description": description,
            "agents": agents,
        });
        let response = self
            .api
            .call(HttpRequest::post_json(self.api.url("/tasks"), body))
            .await?;

        if let Some(task_id) = task_id_of(&response) {
            info!(%task_id, "Task created");
        }
        Ok(response)
    }

    /// Starts an execution of the workflow identified by `workflow_id`.
    #[instrument(skip_all, fields(workflow_id = %workflow_id))]
    pub async fn execute_workflow(
        &self,
        workflow_id: &WorkflowId,
    ) -> Result<Value, ClientError> {
        let url = self
            .api
            .url(&format!("/workflows/{}/execute", workflow_id.as_str()));
        self.api.call(HttpRequest::post_empty(url)).await
    }

    /// Fetches the current status of a task.
    #[instrument(skip_all, fields(task_id = %task_id))]
    pub async fn get_status(&self, task_id: &TaskId) -> Result<Value, ClientError> {
        let url = self.api.url(&format!("/tasks/{}/status", task_id.as_str()));
        self.api.call(HttpRequest::get(url)).await
    }
}

/// Reads the `task_id` field of a task-creation response.
///
/// Returns `None` if the field is absent, not a string, or empty.
pub fn task_id_of(response: &Value) -> Option<TaskId> {
    response
        .get("task_id")
        .and_then(Value::as_str)
        .and_then(TaskId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::testing::RecordingTransport;
    use contracts::{HttpMethod, HttpResponse, TransportError, TransportErrorKind};
    use std::sync::Arc;

    const BASE: &str = "http://orchestrator:8000";

    type TestClient = TaskOrchestrationClient<Arc<RecordingTransport>>;

    fn client(transport: RecordingTransport) -> (TestClient, Arc<RecordingTransport>) {
        let transport = Arc::new(transport);
        let client =
            TaskOrchestrationClient::with_transport(BASE, Arc::clone(&transport)).unwrap();
        (client, transport)
    }

    fn agents(names: &[&str]) -> Vec<AgentName> {
        names.iter().map(|n| AgentName::new(*n).unwrap()).collect()
    }

    #[tokio::test]
    async fn create_task_posts_description_and_agents() {
        let reply = json!({"task_id": "task-42", "status": "pending"});
        let (client, transport) = client(RecordingTransport::new().reply_json(reply.clone()));

        let team = agents(&["researcher", "writer"]);
        let response = client
            .create_task("Research the latest developments", &team)
            .await
            .unwrap();

        assert_eq!(response, reply);
        let request = transport.single_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://orchestrator:8000/tasks");
        assert_eq!(
            request.body,
            Some(json!({
                "description": "Research the latest developments",
                "agents": ["researcher", "writer"],
            }))
        );
    }

    #[tokio::test]
    async fn create_task_accepts_an_empty_agent_list() {
        let (client, transport) = client(RecordingTransport::new());
        client.create_task("Review", &[]).await.unwrap();
        assert_eq!(
            transport.single_request().body,
            Some(json!({"description": "Review", "agents": []}))
        );
    }

    #[tokio::test]
    async fn create_task_rejects_empty_description_without_sending() {
        let (client, transport) = client(RecordingTransport::new());

        let err = client
            .create_task("", &agents(&["writer"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::InvalidInput {
                field: "description",
                ..
            }
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn identical_create_calls_send_two_requests() {
        let (client, transport) = client(RecordingTransport::new());
        let team = agents(&["researcher"]);
        client.create_task("same", &team).await.unwrap();
        client.create_task("same", &team).await.unwrap();
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn execute_workflow_interpolates_id_verbatim() {
        let reply = json!({"state": "running"});
        let (client, transport) = client(RecordingTransport::new().reply_json(reply));
        let id = WorkflowId::new("research writing/v2%20").unwrap();

        let response = client.execute_workflow(&id).await.unwrap();

        assert_eq!(response, json!({"state": "running"}));
        let request = transport.single_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url,
            "http://orchestrator:8000/workflows/research writing/v2%20/execute"
        );
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn get_status_issues_bodiless_get() {
        let reply = json!({"status": "done"});
        let (client, transport) = client(RecordingTransport::new().reply_json(reply));
        let id = TaskId::new("task-42").unwrap();

        let response = client.get_status(&id).await.unwrap();

        assert_eq!(response["status"], "done");
        let request = transport.single_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://orchestrator:8000/tasks/task-42/status");
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn not_found_surfaces_as_status_error() {
        let reply = HttpResponse::new(404, "unknown task");
        let (client, _) = client(RecordingTransport::new().reply(reply));
        let err = client
            .get_status(&TaskId::new("nope").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let refused = TransportError::new(TransportErrorKind::Connect, "refused");
        let (client, _) = client(RecordingTransport::new().fail(refused));
        let err = client
            .execute_workflow(&WorkflowId::new("wf").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn trailing_slash_on_base_url_is_tolerated() {
        let client = TaskOrchestrationClient::with_transport(
            "http://orchestrator:8000/",
            RecordingTransport::new(),
        )
        .unwrap();
        assert_eq!(
            client.base_url().join("/tasks"),
            "http://orchestrator:8000/tasks"
        );
    }

    #[test]
    fn task_id_is_read_from_creation_response() {
        assert_eq!(task_id_of(&json!({"task_id": "t-1"})), TaskId::new("t-1"));
        assert_eq!(task_id_of(&json!({"task_id": 7})), None);
        assert_eq!(task_id_of(&json!({"task_id": ""})), None);
        assert_eq!(task_id_of(&json!({})), None);
    }
}
