//! `agentctl`: demonstration harness for the service clients.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** from flags, with environment fallbacks for base
//!    URLs (`AGENTCTL_ORCHESTRATOR_URL`, `AGENTCTL_INFERENCE_URL`).
//! 2. **Wire observability** via [`telemetry::init`].
//! 3. **Construct clients** ([`TaskOrchestrationClient`], [`InferenceClient`])
//!    and run one demo flow.
//!
//! Subcommands:
//!
//! - `workflow` creates a research, a writing, and a review task, then executes
//!   the research-writing workflow.
//! - `task-status` fetches the status of one task.
//! - `generate` runs a single completion against vLLM, TGI, or Triton.
//! - `chat` sends one user message to a chat completion endpoint.

mod telemetry;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use contracts::{AgentName, TaskId, WorkflowId};
use llm::{ChatMessage, GenerationParams, InferenceClient};
use orchestrator::{task_id_of, TaskOrchestrationClient};
use serde_json::Value;
use tracing::info;

use crate::telemetry::LogFormat;

#[derive(Debug, Parser)]
#[command(
    name = "agentctl",
    version,
    about = "Call the agent orchestration and inference services"
)]
struct Cli {
    /// Stderr log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// OTLP gRPC endpoint for span export (disabled when unset).
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the research, writing, and review tasks, then execute the workflow.
    Workflow {
        #[command(flatten)]
        orchestrator: OrchestratorArgs,

        /// Workflow to execute once the tasks exist.
        #[arg(long, default_value = "research-writing-workflow")]
        workflow_id: String,
    },

    /// Print the status of one task.
    TaskStatus {
        #[command(flatten)]
        orchestrator: OrchestratorArgs,

        /// Server-assigned task identifier.
        #[arg(long)]
        task_id: String,
    },

    /// Generate a completion for PROMPT.
    Generate {
        #[command(flatten)]
        inference: InferenceArgs,

        /// Server flavour: vllm, tgi, or triton.
        #[arg(long, default_value = "vllm")]
        service_type: String,

        #[arg(long, default_value_t = 150)]
        max_tokens: u32,

        prompt: String,
    },

    /// Send MESSAGE as a single user turn to the chat endpoint.
    Chat {
        #[command(flatten)]
        inference: InferenceArgs,

        #[arg(long, default_value_t = 200)]
        max_tokens: u32,

        message: String,
    },
}

#[derive(Debug, Args)]
struct OrchestratorArgs {
    /// Orchestration service base URL.
    #[arg(long, env = "AGENTCTL_ORCHESTRATOR_URL", default_value = orchestrator::DEFAULT_BASE_URL)]
    base_url: String,
}

#[derive(Debug, Args)]
struct InferenceArgs {
    /// Inference service base URL.
    #[arg(long, env = "AGENTCTL_INFERENCE_URL", default_value = llm::DEFAULT_BASE_URL)]
    base_url: String,

    /// Model name sent with every request.
    #[arg(long, default_value = contracts::ModelName::DEFAULT)]
    model: String,

    /// Sampling temperature.
    #[arg(long, default_value_t = GenerationParams::DEFAULT_TEMPERATURE)]
    temperature: f64,
}

impl InferenceArgs {
    fn client(&self, service_type: &str) -> anyhow::Result<InferenceClient> {
        let model = contracts::ModelName::new(self.model.as_str())
            .context("--model must not be empty")?;
        InferenceClient::builder(self.base_url.as_str())
            .service_type(service_type)
            .model(model)
            .build()
            .context("failed to configure inference client")
    }

    fn params(&self, max_tokens: u32) -> GenerationParams {
        GenerationParams::new(max_tokens, self.temperature)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let telemetry = telemetry::init(cli.log_format, cli.otlp_endpoint.as_deref())?;

    let result = run(cli.command).await;

    telemetry.shutdown();
    result
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Workflow {
            orchestrator,
            workflow_id,
        } => run_workflow(&orchestrator, &workflow_id).await,

        Command::TaskStatus {
            orchestrator,
            task_id,
        } => {
            let client = TaskOrchestrationClient::new(orchestrator.base_url.as_str())?;
            let task_id = TaskId::new(task_id).context("--task-id must not be empty")?;
            print_json(&client.get_status(&task_id).await?)
        }

        Command::Generate {
            inference,
            service_type,
            max_tokens,
            prompt,
        } => {
            let client = inference.client(&service_type)?;
            print_json(&client.generate(&prompt, inference.params(max_tokens)).await?)
        }

        Command::Chat {
            inference,
            max_tokens,
            message,
        } => {
            // The chat route is the same for every flavour; vllm is as good as any.
            let client = inference.client("vllm")?;
            let messages = [ChatMessage::user(message)];
            print_json(&client.chat(&messages, inference.params(max_tokens)).await?)
        }
    }
}

async fn run_workflow(args: &OrchestratorArgs, workflow_id: &str) -> anyhow::Result<()> {
    let client = TaskOrchestrationClient::new(args.base_url.as_str())
        .context("failed to configure orchestration client")?;
    let workflow_id = WorkflowId::new(workflow_id).context("--workflow-id must not be empty")?;

    let steps = [
        ("Research", "Research the latest developments in large language models", "researcher"),
        ("Writing", "Write a comprehensive article based on the research", "writer"),
        ("Review", "Review and improve the article", "reviewer"),
    ];

    for (label, description, agent) in steps {
        let agent = AgentName::new(agent).context("agent name must not be empty")?;
        let response = client
            .create_task(description, &[agent])
            .await
            .with_context(|| format!("failed to create {label} task"))?;

        match task_id_of(&response) {
            Some(task_id) => println!("{label} task created: {task_id}"),
            None => println!("{label} task created (no task_id in response)"),
        }
    }

    info!(%workflow_id, "Executing workflow");
    let result = client
        .execute_workflow(&workflow_id)
        .await
        .with_context(|| format!("failed to execute workflow {workflow_id}"))?;
    print_json(&result)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
