//! Port adapters backed by the Ollama client.
//!
//! One adapter implements both [`InterpreterPort`] and [`PlannerPort`];
//! they differ only in prompt and response schema.

use async_trait::async_trait;
use tracing::debug;

use nlmake_application::ports::{
    InterpretationError, InterpretationRequest, InterpreterPort, PlannerPort, TaskKind,
};
use nlmake_domain::{
    Interpretation, TaskSpec, parse_interpretation, parse_plan_steps, parse_task_specs,
};

use crate::llm::client::OllamaClient;
use crate::llm::prompts;

pub struct OllamaInterpreter {
    client: OllamaClient,
}

impl OllamaInterpreter {
    pub fn new(client: OllamaClient) -> Self {
        OllamaInterpreter { client }
    }
}

#[async_trait]
impl InterpreterPort for OllamaInterpreter {
    async fn interpret(
        &self,
        request: InterpretationRequest,
    ) -> Result<Interpretation, InterpretationError> {
        let prompt = match request.kind {
            TaskKind::Route => prompts::routing_prompt(&request.text, &request.context),
            TaskKind::CorrectError => {
                prompts::correction_prompt(&request.text, &request.context)
            }
        };
        let raw = self.client.generate(&prompt).await?;
        debug!(bytes = raw.len(), "interpretation response received");
        parse_interpretation(&raw)
            .map_err(|e| InterpretationError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl PlannerPort for OllamaInterpreter {
    async fn decompose(
        &self,
        goal: &str,
        context: &str,
    ) -> Result<Vec<TaskSpec>, InterpretationError> {
        let raw = self
            .client
            .generate(&prompts::decompose_prompt(goal, context))
            .await?;
        parse_task_specs(&raw).map_err(|e| InterpretationError::MalformedResponse(e.to_string()))
    }

    async fn plan_steps(
        &self,
        goal: &str,
        context: &str,
    ) -> Result<Vec<String>, InterpretationError> {
        let raw = self
            .client
            .generate(&prompts::plan_steps_prompt(goal, context))
            .await?;
        parse_plan_steps(&raw).map_err(|e| InterpretationError::MalformedResponse(e.to_string()))
    }
}
