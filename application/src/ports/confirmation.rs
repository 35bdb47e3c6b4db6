//! Confirmation port for human approval gates.
//!
//! Four gates share this port: mutating specialist dispatch, CLI error
//! corrections, TDD plan approval, and TDD cleanup approval. The
//! interactive implementation lives in the presentation layer.

use async_trait::async_trait;
use nlmake_domain::{AgentTask, HumanDecision};
use thiserror::Error;

/// Failures of the confirmation process itself, as opposed to a `Deny`
/// decision from the user.
#[derive(Error, Debug, Clone)]
pub enum ConfirmationError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for asking the user to approve an action before it happens.
#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    /// Gate before dispatching a task to a mutating specialist.
    async fn confirm_task(&self, task: &AgentTask) -> Result<HumanDecision, ConfirmationError>;

    /// Gate before executing a suggested correction for a failed CLI
    /// parse. Implementations must put a real question to the user;
    /// corrections are never pre-approved.
    async fn confirm_correction(&self, suggested: &str)
    -> Result<HumanDecision, ConfirmationError>;

    /// Gate between TDD planning and the first red phase.
    async fn approve_plan(&self, rendered_plan: &str)
    -> Result<HumanDecision, ConfirmationError>;

    /// Gate at the end of a TDD run: approve discarding the plan artifact.
    async fn approve_cleanup(
        &self,
        artifact_path: &str,
    ) -> Result<HumanDecision, ConfirmationError>;
}
