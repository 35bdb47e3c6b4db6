//! Planner port
//!
//! Decomposes a goal into specialist tasks (for delegation) or into an
//! ordered step list (for the TDD cycle). Shares the interpreter's error
//! type since both talk to the same model service.

use async_trait::async_trait;
use nlmake_domain::TaskSpec;

use crate::ports::interpreter::InterpretationError;

/// Port for goal decomposition.
#[async_trait]
pub trait PlannerPort: Send + Sync {
    /// Decompose a goal into an ordered list of specialist tasks.
    async fn decompose(
        &self,
        goal: &str,
        context: &str,
    ) -> Result<Vec<TaskSpec>, InterpretationError>;

    /// Break a coding goal into ordered TDD step descriptions.
    async fn plan_steps(
        &self,
        goal: &str,
        context: &str,
    ) -> Result<Vec<String>, InterpretationError>;
}
