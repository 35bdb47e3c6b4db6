//! Delegation use case: decompose a goal and dispatch tasks to
//! specialists, sequentially, with per-task failure isolation.
//!
//! Dispatch order is the planner's submission order. A failed task is
//! recorded and the run moves on; only a user cancellation (Ctrl+C at a
//! gate) aborts the whole run. Tasks aimed at mutating specialists pass
//! through the confirmation gate first; a denial fails that task only.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use nlmake_domain::{
    AgentTask, DelegationReport, HumanDecision, Specialist, SpecialistOutcome, TaskMode, TaskSpec,
};

use crate::config::SafetyConfig;
use crate::ports::{
    ConfirmationError, ConfirmationPort, InterpretationError, PlannerPort, SpecialistRegistry,
};
use crate::use_cases::tdd_cycle::TddCycleUseCase;

#[derive(Error, Debug)]
pub enum DelegationError {
    #[error("Task decomposition failed: {0}")]
    Decomposition(#[from] InterpretationError),

    #[error("Decomposition produced no tasks")]
    EmptyDecomposition,

    #[error("Operation cancelled")]
    Cancelled,
}

pub struct DelegateUseCase {
    planner: Arc<dyn PlannerPort>,
    registry: SpecialistRegistry,
    confirmation: Arc<dyn ConfirmationPort>,
    safety: SafetyConfig,
    tdd: Option<Arc<TddCycleUseCase>>,
}

impl DelegateUseCase {
    pub fn new(
        planner: Arc<dyn PlannerPort>,
        registry: SpecialistRegistry,
        confirmation: Arc<dyn ConfirmationPort>,
        safety: SafetyConfig,
    ) -> Self {
        DelegateUseCase {
            planner,
            registry,
            confirmation,
            safety,
            tdd: None,
        }
    }

    /// Enable TDD-mode coding tasks.
    pub fn with_tdd(mut self, tdd: Arc<TddCycleUseCase>) -> Self {
        self.tdd = Some(tdd);
        self
    }

    pub async fn execute(
        &self,
        goal: &str,
        context: &str,
    ) -> Result<DelegationReport, DelegationError> {
        let specs = self.planner.decompose(goal, context).await?;
        if specs.is_empty() {
            return Err(DelegationError::EmptyDecomposition);
        }
        info!(tasks = specs.len(), goal, "goal decomposed");

        let mut report = DelegationReport::new(goal);
        for (index, spec) in specs.into_iter().enumerate() {
            let task = task_from_spec(index, spec);
            let task = self.dispatch(task).await?;
            report.push(task);
        }
        Ok(report)
    }

    /// Run one task to its final status. Only cancellation escapes as an
    /// error; every other failure lands in the task status.
    async fn dispatch(&self, mut task: AgentTask) -> Result<AgentTask, DelegationError> {
        let Some(port) = self.registry.get(task.specialist) else {
            task.fail(format!(
                "no specialist registered for '{}'",
                task.specialist
            ));
            return Ok(task);
        };

        if port.mutates_state() && self.safety.confirm_mutating {
            match self.confirmation.confirm_task(&task).await {
                Ok(HumanDecision::Approve) => {}
                Ok(HumanDecision::Deny) => {
                    task.fail("declined by user");
                    return Ok(task);
                }
                Err(ConfirmationError::Cancelled) => return Err(DelegationError::Cancelled),
                Err(ConfirmationError::Io(msg)) => {
                    // No clean answer means no dispatch.
                    task.fail(format!("confirmation unavailable: {msg}"));
                    return Ok(task);
                }
            }
        }

        task.start();
        let outcome = self.run(&task).await;
        if outcome.success {
            task.succeed(outcome.output);
        } else {
            warn!(task = %task.id, "task failed, continuing with remaining tasks");
            task.fail(outcome.output);
        }
        Ok(task)
    }

    async fn run(&self, task: &AgentTask) -> SpecialistOutcome {
        if task.mode == TaskMode::Tdd && task.specialist == Specialist::Coding {
            if let Some(tdd) = &self.tdd {
                return match tdd.execute(&task.goal, "").await {
                    Ok(outcome) => SpecialistOutcome::success(outcome.summary),
                    Err(error) => SpecialistOutcome::failure(error.to_string()),
                };
            }
        }
        // Registry membership was checked in dispatch.
        match self.registry.get(task.specialist) {
            Some(port) => port.execute(task).await,
            None => SpecialistOutcome::failure("specialist disappeared mid-run"),
        }
    }
}

fn task_from_spec(index: usize, spec: TaskSpec) -> AgentTask {
    let mut task = AgentTask::new(format!("task-{}", index + 1), spec.goal, spec.specialist)
        .with_mode(spec.mode);
    task.params = spec.params;
    task
}
