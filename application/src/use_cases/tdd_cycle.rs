//! TDD cycle use case: drive a coding goal through plan approval and the
//! red/green/refactor loop.
//!
//! The domain machine owns the legal transitions; this use case owns the
//! side effects around them: asking the planner for steps, dispatching
//! authoring work to the coding specialist, running verification, keeping
//! the plan artifact current after every transition, and putting the two
//! human gates (plan approval, cleanup approval) in front of the user.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use nlmake_domain::{
    AgentTask, HumanDecision, Specialist, TddError, TddMachine, TddPhase, TddPlan,
};

use crate::config::ExecutionParams;
use crate::ports::{
    ConfirmationError, ConfirmationPort, InterpretationError, PlanArtifactStore, PlannerPort,
    RunnerError, SpecialistPort, VerificationPort,
};

#[derive(Error, Debug)]
pub enum TddCycleError {
    #[error("Step planning failed: {0}")]
    Planning(#[from] InterpretationError),

    #[error(transparent)]
    Machine(#[from] TddError),

    #[error("Plan rejected by user")]
    PlanRejected,

    #[error("Step {step}: verification never failed, the new check proves nothing")]
    RedNeverFailed { step: usize },

    #[error("Step {step}: verification kept failing in the {phase} phase")]
    VerificationExhausted { phase: &'static str, step: usize },

    #[error("Step {step}: coding specialist failed in the {phase} phase: {output}")]
    CoderFailed {
        phase: &'static str,
        step: usize,
        output: String,
    },

    #[error("Verification run failed: {0}")]
    Verifier(#[from] RunnerError),

    #[error("Could not persist plan artifact: {0}")]
    Artifact(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<ConfirmationError> for TddCycleError {
    fn from(error: ConfirmationError) -> Self {
        match error {
            ConfirmationError::Cancelled => TddCycleError::Cancelled,
            ConfirmationError::Io(msg) => TddCycleError::Artifact(msg),
        }
    }
}

/// Final report of a completed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TddOutcome {
    pub steps_completed: usize,
    pub artifact_retained: bool,
    pub summary: String,
}

pub struct TddCycleUseCase {
    planner: Arc<dyn PlannerPort>,
    coder: Arc<dyn SpecialistPort>,
    verifier: Arc<dyn VerificationPort>,
    confirmation: Arc<dyn ConfirmationPort>,
    store: Arc<dyn PlanArtifactStore>,
    params: ExecutionParams,
}

impl TddCycleUseCase {
    pub fn new(
        planner: Arc<dyn PlannerPort>,
        coder: Arc<dyn SpecialistPort>,
        verifier: Arc<dyn VerificationPort>,
        confirmation: Arc<dyn ConfirmationPort>,
        store: Arc<dyn PlanArtifactStore>,
        params: ExecutionParams,
    ) -> Self {
        TddCycleUseCase {
            planner,
            coder,
            verifier,
            confirmation,
            store,
            params,
        }
    }

    pub async fn execute(&self, goal: &str, context: &str) -> Result<TddOutcome, TddCycleError> {
        let steps = self.planner.plan_steps(goal, context).await?;
        let plan = TddPlan::new(goal, steps)?;
        info!(steps = plan.len(), goal, "TDD plan drafted");

        let mut machine = TddMachine::new();
        machine.install_plan(plan)?;
        self.persist(&machine)?;

        match self
            .confirmation
            .approve_plan(&machine.render_artifact())
            .await?
        {
            HumanDecision::Approve => machine.approve_plan()?,
            HumanDecision::Deny => return Err(TddCycleError::PlanRejected),
        }
        self.persist(&machine)?;

        while machine.phase() == TddPhase::Red {
            let step = machine.cursor() + 1;
            let description = machine
                .current_step_description()
                .unwrap_or_default()
                .to_string();
            debug!(step, %description, "starting step");

            self.red_phase(&mut machine, goal, &description, step).await?;
            self.persist(&machine)?;

            self.passing_phase(&mut machine, goal, &description, step, TddPhase::Green)
                .await?;
            self.persist(&machine)?;

            self.passing_phase(&mut machine, goal, &description, step, TddPhase::Refactor)
                .await?;
            self.persist(&machine)?;
        }

        let decision = self
            .confirmation
            .approve_cleanup(&self.store.path().display().to_string())
            .await?;
        let discard = decision.is_approve();
        machine.resolve_cleanup(discard)?;
        if discard {
            if let Err(error) = self.store.discard() {
                warn!(%error, "could not remove plan artifact");
            }
        } else {
            self.persist(&machine)?;
        }

        let steps_completed = machine.cursor();
        Ok(TddOutcome {
            steps_completed,
            artifact_retained: machine.artifact_retained(),
            summary: format!("completed {steps_completed} TDD steps for: {goal}"),
        })
    }

    /// Author a failing check and confirm it actually fails.
    async fn red_phase(
        &self,
        machine: &mut TddMachine,
        goal: &str,
        description: &str,
        step: usize,
    ) -> Result<(), TddCycleError> {
        let task = authoring_task(
            "red",
            step,
            format!("Write a failing test for: {description} (goal: {goal})"),
        );
        for attempt in 0..=self.params.max_verify_retries {
            let authored = self.coder.execute(&task).await;
            if !authored.success {
                if attempt == self.params.max_verify_retries {
                    return Err(TddCycleError::CoderFailed {
                        phase: "red",
                        step,
                        output: authored.output,
                    });
                }
                continue;
            }
            let outcome = self.verifier.verify().await?;
            match machine.observe_red(&outcome) {
                Ok(()) => return Ok(()),
                Err(TddError::RedDidNotFail) => {
                    warn!(step, attempt, "verification passed before implementation");
                }
                Err(error) => return Err(error.into()),
            }
        }
        Err(TddCycleError::RedNeverFailed { step })
    }

    /// Green and refactor share a shape: author, then verification must
    /// pass, with bounded re-entry on failure.
    async fn passing_phase(
        &self,
        machine: &mut TddMachine,
        goal: &str,
        description: &str,
        step: usize,
        phase: TddPhase,
    ) -> Result<(), TddCycleError> {
        let (name, instruction): (&'static str, String) = match phase {
            TddPhase::Green => (
                "green",
                format!("Implement the minimum to pass: {description} (goal: {goal})"),
            ),
            _ => (
                "refactor",
                format!("Refactor the code for: {description}, keeping all tests passing"),
            ),
        };

        for attempt in 0..=self.params.max_verify_retries {
            // Refactor authoring is optional; verification still has to pass.
            let author = name == "green" || self.params.refactor_enabled;
            if author {
                let task = authoring_task(name, step, instruction.clone());
                let authored = self.coder.execute(&task).await;
                if !authored.success {
                    if attempt == self.params.max_verify_retries {
                        return Err(TddCycleError::CoderFailed {
                            phase: name,
                            step,
                            output: authored.output,
                        });
                    }
                    continue;
                }
            }

            let outcome = self.verifier.verify().await?;
            let observed = match phase {
                TddPhase::Green => machine.observe_green(&outcome),
                _ => machine.observe_refactor(&outcome),
            };
            match observed {
                Ok(()) => return Ok(()),
                Err(TddError::VerificationFailed { .. }) => {
                    warn!(step, attempt, phase = name, "verification failed, retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }
        Err(TddCycleError::VerificationExhausted { phase: name, step })
    }

    fn persist(&self, machine: &TddMachine) -> Result<(), TddCycleError> {
        self.store
            .persist(&machine.render_artifact())
            .map_err(|e| TddCycleError::Artifact(e.to_string()))
    }
}

fn authoring_task(phase: &str, step: usize, instruction: String) -> AgentTask {
    AgentTask::new(format!("tdd-{phase}-{step}"), instruction, Specialist::Coding)
}
