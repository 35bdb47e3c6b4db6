//! The red/green/refactor cycle state machine.
//!
//! Phase order is fixed: `Planning` → `AwaitingPlanApproval`, then
//! `Red` → `Green` → `Refactor` once per step, then
//! `AwaitingCleanupApproval` → `Done`. The machine holds two invariants:
//!
//! - `Red` cannot be left until a verification run has actually failed;
//!   a passing run there means the new check proves nothing.
//! - `Green` and `Refactor` cannot be left until verification passes.
//!
//! Failed observations leave the machine in place so the caller can retry
//! with a fresh authoring attempt.

use thiserror::Error;

use crate::tdd::plan::{StepStatus, TddPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TddPhase {
    Planning,
    AwaitingPlanApproval,
    Red,
    Green,
    Refactor,
    AwaitingCleanupApproval,
    Done,
}

impl TddPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TddPhase::Planning => "planning",
            TddPhase::AwaitingPlanApproval => "awaiting_plan_approval",
            TddPhase::Red => "red",
            TddPhase::Green => "green",
            TddPhase::Refactor => "refactor",
            TddPhase::AwaitingCleanupApproval => "awaiting_cleanup_approval",
            TddPhase::Done => "done",
        }
    }
}

/// Result of one verification (test suite) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub passed: bool,
    pub output: String,
}

impl VerificationOutcome {
    pub fn passed(output: impl Into<String>) -> Self {
        VerificationOutcome {
            passed: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        VerificationOutcome {
            passed: false,
            output: output.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TddError {
    #[error("A plan needs at least one step")]
    EmptyPlan,

    #[error("Cannot {event} while in phase {phase}", phase = .phase.as_str())]
    InvalidTransition {
        phase: TddPhase,
        event: &'static str,
    },

    #[error("Verification passed, but a failing check is required before implementing")]
    RedDidNotFail,

    #[error("Verification failed in phase {phase}", phase = .phase.as_str())]
    VerificationFailed { phase: TddPhase },
}

/// The cycle state: plan, cursor, and current phase.
#[derive(Debug, Clone, PartialEq)]
pub struct TddMachine {
    plan: Option<TddPlan>,
    cursor: usize,
    phase: TddPhase,
    artifact_retained: bool,
}

impl TddMachine {
    pub fn new() -> Self {
        TddMachine {
            plan: None,
            cursor: 0,
            phase: TddPhase::Planning,
            artifact_retained: true,
        }
    }

    pub fn phase(&self) -> TddPhase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn plan(&self) -> Option<&TddPlan> {
        self.plan.as_ref()
    }

    /// Whether the persisted plan artifact survives after `Done`.
    pub fn artifact_retained(&self) -> bool {
        self.artifact_retained
    }

    pub fn current_step_description(&self) -> Option<&str> {
        let plan = self.plan.as_ref()?;
        plan.steps().get(self.cursor).map(|s| s.description.as_str())
    }

    pub fn render_artifact(&self) -> String {
        match &self.plan {
            Some(plan) => plan.render(),
            None => String::new(),
        }
    }

    /// Install the decomposed plan. Only valid while still planning.
    pub fn install_plan(&mut self, plan: TddPlan) -> Result<(), TddError> {
        if self.phase != TddPhase::Planning {
            return Err(TddError::InvalidTransition {
                phase: self.phase,
                event: "install a plan",
            });
        }
        self.plan = Some(plan);
        self.phase = TddPhase::AwaitingPlanApproval;
        Ok(())
    }

    /// The user approved the plan; begin the first step's red phase.
    pub fn approve_plan(&mut self) -> Result<(), TddError> {
        if self.phase != TddPhase::AwaitingPlanApproval {
            return Err(TddError::InvalidTransition {
                phase: self.phase,
                event: "approve the plan",
            });
        }
        self.phase = TddPhase::Red;
        Ok(())
    }

    /// Record a verification run made after authoring a failing check.
    /// The run must fail; a pass keeps the machine in `Red`.
    pub fn observe_red(&mut self, outcome: &VerificationOutcome) -> Result<(), TddError> {
        if self.phase != TddPhase::Red {
            return Err(TddError::InvalidTransition {
                phase: self.phase,
                event: "record a red verification",
            });
        }
        if outcome.passed {
            return Err(TddError::RedDidNotFail);
        }
        self.current_step_mut().status = StepStatus::Red;
        self.phase = TddPhase::Green;
        Ok(())
    }

    /// Record a verification run made after implementing. The run must
    /// pass; a failure keeps the machine in `Green` for another attempt.
    pub fn observe_green(&mut self, outcome: &VerificationOutcome) -> Result<(), TddError> {
        if self.phase != TddPhase::Green {
            return Err(TddError::InvalidTransition {
                phase: self.phase,
                event: "record a green verification",
            });
        }
        if !outcome.passed {
            return Err(TddError::VerificationFailed { phase: TddPhase::Green });
        }
        self.current_step_mut().status = StepStatus::Green;
        self.phase = TddPhase::Refactor;
        Ok(())
    }

    /// Record the verification run closing the refactor phase. On success
    /// the cursor advances; past the last step the machine waits for
    /// cleanup approval.
    pub fn observe_refactor(&mut self, outcome: &VerificationOutcome) -> Result<(), TddError> {
        if self.phase != TddPhase::Refactor {
            return Err(TddError::InvalidTransition {
                phase: self.phase,
                event: "record a refactor verification",
            });
        }
        if !outcome.passed {
            return Err(TddError::VerificationFailed {
                phase: TddPhase::Refactor,
            });
        }
        self.current_step_mut().status = StepStatus::Refactored;
        self.cursor += 1;
        let len = self.plan.as_ref().map(TddPlan::len).unwrap_or(0);
        self.phase = if self.cursor < len {
            TddPhase::Red
        } else {
            TddPhase::AwaitingCleanupApproval
        };
        Ok(())
    }

    /// Resolve the final cleanup prompt. `discard` reflects the user's
    /// decision about the plan artifact; either way the cycle is done.
    pub fn resolve_cleanup(&mut self, discard: bool) -> Result<(), TddError> {
        if self.phase != TddPhase::AwaitingCleanupApproval {
            return Err(TddError::InvalidTransition {
                phase: self.phase,
                event: "resolve cleanup",
            });
        }
        self.artifact_retained = !discard;
        self.phase = TddPhase::Done;
        Ok(())
    }

    fn current_step_mut(&mut self) -> &mut crate::tdd::plan::TddStep {
        let cursor = self.cursor;
        self.plan
            .as_mut()
            .expect("phase transitions past Planning require an installed plan")
            .step_mut(cursor)
    }
}

impl Default for TddMachine {
    fn default() -> Self {
        TddMachine::new()
    }
}
