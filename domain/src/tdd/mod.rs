//! Test-driven development cycle: step plan, phase machine, and the
//! parsing of planner responses into step lists.

pub mod machine;
pub mod plan;

pub use machine::{TddError, TddMachine, TddPhase, VerificationOutcome};
pub use plan::{StepStatus, TddPlan, TddStep, parse_plan_steps};
