//! Domain layer for nlmake
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! Every natural-language request is interpreted by a model and routed by
//! confidence: high confidence executes, uncertainty disambiguates, an
//! empty interpretation of a task-like request delegates to specialists,
//! and a failed CLI parse gets a suggested correction.
//!
//! ## Delegation
//!
//! Multi-step goals are decomposed into tasks for capability-scoped
//! specialists (terminal, coding, web, build system, file system) and
//! dispatched sequentially with per-task failure isolation.
//!
//! ## TDD cycle
//!
//! Coding tasks can run through an explicit red/green/refactor state
//! machine with human approval gates at plan time and cleanup time.

pub mod buildfile;
pub mod core;
pub mod delegation;
pub mod interpret;
pub mod routing;
pub mod session;
pub mod tdd;

// Re-export commonly used types
pub use buildfile::{BuildFileDocument, Target};
pub use core::{decision::HumanDecision, error::DomainError};
pub use delegation::{
    AgentTask, DelegationReport, Specialist, SpecialistOutcome, TaskMode, TaskSpec, TaskStatus,
    parse_task_specs,
};
pub use interpret::{
    Confidence, ConfidenceThreshold, Interpretation, parse_interpretation, strip_code_fences,
};
pub use routing::{Invocation, InvocationOrigin, RoutingDecision, has_task_cues};
pub use session::{DisambiguationSession, SessionOutcome};
pub use tdd::{
    StepStatus, TddError, TddMachine, TddPhase, TddPlan, TddStep, VerificationOutcome,
    parse_plan_steps,
};
