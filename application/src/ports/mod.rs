//! Ports (interfaces) for the application layer.
//!
//! Adapters live in the infrastructure and presentation layers and are
//! injected as `Arc<dyn Port>`.

pub mod build_runner;
pub mod buildfile;
pub mod confirmation;
pub mod interpreter;
pub mod plan_store;
pub mod planner;
pub mod selection;
pub mod specialist;
pub mod verification;

pub use build_runner::{BuildRunnerPort, CommandOutcome, RunnerError};
pub use buildfile::{BuildFileError, BuildFilePort};
pub use confirmation::{ConfirmationError, ConfirmationPort};
pub use interpreter::{InterpretationError, InterpretationRequest, InterpreterPort, TaskKind};
pub use plan_store::PlanArtifactStore;
pub use planner::PlannerPort;
pub use selection::{Selection, SelectionError, SelectionPort};
pub use specialist::{SpecialistPort, SpecialistRegistry};
pub use verification::VerificationPort;
