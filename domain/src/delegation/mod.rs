//! Delegation subdomain: specialists, tasks, planner-output parsing, and
//! the aggregated run report.

pub mod entities;
pub mod parsing;
pub mod report;

pub use entities::{AgentTask, Specialist, SpecialistOutcome, TaskMode, TaskStatus};
pub use parsing::{TaskSpec, parse_task_specs};
pub use report::DelegationReport;
