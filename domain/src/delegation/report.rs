//! Aggregated outcome of one delegation run.

use crate::delegation::entities::AgentTask;

/// The manager's record of a delegation run: every dispatched task in
/// submission order, with its final status.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegationReport {
    pub goal: String,
    tasks: Vec<AgentTask>,
}

impl DelegationReport {
    pub fn new(goal: impl Into<String>) -> Self {
        DelegationReport {
            goal: goal.into(),
            tasks: Vec::new(),
        }
    }

    pub fn push(&mut self, task: AgentTask) {
        self.tasks.push(task);
    }

    pub fn tasks(&self) -> &[AgentTask] {
        &self.tasks
    }

    pub fn succeeded_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_failed()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.is_succeeded())
    }
}
