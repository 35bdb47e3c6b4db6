//! Terminal specialist: runs shell commands.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use async_trait::async_trait;

use nlmake_application::ports::SpecialistPort;
use nlmake_domain::{AgentTask, Specialist, SpecialistOutcome};

use crate::runner::{ProcessError, run_with_timeout};
use crate::specialists::render_command_output;

pub struct TerminalSpecialist {
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl TerminalSpecialist {
    pub fn new(timeout: Duration) -> Self {
        TerminalSpecialist {
            working_dir: None,
            timeout,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl SpecialistPort for TerminalSpecialist {
    fn specialist(&self) -> Specialist {
        Specialist::Terminal
    }

    fn mutates_state(&self) -> bool {
        true
    }

    async fn execute(&self, task: &AgentTask) -> SpecialistOutcome {
        // Planners usually put the exact command in params; the goal text
        // is the fallback.
        let command_str = task
            .get_string("command")
            .unwrap_or(task.goal.as_str())
            .to_string();
        let mut cmd = Command::new("sh");
        cmd.args(["-c", &command_str]);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let timeout = self.timeout;
        let result = tokio::task::spawn_blocking(move || run_with_timeout(cmd, timeout)).await;

        match result {
            Ok(Ok(outcome)) => {
                let output = render_command_output(&outcome);
                if outcome.success() {
                    SpecialistOutcome::success(output)
                } else {
                    SpecialistOutcome::failure(output)
                }
            }
            Ok(Err(ProcessError::Timeout)) => {
                SpecialistOutcome::failure(format!("command timed out after {timeout:?}"))
            }
            Ok(Err(ProcessError::Spawn(msg)) | Err(ProcessError::Wait(msg))) => {
                SpecialistOutcome::failure(msg)
            }
            Err(e) => SpecialistOutcome::failure(format!("task panicked: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runs_param_command() {
        let specialist = TerminalSpecialist::new(Duration::from_secs(5));
        let task = AgentTask::new("task-1", "echo something", Specialist::Terminal)
            .with_param("command", serde_json::json!("echo hello"));
        let outcome = specialist.execute(&task).await;
        assert!(outcome.success);
        assert!(outcome.output.contains("hello"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let specialist = TerminalSpecialist::new(Duration::from_secs(5));
        let task = AgentTask::new("task-1", "exit 7", Specialist::Terminal);
        let outcome = specialist.execute(&task).await;
        assert!(!outcome.success);
        assert!(outcome.output.contains("exit code 7"));
    }
}
