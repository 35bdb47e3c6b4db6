//! Build runner port
//!
//! Executes a build target and captures its output. The adapter (a make
//! subprocess wrapper) lives in the infrastructure layer.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to launch command: {0}")]
    Launch(String),
}

/// Port for running build targets.
#[async_trait]
pub trait BuildRunnerPort: Send + Sync {
    async fn run_target(&self, target: &str) -> Result<CommandOutcome, RunnerError>;
}
