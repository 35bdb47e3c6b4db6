//! Coding specialist: writes a program into a scratch directory and runs
//! it.
//!
//! By default the program also runs inside that scratch directory, a fresh
//! `tempfile::TempDir` per task, so nothing it writes survives the dispatch
//! unless it writes elsewhere. [`CodingSpecialist::in_dir`] runs the
//! program in a given directory instead; the TDD coder uses that so the
//! files it authors land where the verify command looks.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use async_trait::async_trait;

use nlmake_application::ports::SpecialistPort;
use nlmake_domain::{AgentTask, Specialist, SpecialistOutcome};

use crate::runner::{ProcessError, run_with_timeout};
use crate::specialists::render_command_output;

pub struct CodingSpecialist {
    timeout: Duration,
    workdir: Option<PathBuf>,
}

impl CodingSpecialist {
    pub fn new(timeout: Duration) -> Self {
        CodingSpecialist {
            timeout,
            workdir: None,
        }
    }

    /// Run programs with `dir` as their working directory instead of the
    /// throwaway scratch directory.
    pub fn in_dir(dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        CodingSpecialist {
            timeout,
            workdir: Some(dir.into()),
        }
    }
}

fn interpreter_for(language: &str) -> Option<(&'static str, &'static str)> {
    // (binary, file extension)
    match language {
        "sh" | "shell" | "bash" => Some(("sh", "sh")),
        "python" | "python3" => Some(("python3", "py")),
        _ => None,
    }
}

#[async_trait]
impl SpecialistPort for CodingSpecialist {
    fn specialist(&self) -> Specialist {
        Specialist::Coding
    }

    fn mutates_state(&self) -> bool {
        true
    }

    async fn execute(&self, task: &AgentTask) -> SpecialistOutcome {
        let Some(code) = task.get_string("code") else {
            return SpecialistOutcome::failure(
                "coding task needs a 'code' param with the program to run",
            );
        };
        let language = task.get_string("language").unwrap_or("sh");
        let Some((binary, extension)) = interpreter_for(language) else {
            return SpecialistOutcome::failure(format!("unsupported language '{language}'"));
        };

        let code = code.to_string();
        let binary = binary.to_string();
        let extension = extension.to_string();
        let timeout = self.timeout;
        let workdir = self.workdir.clone();

        let result = tokio::task::spawn_blocking(move || {
            let scratch = tempfile::tempdir()
                .map_err(|e| ProcessError::Spawn(format!("could not create scratch dir: {e}")))?;
            let file = scratch.path().join(format!("main.{extension}"));
            std::fs::write(&file, code)
                .map_err(|e| ProcessError::Spawn(format!("could not write program: {e}")))?;

            let mut cmd = Command::new(&binary);
            cmd.arg(&file);
            cmd.current_dir(workdir.as_deref().unwrap_or(scratch.path()));
            let outcome = run_with_timeout(cmd, timeout)?;
            // TempDir cleans the scratch dir (and the program file) on drop.
            Ok(outcome)
        })
        .await;

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
                SpecialistOutcome::failure(format!("program timed out after {timeout:?}"))
            }
            Ok(Err(ProcessError::Spawn(msg)) | Err(ProcessError::Wait(msg))) => {
                SpecialistOutcome::failure(msg)
            }
            Err(e) => SpecialistOutcome::failure(format!("task panicked: {e}")),
        }
    }
}
