//! Subprocess execution: the make runner and the verification runner.
//!
//! Both wrap the same poll-based wait loop. Blocking process calls are
//! pushed onto the blocking thread pool so the async use cases stay
//! responsive.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use nlmake_application::ports::{BuildRunnerPort, CommandOutcome, RunnerError, VerificationPort};
use nlmake_domain::VerificationOutcome;

/// Maximum captured output size (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

pub(crate) enum ProcessError {
    Spawn(String),
    Timeout,
    Wait(String),
}

/// Run a prepared command to completion, killing it at the deadline.
pub(crate) fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
) -> Result<CommandOutcome, ProcessError> {
    let start = Instant::now();
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| ProcessError::Spawn(e.to_string()))?;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = child
                    .stdout
                    .take()
                    .map(|mut s| {
                        let mut buf = Vec::new();
                        std::io::Read::read_to_end(&mut s, &mut buf).ok();
                        buf
                    })
                    .unwrap_or_default();
                let stderr = child
                    .stderr
                    .take()
                    .map(|mut s| {
                        let mut buf = Vec::new();
                        std::io::Read::read_to_end(&mut s, &mut buf).ok();
                        buf
                    })
                    .unwrap_or_default();

                return Ok(CommandOutcome {
                    stdout: cap(String::from_utf8_lossy(&stdout).into_owned()),
                    stderr: cap(String::from_utf8_lossy(&stderr).into_owned()),
                    exit_code: status.code().unwrap_or(-1),
                    duration: start.elapsed(),
                });
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    child.kill().ok();
                    child.wait().ok();
                    return Err(ProcessError::Timeout);
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Err(ProcessError::Wait(e.to_string())),
        }
    }
}

fn cap(mut output: String) -> String {
    if output.len() > MAX_OUTPUT_SIZE {
        let mut end = MAX_OUTPUT_SIZE;
        while end > 0 && !output.is_char_boundary(end) {
            end -= 1;
        }
        output.truncate(end);
        output.push_str("\n... (output truncated)");
    }
    output
}

/// Runs build targets through the configured make program.
pub struct MakeRunner {
    program: String,
    working_dir: Option<std::path::PathBuf>,
    timeout: Duration,
}

impl MakeRunner {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        MakeRunner {
            program: program.into(),
            working_dir: None,
            timeout,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl BuildRunnerPort for MakeRunner {
    async fn run_target(&self, target: &str) -> Result<CommandOutcome, RunnerError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(target);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        let timeout = self.timeout;
        debug!(program = %self.program, target, "running build target");

        let result = tokio::task::spawn_blocking(move || run_with_timeout(cmd, timeout))
            .await
            .map_err(|e| RunnerError::Launch(format!("runner task panicked: {e}")))?;

        result.map_err(|e| match e {
            ProcessError::Timeout => RunnerError::Timeout(timeout),
            ProcessError::Spawn(msg) | ProcessError::Wait(msg) => RunnerError::Launch(msg),
        })
    }
}

/// Runs the configured verification command (the test suite) for the TDD
/// cycle.
pub struct ShellVerifier {
    command: String,
    working_dir: Option<std::path::PathBuf>,
    timeout: Duration,
}

impl ShellVerifier {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        ShellVerifier {
            command: command.into(),
            working_dir: None,
            timeout,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl VerificationPort for ShellVerifier {
    async fn verify(&self) -> Result<VerificationOutcome, RunnerError> {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", &self.command]);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        let timeout = self.timeout;
        debug!(command = %self.command, "running verification");

        let result = tokio::task::spawn_blocking(move || run_with_timeout(cmd, timeout))
            .await
            .map_err(|e| RunnerError::Launch(format!("verifier task panicked: {e}")))?;

        match result {
            Ok(outcome) => {
                let success = outcome.success();
                let mut output = outcome.stdout;
                if !outcome.stderr.is_empty() {
                    if !output.is_empty() {
                        output.push_str("\n--- stderr ---\n");
                    }
                    output.push_str(&outcome.stderr);
                }
                Ok(if success {
                    VerificationOutcome::passed(output)
                } else {
                    VerificationOutcome::failed(output)
                })
            }
            Err(ProcessError::Timeout) => Err(RunnerError::Timeout(timeout)),
            Err(ProcessError::Spawn(msg)) | Err(ProcessError::Wait(msg)) => {
                Err(RunnerError::Launch(msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_verifier_passes_on_zero_exit() {
        let verifier = ShellVerifier::new("true", Duration::from_secs(5));
        let outcome = verifier.verify().await.unwrap();
        assert!(outcome.passed);
    }

    #[tokio::test]
    async fn test_verifier_fails_on_nonzero_exit() {
        let verifier = ShellVerifier::new("echo boom; exit 3", Duration::from_secs(5));
        let outcome = verifier.verify().await.unwrap();
        assert!(!outcome.passed);
        assert!(outcome.output.contains("boom"));
    }

    #[tokio::test]
    async fn test_runner_reports_missing_program_as_launch_error() {
        let runner = MakeRunner::new("definitely-not-a-real-make", Duration::from_secs(5));
        assert!(matches!(
            runner.run_target("build").await,
            Err(RunnerError::Launch(_))
        ));
    }

    #[test]
    fn test_timeout_kills_the_process() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 5"]);
        let result = run_with_timeout(cmd, Duration::from_millis(100));
        assert!(matches!(result, Err(ProcessError::Timeout)));
    }
}
