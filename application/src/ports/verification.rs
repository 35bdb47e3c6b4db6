//! Verification port for the TDD cycle.
//!
//! Runs the project's verification command (typically the test suite) and
//! reports pass/fail with captured output. A `RunnerError` here means the
//! run itself could not happen, not that tests failed.

use async_trait::async_trait;
use nlmake_domain::VerificationOutcome;

use crate::ports::build_runner::RunnerError;

#[async_trait]
pub trait VerificationPort: Send + Sync {
    async fn verify(&self) -> Result<VerificationOutcome, RunnerError>;
}
