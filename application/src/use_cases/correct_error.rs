//! Error-correction use case: turn a failed CLI parse into a suggested
//! command, behind a mandatory confirmation.
//!
//! The confirmation is not configurable. A corrected command is something
//! the user never typed, so nothing here executes without an explicit yes;
//! when the interpreter has no suggestion or the prompt cannot be asked
//! cleanly, the flow degrades to reporting and stops.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use nlmake_domain::{HumanDecision, Invocation, InvocationOrigin};

use crate::ports::{
    BuildRunnerPort, CommandOutcome, ConfirmationError, ConfirmationPort, InterpretationRequest,
    InterpreterPort, RunnerError,
};

#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// How the correction flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionOutcome {
    /// The user approved the suggestion and it ran.
    Executed {
        command: String,
        outcome: CommandOutcome,
    },
    /// A suggestion was offered and declined.
    Declined { command: String },
    /// No suggestion could be made; the reason is reported verbatim.
    NoSuggestion { reason: String },
}

pub struct CorrectErrorUseCase {
    interpreter: Arc<dyn InterpreterPort>,
    confirmation: Arc<dyn ConfirmationPort>,
    runner: Arc<dyn BuildRunnerPort>,
}

impl CorrectErrorUseCase {
    pub fn new(
        interpreter: Arc<dyn InterpreterPort>,
        confirmation: Arc<dyn ConfirmationPort>,
        runner: Arc<dyn BuildRunnerPort>,
    ) -> Self {
        CorrectErrorUseCase {
            interpreter,
            confirmation,
            runner,
        }
    }

    pub async fn execute(
        &self,
        invocation: &Invocation,
    ) -> Result<CorrectionOutcome, CorrectionError> {
        let InvocationOrigin::CapturedCliError { error_text } = &invocation.origin else {
            return Ok(CorrectionOutcome::NoSuggestion {
                reason: "invocation did not come from a CLI error".to_string(),
            });
        };

        let request = InterpretationRequest::correct_error(&invocation.text, error_text);
        let interpretation = match self.interpreter.interpret(request).await {
            Ok(interpretation) => interpretation,
            Err(error) => {
                return Ok(CorrectionOutcome::NoSuggestion {
                    reason: error.to_string(),
                });
            }
        };

        let Some(command) = interpretation.command else {
            return Ok(CorrectionOutcome::NoSuggestion {
                reason: "no correction matched the failed command".to_string(),
            });
        };
        info!(%command, "correction suggested");

        match self.confirmation.confirm_correction(&command).await {
            Ok(HumanDecision::Approve) => {
                let outcome = self.runner.run_target(&command).await?;
                Ok(CorrectionOutcome::Executed { command, outcome })
            }
            Ok(HumanDecision::Deny) => Ok(CorrectionOutcome::Declined { command }),
            Err(ConfirmationError::Cancelled) => Err(CorrectionError::Cancelled),
            Err(ConfirmationError::Io(msg)) => {
                warn!(%msg, "confirmation unavailable, not executing the suggestion");
                Ok(CorrectionOutcome::Declined { command })
            }
        }
    }
}
