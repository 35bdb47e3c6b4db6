//! Interpreter port
//!
//! Defines the interface for turning natural-language text into a
//! structured [`Interpretation`]. The adapter (an Ollama-backed model
//! client) lives in the infrastructure layer.

use async_trait::async_trait;
use nlmake_domain::Interpretation;
use thiserror::Error;

/// Errors that can occur during an interpretation call.
///
/// `MalformedResponse` covers every schema violation: invalid JSON, missing
/// fields, out-of-range confidence, a null command with nonzero confidence.
#[derive(Error, Debug, Clone)]
pub enum InterpretationError {
    #[error("Interpretation request timed out")]
    Timeout,

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Model service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// What the model is being asked to do. Shapes the prompt the adapter
/// builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Map a request onto a build target.
    Route,
    /// Suggest a corrected command line for a failed CLI parse.
    CorrectError,
}

/// One interpretation request: the user text plus whatever context the
/// caller has (target summary for routing, error text for correction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationRequest {
    pub text: String,
    pub context: String,
    pub kind: TaskKind,
}

impl InterpretationRequest {
    pub fn route(text: impl Into<String>, target_summary: impl Into<String>) -> Self {
        InterpretationRequest {
            text: text.into(),
            context: target_summary.into(),
            kind: TaskKind::Route,
        }
    }

    pub fn correct_error(command_line: impl Into<String>, error_text: impl Into<String>) -> Self {
        InterpretationRequest {
            text: command_line.into(),
            context: error_text.into(),
            kind: TaskKind::CorrectError,
        }
    }
}

/// Port for natural-language interpretation.
#[async_trait]
pub trait InterpreterPort: Send + Sync {
    async fn interpret(
        &self,
        request: InterpretationRequest,
    ) -> Result<Interpretation, InterpretationError>;
}
