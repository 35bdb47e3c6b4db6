//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No candidates to choose from")]
    EmptyCandidates,

    #[error("Candidate index {0} is out of range")]
    CandidateOutOfRange(usize),

    #[error("Confidence {0} is outside the [0.0, 1.0] range")]
    ConfidenceOutOfRange(f64),

    #[error("Invalid interpretation payload: {0}")]
    InvalidInterpretation(String),

    #[error("Invalid task decomposition: {0}")]
    InvalidDecomposition(String),

    #[error("Invalid step plan: {0}")]
    InvalidPlan(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
