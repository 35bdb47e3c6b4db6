//! Selection port for disambiguation prompts.

use async_trait::async_trait;
use thiserror::Error;

/// The user's response to a candidate menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the candidate list.
    Choice(usize),
    /// The user aborted the menu.
    Cancelled,
}

#[derive(Error, Debug, Clone)]
pub enum SelectionError {
    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for presenting a candidate menu and collecting a choice.
///
/// Implementations must always offer an abort option alongside the
/// candidates.
#[async_trait]
pub trait SelectionPort: Send + Sync {
    async fn select(
        &self,
        prompt: &str,
        candidates: &[String],
    ) -> Result<Selection, SelectionError>;
}
