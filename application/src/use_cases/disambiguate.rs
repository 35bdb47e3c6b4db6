//! Disambiguation use case: resolve a candidate list into a single
//! command, or a clean abort.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use nlmake_domain::{DisambiguationSession, DomainError, SessionOutcome};

use crate::ports::{Selection, SelectionPort};

const PROMPT: &str = "Which command did you mean?";

#[derive(Error, Debug)]
pub enum DisambiguationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Selection failed: {0}")]
    Selection(String),
}

pub struct DisambiguateUseCase {
    selection: Arc<dyn SelectionPort>,
}

impl DisambiguateUseCase {
    pub fn new(selection: Arc<dyn SelectionPort>) -> Self {
        DisambiguateUseCase { selection }
    }

    pub async fn resolve(
        &self,
        candidates: Vec<String>,
    ) -> Result<SessionOutcome, DisambiguationError> {
        let session = DisambiguationSession::new(candidates)?;
        let selection = self
            .selection
            .select(PROMPT, session.candidates())
            .await
            .map_err(|e| DisambiguationError::Selection(e.to_string()))?;
        let outcome = match selection {
            Selection::Choice(index) => session.resolve(Some(index))?,
            Selection::Cancelled => session.resolve(None)?,
        };
        debug!(resolved = matches!(outcome, SessionOutcome::Resolved(_)), "disambiguation finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::ScriptedSelection;

    fn candidates() -> Vec<String> {
        vec!["build".into(), "rebuild".into()]
    }

    #[tokio::test]
    async fn test_choice_resolves_candidate() {
        let uc = DisambiguateUseCase::new(Arc::new(ScriptedSelection(Selection::Choice(1))));
        let outcome = uc.resolve(candidates()).await.unwrap();
        assert_eq!(outcome, SessionOutcome::Resolved("rebuild".into()));
    }

    #[tokio::test]
    async fn test_abort_cancels_without_execution() {
        let uc = DisambiguateUseCase::new(Arc::new(ScriptedSelection(Selection::Cancelled)));
        let outcome = uc.resolve(candidates()).await.unwrap();
        assert_eq!(outcome, SessionOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_empty_candidates_are_a_caller_bug() {
        let uc = DisambiguateUseCase::new(Arc::new(ScriptedSelection(Selection::Cancelled)));
        assert!(uc.resolve(vec![]).await.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_selection_is_an_error() {
        let uc = DisambiguateUseCase::new(Arc::new(ScriptedSelection(Selection::Choice(9))));
        assert!(matches!(
            uc.resolve(candidates()).await,
            Err(DisambiguationError::Domain(DomainError::CandidateOutOfRange(9)))
        ));
    }
}
