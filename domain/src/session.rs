//! Disambiguation session: a short-lived choice among candidate commands.

use crate::core::error::DomainError;

/// How a disambiguation session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user picked this command.
    Resolved(String),
    /// The user aborted; nothing executes.
    Cancelled,
}

/// A pending choice among candidate commands, in rank order.
///
/// The session is consumed by [`resolve`](DisambiguationSession::resolve):
/// once a choice or an abort is recorded there is nothing left to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisambiguationSession {
    candidates: Vec<String>,
}

impl DisambiguationSession {
    /// Create a session. Candidate order is preserved; duplicates are
    /// dropped. An empty candidate list is a caller bug.
    pub fn new(candidates: Vec<String>) -> Result<Self, DomainError> {
        let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        if unique.is_empty() {
            return Err(DomainError::EmptyCandidates);
        }
        Ok(DisambiguationSession { candidates: unique })
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Resolve with the user's choice: `Some(index)` selects a candidate,
    /// `None` aborts. An out-of-range index is rejected without consuming
    /// anything the caller cannot rebuild.
    pub fn resolve(self, choice: Option<usize>) -> Result<SessionOutcome, DomainError> {
        match choice {
            None => Ok(SessionOutcome::Cancelled),
            Some(index) => {
                let Some(candidate) = self.candidates.get(index) else {
                    return Err(DomainError::CandidateOutOfRange(index));
                };
                Ok(SessionOutcome::Resolved(candidate.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_candidates_rejected() {
        assert!(DisambiguationSession::new(vec![]).is_err());
    }

    #[test]
    fn test_duplicates_dropped_order_kept() {
        let session =
            DisambiguationSession::new(vec!["build".into(), "test".into(), "build".into()])
                .unwrap();
        assert_eq!(session.candidates(), ["build", "test"]);
    }

    #[test]
    fn test_resolve_choice() {
        let session = DisambiguationSession::new(vec!["build".into(), "test".into()]).unwrap();
        assert_eq!(
            session.resolve(Some(1)).unwrap(),
            SessionOutcome::Resolved("test".into())
        );
    }

    #[test]
    fn test_resolve_abort() {
        let session = DisambiguationSession::new(vec!["build".into()]).unwrap();
        assert_eq!(session.resolve(None).unwrap(), SessionOutcome::Cancelled);
    }

    #[test]
    fn test_out_of_range_choice_rejected() {
        let session = DisambiguationSession::new(vec!["build".into()]).unwrap();
        assert!(matches!(
            session.resolve(Some(5)),
            Err(DomainError::CandidateOutOfRange(5))
        ));
    }
}
