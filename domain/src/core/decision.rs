//! Human decision outcomes for confirmation gates.

/// Outcome of a confirmation prompt shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanDecision {
    Approve,
    Deny,
}

impl HumanDecision {
    pub fn is_approve(&self) -> bool {
        matches!(self, HumanDecision::Approve)
    }
}
