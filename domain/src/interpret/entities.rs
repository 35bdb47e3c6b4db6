//! Interpretation entities and value objects.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// Model confidence in a single interpretation, on the `[0.0, 1.0]` scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0.0);

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DomainError::ConfidenceOutOfRange(value));
        }
        Ok(Confidence(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Whether this confidence clears the routing threshold.
    /// Equality counts as clearing it.
    pub fn meets(&self, threshold: ConfidenceThreshold) -> bool {
        self.0 >= threshold.value()
    }

    /// Whether this confidence falls strictly inside `(0, threshold)`,
    /// the band that triggers disambiguation.
    pub fn is_uncertain(&self, threshold: ConfidenceThreshold) -> bool {
        self.0 > 0.0 && self.0 < threshold.value()
    }
}

/// The routing threshold above which an interpretation executes directly.
///
/// Stored on the same `[0.0, 1.0]` scale as [`Confidence`]; user-facing
/// configuration expresses it as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ConfidenceThreshold(f64);

impl ConfidenceThreshold {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DomainError::ConfidenceOutOfRange(value));
        }
        Ok(ConfidenceThreshold(value))
    }

    /// Build from a whole-number percentage (`0..=100`), the unit used in
    /// configuration files.
    pub fn from_percent(percent: u8) -> Result<Self, DomainError> {
        if percent > 100 {
            return Err(DomainError::ConfidenceOutOfRange(f64::from(percent)));
        }
        Ok(ConfidenceThreshold(f64::from(percent) / 100.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        ConfidenceThreshold(0.8)
    }
}

/// One interpretation of a natural-language request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// The best-match command, or `None` when the model found nothing.
    pub command: Option<String>,
    pub confidence: Confidence,
    /// Lower-ranked alternative commands, best first.
    pub alternatives: Vec<String>,
    /// Free-text rationale from the model, when it offered one.
    pub reasoning: Option<String>,
}

impl Interpretation {
    pub fn new(
        command: Option<String>,
        confidence: Confidence,
        alternatives: Vec<String>,
    ) -> Result<Self, DomainError> {
        if command.is_none() && !confidence.is_zero() {
            return Err(DomainError::InvalidInterpretation(format!(
                "null command requires zero confidence, got {}",
                confidence.value()
            )));
        }
        Ok(Interpretation {
            command,
            confidence,
            alternatives,
            reasoning: None,
        })
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// All candidate commands in rank order: the primary command first,
    /// then alternatives, with duplicates removed.
    pub fn candidate_commands(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let primary = self.command.iter();
        for candidate in primary.chain(self.alternatives.iter()) {
            if !seen.iter().any(|c| c == candidate) {
                seen.push(candidate.clone());
            }
        }
        seen
    }
}
