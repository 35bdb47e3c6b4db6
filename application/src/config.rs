//! Application-level execution parameters.
//!
//! These are the resolved values the use cases consume. Parsing and
//! merging of configuration files happens in the infrastructure layer.

use std::time::Duration;

use nlmake_domain::ConfidenceThreshold;

/// Tunables for routing, retries, and the TDD cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionParams {
    /// Routing threshold on the `[0.0, 1.0]` scale.
    pub threshold: ConfidenceThreshold,
    /// Retries after a failed interpretation call (one request plus this
    /// many more).
    pub interpreter_retries: u32,
    /// Backoff between interpretation retries.
    pub retry_backoff: Duration,
    /// Re-attempts allowed when a TDD phase's verification goes the wrong
    /// way.
    pub max_verify_retries: u32,
    /// Whether the refactor phase gets a dedicated authoring pass.
    pub refactor_enabled: bool,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        ExecutionParams {
            threshold: ConfidenceThreshold::default(),
            interpreter_retries: 1,
            retry_backoff: Duration::from_millis(500),
            max_verify_retries: 2,
            refactor_enabled: true,
        }
    }
}

/// Safety gates around state-changing actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyConfig {
    /// Require confirmation before dispatching to mutating specialists.
    pub confirm_mutating: bool,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        SafetyConfig {
            confirm_mutating: true,
        }
    }
}
