//! Routing entities: the incoming invocation and the decision the router
//! produces for it.

pub mod cues;

use chrono::{DateTime, Utc};

pub use cues::has_task_cues;

/// Where an invocation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOrigin {
    /// The user passed the request text as a CLI argument or typed it
    /// into the interactive session.
    DirectArgument,
    /// Argument parsing failed and the failing command line was captured
    /// for error correction.
    CapturedCliError { error_text: String },
}

/// A single natural-language request entering the system.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub text: String,
    pub origin: InvocationOrigin,
    pub received_at: DateTime<Utc>,
}

impl Invocation {
    pub fn direct(text: impl Into<String>) -> Self {
        Invocation {
            text: text.into(),
            origin: InvocationOrigin::DirectArgument,
            received_at: Utc::now(),
        }
    }

    pub fn cli_error(command_line: impl Into<String>, error_text: impl Into<String>) -> Self {
        Invocation {
            text: command_line.into(),
            origin: InvocationOrigin::CapturedCliError {
                error_text: error_text.into(),
            },
            received_at: Utc::now(),
        }
    }

    pub fn is_cli_error(&self) -> bool {
        matches!(self.origin, InvocationOrigin::CapturedCliError { .. })
    }
}

/// The router's verdict for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    /// Run this command immediately.
    Execute(String),
    /// Ask the user to choose among candidate commands (never empty).
    Disambiguate(Vec<String>),
    /// Hand the request to the delegation pipeline as a task goal.
    Delegate(String),
    /// Offer a corrected command line for a failed CLI parse.
    SuggestCorrection {
        original: String,
        error_text: String,
    },
}

impl RoutingDecision {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingDecision::Execute(_) => "execute",
            RoutingDecision::Disambiguate(_) => "disambiguate",
            RoutingDecision::Delegate(_) => "delegate",
            RoutingDecision::SuggestCorrection { .. } => "suggest_correction",
        }
    }
}
