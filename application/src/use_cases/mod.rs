//! Use cases orchestrating the domain through the ports.

pub mod correct_error;
pub mod delegate;
pub mod disambiguate;
pub mod route;
pub mod run_request;
pub mod tdd_cycle;

#[cfg(test)]
pub(crate) mod support;

pub use correct_error::{CorrectErrorUseCase, CorrectionError, CorrectionOutcome};
pub use delegate::{DelegateUseCase, DelegationError};
pub use disambiguate::{DisambiguateUseCase, DisambiguationError};
pub use route::{RoutedRequest, RouteUseCase, RouterError, decide};
pub use run_request::{RunRequestUseCase, TurnError, TurnOutcome};
pub use tdd_cycle::{TddCycleError, TddCycleUseCase, TddOutcome};
