//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`decision::HumanDecision`]: approve/deny outcomes from confirmation gates
//! - [`string`]: small string helpers

pub mod decision;
pub mod error;
pub mod string;
