//! Application layer for nlmake
//!
//! Use cases and the ports they depend on. Adapters for the ports live in
//! the infrastructure layer (model client, process runners, specialists)
//! and the presentation layer (confirmation and selection prompts).

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::{ExecutionParams, SafetyConfig};
