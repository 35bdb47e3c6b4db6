//! Infrastructure layer for nlmake
//!
//! Concrete adapters for the application ports: the Ollama-backed
//! interpreter and planner, the make runner and shell verifier, the
//! Makefile reader, the specialist implementations, the plan artifact
//! store, and configuration loading.

pub mod buildfile;
pub mod config;
pub mod llm;
pub mod plan_store;
pub mod runner;
pub mod specialists;

pub use buildfile::MakefileReader;
pub use config::{ConfigLoader, FileConfig};
pub use llm::{OllamaClient, OllamaInterpreter};
pub use plan_store::FilePlanStore;
pub use runner::{MakeRunner, ShellVerifier};
pub use specialists::default_registry;
