//! Ollama-backed model access: HTTP client, prompt builders, and the
//! interpreter/planner adapters.

pub mod adapter;
pub mod client;
pub mod prompts;

pub use adapter::OllamaInterpreter;
pub use client::OllamaClient;
