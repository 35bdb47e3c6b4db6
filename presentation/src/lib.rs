//! Presentation layer for nlmake
//!
//! CLI argument definitions, interactive prompts (confirmation,
//! selection, the session loop), and console output formatting.

pub mod cli;
pub mod confirm;
pub mod output;
pub mod select;
pub mod session;

pub use cli::{Cli, Command, ConfigAction};
pub use confirm::InteractiveConfirmation;
pub use output::{ConsoleFormatter, ProgressReporter};
pub use select::CandidateSelector;
pub use session::InteractiveSession;
