//! Output formatting.

pub mod console;
pub mod progress;

pub use console::ConsoleFormatter;
pub use progress::ProgressReporter;
