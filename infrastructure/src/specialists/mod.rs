//! Specialist adapters: one per capability, plus the default registry
//! wiring.

pub mod build_system;
pub mod coding;
pub mod file_system;
pub mod terminal;
pub mod web;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use nlmake_application::ports::{BuildRunnerPort, CommandOutcome, SpecialistRegistry};

pub use build_system::BuildSystemSpecialist;
pub use coding::CodingSpecialist;
pub use file_system::FileSystemSpecialist;
pub use terminal::TerminalSpecialist;
pub use web::WebSpecialist;

/// Render a finished command for the manager: combined output plus the
/// exit code when it was nonzero.
pub(crate) fn render_command_output(outcome: &CommandOutcome) -> String {
    let mut output = String::new();
    if !outcome.stdout.is_empty() {
        output.push_str(&outcome.stdout);
    }
    if !outcome.stderr.is_empty() {
        if !output.is_empty() {
            output.push_str("\n--- stderr ---\n");
        }
        output.push_str(&outcome.stderr);
    }
    if !outcome.success() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("command exited with exit code {}", outcome.exit_code));
    }
    output
}

/// Build the full registry: all five specialists, sharing one working
/// directory and timeout budget. The web specialist is skipped if its
/// HTTP client cannot be built.
pub fn default_registry(
    working_dir: PathBuf,
    runner: Arc<dyn BuildRunnerPort>,
    task_timeout: Duration,
) -> SpecialistRegistry {
    let mut registry = SpecialistRegistry::new()
        .register(Arc::new(
            TerminalSpecialist::new(task_timeout).with_working_dir(working_dir.clone()),
        ))
        .register(Arc::new(CodingSpecialist::new(task_timeout)))
        .register(Arc::new(BuildSystemSpecialist::new(runner)))
        .register(Arc::new(FileSystemSpecialist::new(working_dir)));

    match WebSpecialist::new(task_timeout) {
        Ok(web) => registry = registry.register(Arc::new(web)),
        Err(error) => warn!(%error, "web specialist unavailable"),
    }
    registry
}
