//! Interactive session: a reedline loop feeding requests through the
//! full turn pipeline.

use std::sync::Arc;

use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::debug;

use nlmake_application::ports::BuildFilePort;
use nlmake_application::use_cases::RunRequestUseCase;
use nlmake_domain::Invocation;

use crate::output::{ConsoleFormatter, ProgressReporter};

pub struct InteractiveSession {
    turn: Arc<RunRequestUseCase>,
    build_file: Arc<dyn BuildFilePort>,
    quiet: bool,
}

impl InteractiveSession {
    pub fn new(
        turn: Arc<RunRequestUseCase>,
        build_file: Arc<dyn BuildFilePort>,
        quiet: bool,
    ) -> Self {
        InteractiveSession {
            turn,
            build_file,
            quiet,
        }
    }

    pub async fn run(&self) {
        if !self.quiet {
            println!(
                "{}",
                "Type what you want to do, /help for commands, Ctrl-D to leave.".dimmed()
            );
        }

        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("nlmake".to_string()),
            DefaultPromptSegment::Empty,
        );

        loop {
            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if matches!(line, "/quit" | "/exit") {
                        break;
                    }
                    // Local commands answer without spending an inference.
                    if let Some(response) = local_command(self.build_file.as_ref(), line) {
                        println!("{response}");
                        continue;
                    }
                    self.handle(line).await;
                }
                Ok(Signal::CtrlC) => {
                    // Drop the current line, keep the session.
                    continue;
                }
                Ok(Signal::CtrlD) => break,
                Err(error) => {
                    debug!(%error, "read_line failed");
                    break;
                }
            }
        }
        if !self.quiet {
            println!("{}", "bye".dimmed());
        }
    }

    async fn handle(&self, line: &str) {
        let mut progress = ProgressReporter::new(self.quiet);
        progress.start("thinking...");
        let result = self.turn.execute(Invocation::direct(line)).await;
        progress.finish();

        match result {
            Ok(outcome) => print!("{}", ConsoleFormatter::format_turn(&outcome)),
            Err(error) => print!("{}", ConsoleFormatter::format_error(&error.to_string(), None)),
        }
    }
}

/// Answer a session command locally, or `None` when the line should go
/// through the turn pipeline.
fn local_command(build_file: &dyn BuildFilePort, line: &str) -> Option<String> {
    match line {
        "/help" => Some(
            [
                "  /help      show this help",
                "  /targets   list the build file's targets",
                "  /quit      leave the session (also Ctrl-D)",
                "  anything else is treated as a request",
            ]
            .join("\n"),
        ),
        "/targets" => Some(match build_file.read() {
            Ok(document) => document.render_target_summary(),
            Err(error) => ConsoleFormatter::format_error(&error.to_string(), None),
        }),
        _ => None,
    }
}
