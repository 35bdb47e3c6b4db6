//! Console output formatting for turn results.

use colored::Colorize;

use nlmake_application::ports::CommandOutcome;
use nlmake_application::use_cases::{CorrectionOutcome, TurnOutcome};
use nlmake_domain::{DelegationReport, Interpretation, TaskStatus};

/// Formats turn results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_turn(outcome: &TurnOutcome) -> String {
        match outcome {
            TurnOutcome::Executed {
                command,
                outcome,
                interpretation,
            } => {
                let mut output = String::new();
                if let Some(interpretation) = interpretation {
                    output.push_str(&Self::format_interpretation(interpretation));
                }
                output.push_str(&Self::format_execution(command, outcome));
                output
            }
            TurnOutcome::Cancelled => format!("{}", "Aborted, nothing was run.".dimmed()),
            TurnOutcome::Delegated(report) => Self::format_report(report),
            TurnOutcome::Corrected(correction) => Self::format_correction(correction),
        }
    }

    /// One dimmed line with the model's confidence and, when it offered
    /// one, its reasoning.
    pub fn format_interpretation(interpretation: &Interpretation) -> String {
        let confidence = format!("confidence {:.0}%", interpretation.confidence.value() * 100.0);
        let line = match &interpretation.reasoning {
            Some(reasoning) => format!("{confidence}: {reasoning}"),
            None => confidence,
        };
        format!("{}\n", line.dimmed())
    }

    pub fn format_execution(command: &str, outcome: &CommandOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            "Running:".cyan().bold(),
            format!("make {command}").bold()
        ));
        if !outcome.stdout.is_empty() {
            output.push_str(&outcome.stdout);
            if !outcome.stdout.ends_with('\n') {
                output.push('\n');
            }
        }
        if !outcome.stderr.is_empty() {
            output.push_str(&format!("{}\n{}", "stderr:".yellow(), outcome.stderr));
            if !outcome.stderr.ends_with('\n') {
                output.push('\n');
            }
        }
        let status = if outcome.success() {
            format!("done in {:.1?}", outcome.duration).green().bold()
        } else {
            format!(
                "exited with code {} after {:.1?}",
                outcome.exit_code, outcome.duration
            )
            .red()
            .bold()
        };
        output.push_str(&format!("{status}\n"));
        output
    }

    pub fn format_report(report: &DelegationReport) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n\n",
            "Goal:".cyan().bold(),
            report.goal
        ));
        for task in report.tasks() {
            let marker = match &task.status {
                TaskStatus::Succeeded => "ok".green().bold(),
                TaskStatus::Failed { .. } => "failed".red().bold(),
                _ => "pending".dimmed(),
            };
            output.push_str(&format!(
                "[{marker}] {} ({}): {}\n",
                task.id,
                task.specialist.to_string().yellow(),
                task.goal
            ));
            if let TaskStatus::Failed { reason } = &task.status {
                output.push_str(&format!("       {}\n", reason.dimmed()));
            }
        }
        let summary = format!(
            "\n{} of {} tasks succeeded",
            report.succeeded_count(),
            report.tasks().len()
        );
        if report.all_succeeded() {
            output.push_str(&format!("{}\n", summary.green().bold()));
        } else {
            output.push_str(&format!("{}\n", summary.yellow().bold()));
        }
        output
    }

    pub fn format_correction(outcome: &CorrectionOutcome) -> String {
        match outcome {
            CorrectionOutcome::Executed { command, outcome } => {
                Self::format_execution(command, outcome)
            }
            CorrectionOutcome::Declined { command } => format!(
                "{} {}\n",
                "Skipped suggested command:".dimmed(),
                format!("make {command}").dimmed()
            ),
            CorrectionOutcome::NoSuggestion { reason } => format!(
                "{} {reason}\n",
                "No correction available:".yellow().bold()
            ),
        }
    }

    pub fn format_error(message: &str, hint: Option<&str>) -> String {
        let mut output = format!("{} {message}\n", "error:".red().bold());
        if let Some(hint) = hint {
            output.push_str(&format!("{} {hint}\n", "hint:".cyan()));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn outcome(exit_code: i32) -> CommandOutcome {
        CommandOutcome {
            stdout: "compiling\n".into(),
            stderr: String::new(),
            exit_code,
            duration: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_execution_formatting_mentions_command_and_status() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_execution("build", &outcome(0));
        assert!(text.contains("make build"));
        assert!(text.contains("compiling"));
        assert!(text.contains("done in"));
    }

    #[test]
    fn test_failed_execution_shows_exit_code() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_execution("build", &outcome(2));
        assert!(text.contains("exited with code 2"));
    }

    #[test]
    fn test_turn_formatting_shows_confidence_and_reasoning() {
        colored::control::set_override(false);
        let interpretation = nlmake_domain::Interpretation::new(
            Some("build".into()),
            nlmake_domain::Confidence::new(0.92).unwrap(),
            vec![],
        )
        .unwrap()
        .with_reasoning("matches the build target");
        let turn = TurnOutcome::Executed {
            command: "build".into(),
            outcome: outcome(0),
            interpretation: Some(interpretation),
        };
        let text = ConsoleFormatter::format_turn(&turn);
        assert!(text.contains("confidence 92%: matches the build target"));
        assert!(text.contains("make build"));
    }

    #[test]
    fn test_turn_formatting_without_interpretation_has_no_confidence_line() {
        colored::control::set_override(false);
        let turn = TurnOutcome::Executed {
            command: "build".into(),
            outcome: outcome(0),
            interpretation: None,
        };
        let text = ConsoleFormatter::format_turn(&turn);
        assert!(!text.contains("confidence"));
    }

    #[test]
    fn test_report_formatting_shows_failure_reason() {
        colored::control::set_override(false);
        let mut report = DelegationReport::new("ship it");
        let mut task =
            nlmake_domain::AgentTask::new("task-1", "run build", nlmake_domain::Specialist::BuildSystem);
        task.fail("make: *** Error 2");
        report.push(task);
        let text = ConsoleFormatter::format_report(&report);
        assert!(text.contains("[failed] task-1"));
        assert!(text.contains("make: *** Error 2"));
        assert!(text.contains("0 of 1 tasks succeeded"));
    }

    #[test]
    fn test_report_formatting_keeps_submission_order() {
        colored::control::set_override(false);
        let mut report = DelegationReport::new("ship it");
        let mut first =
            nlmake_domain::AgentTask::new("task-1", "write code", nlmake_domain::Specialist::Coding);
        first.succeed("done");
        let mut second = nlmake_domain::AgentTask::new(
            "task-2",
            "run build",
            nlmake_domain::Specialist::BuildSystem,
        );
        second.fail("make: *** Error 2");
        report.push(first);
        report.push(second);
        let text = ConsoleFormatter::format_report(&report);
        let first_at = text.find("task-1").unwrap();
        let second_at = text.find("task-2").unwrap();
        assert!(first_at < second_at);
        assert!(text.contains("1 of 2 tasks succeeded"));
    }
}
