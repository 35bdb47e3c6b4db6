//! Interactive confirmation gates.
//!
//! `assume_yes` (the `--yes` flag) pre-approves specialist dispatch and
//! the TDD gates. It never applies to suggested CLI corrections: those
//! run a command the user did not type, so the question is always asked,
//! and anything short of an explicit yes declines.

use std::io::{self, Write};

use async_trait::async_trait;
use colored::Colorize;

use nlmake_application::ports::{ConfirmationError, ConfirmationPort};
use nlmake_domain::{AgentTask, HumanDecision};

pub struct InteractiveConfirmation {
    assume_yes: bool,
}

impl InteractiveConfirmation {
    pub fn new(assume_yes: bool) -> Self {
        InteractiveConfirmation { assume_yes }
    }

    fn ask(&self, question: &str) -> Result<HumanDecision, ConfirmationError> {
        print!("{} {} ", question.cyan().bold(), "[y/N]".dimmed());
        io::stdout()
            .flush()
            .map_err(|e| ConfirmationError::Io(e.to_string()))?;

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            // EOF: no terminal to ask, treat as a decline.
            Ok(0) => Ok(HumanDecision::Deny),
            Ok(_) => match input.trim().to_lowercase().as_str() {
                "y" | "yes" => Ok(HumanDecision::Approve),
                _ => Ok(HumanDecision::Deny),
            },
            Err(e) => Err(ConfirmationError::Io(e.to_string())),
        }
    }
}

#[async_trait]
impl ConfirmationPort for InteractiveConfirmation {
    async fn confirm_task(&self, task: &AgentTask) -> Result<HumanDecision, ConfirmationError> {
        if self.assume_yes {
            return Ok(HumanDecision::Approve);
        }
        println!();
        println!(
            "{} {} task: {}",
            "About to dispatch".yellow().bold(),
            task.specialist.to_string().bold(),
            task.goal
        );
        self.ask("Proceed?")
    }

    async fn confirm_correction(
        &self,
        suggested: &str,
    ) -> Result<HumanDecision, ConfirmationError> {
        println!();
        println!(
            "{} {}",
            "Did you mean:".yellow().bold(),
            format!("make {suggested}").bold()
        );
        self.ask("Run it?")
    }

    async fn approve_plan(
        &self,
        rendered_plan: &str,
    ) -> Result<HumanDecision, ConfirmationError> {
        if self.assume_yes {
            return Ok(HumanDecision::Approve);
        }
        println!();
        println!("{rendered_plan}");
        self.ask("Proceed with this plan?")
    }

    async fn approve_cleanup(
        &self,
        artifact_path: &str,
    ) -> Result<HumanDecision, ConfirmationError> {
        if self.assume_yes {
            return Ok(HumanDecision::Approve);
        }
        println!();
        self.ask(&format!("All steps done. Discard the plan at {artifact_path}?"))
    }
}
