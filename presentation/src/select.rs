//! Interactive candidate selection for disambiguation.
//!
//! Shows a numbered menu with an explicit abort entry; unparseable input
//! reprints the prompt instead of guessing.

use std::io::{self, Write};

use async_trait::async_trait;
use colored::Colorize;

use nlmake_application::ports::{Selection, SelectionError, SelectionPort};

pub struct CandidateSelector;

impl CandidateSelector {
    pub fn new() -> Self {
        CandidateSelector
    }
}

impl Default for CandidateSelector {
    fn default() -> Self {
        CandidateSelector::new()
    }
}

#[async_trait]
impl SelectionPort for CandidateSelector {
    async fn select(
        &self,
        prompt: &str,
        candidates: &[String],
    ) -> Result<Selection, SelectionError> {
        println!();
        println!("{}", prompt.cyan().bold());
        for (index, candidate) in candidates.iter().enumerate() {
            println!("  {}) {}", index + 1, candidate.bold());
        }
        println!("  0) {}", "none of these".dimmed());

        loop {
            print!("{} ", "choice>".dimmed());
            io::stdout()
                .flush()
                .map_err(|e| SelectionError::Io(e.to_string()))?;

            let mut input = String::new();
            let bytes = io::stdin()
                .read_line(&mut input)
                .map_err(|e| SelectionError::Io(e.to_string()))?;
            if bytes == 0 {
                // EOF aborts the menu.
                return Ok(Selection::Cancelled);
            }

            match input.trim() {
                "0" | "q" | "quit" => return Ok(Selection::Cancelled),
                choice => match choice.parse::<usize>() {
                    Ok(n) if (1..=candidates.len()).contains(&n) => {
                        return Ok(Selection::Choice(n - 1));
                    }
                    _ => {
                        println!(
                            "{}",
                            format!("Enter a number from 0 to {}", candidates.len()).dimmed()
                        );
                    }
                },
            }
        }
    }
}
