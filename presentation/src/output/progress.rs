//! Spinner shown while the model thinks or a target runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub struct ProgressReporter {
    quiet: bool,
    spinner: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(quiet: bool) -> Self {
        ProgressReporter {
            quiet,
            spinner: None,
        }
    }

    pub fn start(&mut self, message: impl Into<String>) {
        if self.quiet {
            return;
        }
        self.finish();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    pub fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}
