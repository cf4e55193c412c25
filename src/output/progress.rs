use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar advanced once per dispatch job.
///
/// The progress bar is automatically disabled in quiet mode or when stderr is not a TTY.
#[derive(Clone)]
pub struct DispatchProgress {
    progress_bar: ProgressBar,
}

impl Default for DispatchProgress {
    fn default() -> Self {
        Self::hidden()
    }
}

impl DispatchProgress {
    /// Creates a progress bar for `total` jobs, drawn on stderr.
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, quiet, is_tty)
    }

    /// A progress bar that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
        }
    }

    fn new_with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        if quiet || !is_tty {
            return Self::hidden();
        }
        Self {
            progress_bar: Self::create_visible_progress_bar(total),
        }
    }

    fn create_visible_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Dispatching [{bar:40.cyan/blue}] {pos}/{len} jobs {msg}")
                // SAFETY: Template is a static string with valid format specifiers
                .expect("valid template")
                .progress_chars("█▓░"),
        );
        pb
    }

    pub fn set_length(&self, total: u64) {
        self.progress_bar.set_length(total);
    }

    /// Shows the job currently running.
    pub fn start_job(&self, label: &str) {
        self.progress_bar.set_message(label.to_string());
    }

    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
