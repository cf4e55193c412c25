use std::fmt::Write;

use crate::classifier::{ClassificationResult, DiscoveredItem};
use crate::error::Result;
use crate::router::{JobFailure, RunSummary};

use super::{ColorMode, ReportFormatter, ansi, no_color_requested};

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                !no_color_requested() && std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    /// Paints a count only when it is non-zero.
    fn count(&self, n: usize, color: &str) -> String {
        if n == 0 {
            n.to_string()
        } else {
            self.paint(&n.to_string(), color)
        }
    }

    fn write_item(out: &mut String, icon: &str, item: &DiscoveredItem) {
        let label = item.extracted_id.as_deref().unwrap_or("-");
        let _ = writeln!(out, "  {icon} {label:<8} {}", item.path.display());
    }

    fn write_failure(&self, out: &mut String, failure: &JobFailure) {
        let icon = self.paint("✗", ansi::RED);
        let _ = writeln!(
            out,
            "  {icon} {} {}",
            failure.identifier,
            failure.target.display()
        );
        let _ = writeln!(out, "    {}", failure.reason);
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl ReportFormatter for TextFormatter {
    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut out = String::new();

        if !summary.failures.is_empty() {
            let _ = writeln!(out, "Failed jobs:");
            for failure in &summary.failures {
                self.write_failure(&mut out, failure);
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(
            out,
            "Dispatched: {} matched, {} processed, {} failed, {} skipped",
            summary.matched_count,
            self.count(summary.processed_count, ansi::GREEN),
            self.count(summary.error_count, ansi::RED),
            self.count(summary.skipped_count, ansi::YELLOW),
        );
        let _ = write!(
            out,
            "Quarantined: {} unmatched, {} files copied",
            summary.unmatched_count, summary.quarantined_files,
        );
        if summary.quarantine_errors > 0 {
            let errors = self.paint(&summary.quarantine_errors.to_string(), ansi::RED);
            let _ = write!(out, ", {errors} copy errors");
        }
        let _ = writeln!(out);

        Ok(out)
    }

    fn format_classification(&self, result: &ClassificationResult) -> Result<String> {
        let mut out = String::new();

        let matched_icon = self.paint("✓", ansi::GREEN);
        let _ = writeln!(out, "Matched ({}):", result.matched.len());
        for item in &result.matched {
            Self::write_item(&mut out, &matched_icon, item);
        }

        // Unmatched items are listed with -v.
        if self.verbose >= 1 {
            let unmatched_icon = self.paint("·", ansi::CYAN);
            let _ = writeln!(out, "Unmatched ({}):", result.unmatched.len());
            for item in &result.unmatched {
                Self::write_item(&mut out, &unmatched_icon, item);
            }
        }

        let _ = writeln!(
            out,
            "Summary: {} items, {} matched, {} unmatched",
            result.total(),
            self.count(result.matched.len(), ansi::GREEN),
            self.count(result.unmatched.len(), ansi::YELLOW),
        );
        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
