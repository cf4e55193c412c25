use serde::Serialize;

use crate::classifier::{ClassificationResult, DiscoveredItem};
use crate::error::Result;
use crate::router::RunSummary;

use super::ReportFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct ClassificationOutput<'a> {
    summary: ClassificationCounts,
    matched: &'a [DiscoveredItem],
    unmatched: &'a [DiscoveredItem],
}

#[derive(Serialize)]
struct ClassificationCounts {
    total: usize,
    matched: usize,
    unmatched: usize,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    success: bool,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

impl ReportFormatter for JsonFormatter {
    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let output = SummaryOutput {
            success: !summary.has_failures(),
            summary,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn format_classification(&self, result: &ClassificationResult) -> Result<String> {
        let output = ClassificationOutput {
            summary: ClassificationCounts {
                total: result.total(),
                matched: result.matched.len(),
                unmatched: result.unmatched.len(),
            },
            matched: &result.matched,
            unmatched: &result.unmatched,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
