use std::path::PathBuf;

use serde::Serialize;

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub matched_count: usize,
    pub unmatched_count: usize,
    pub processed_count: usize,
    pub error_count: usize,
    /// Matched items that held no image files.
    pub skipped_count: usize,
    pub quarantined_files: usize,
    pub quarantine_errors: usize,
    pub failures: Vec<JobFailure>,
}

/// A job that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub target: PathBuf,
    pub identifier: String,
    pub reason: String,
}

impl RunSummary {
    /// Number of jobs that reached the external application (or tried to).
    #[must_use]
    pub const fn job_count(&self) -> usize {
        self.processed_count + self.error_count
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.error_count > 0 || self.quarantine_errors > 0
    }

    pub(crate) fn record_failure(&mut self, failure: JobFailure) {
        self.error_count += 1;
        self.failures.push(failure);
    }
}
