//! Turning a classification into external invocations.
//!
//! Matched items become [`DispatchJob`]s that run one at a time through a
//! [`ProcessRunner`]; unmatched items are copied into the quarantine folder.
//! A failing job is recorded and the run moves on.

mod config;
mod job;
mod orientation;
mod quarantine;
mod summary;

pub use config::{
    DEFAULT_ACTION_SET, DEFAULT_QUARANTINE_DIR, DEFAULT_TIMEOUT, JobGranularity,
    OrientationPolicy, RunConfig, ScriptArgStyle,
};
pub use job::{
    DispatchJob, ENV_ACTION_NAME, ENV_ACTION_NAME_ALT, ENV_ACTION_SET, ENV_ALIAS_PREFIX,
    ENV_INPUT_DIR, ENV_LOG_FILE, ENV_OUTPUT_DIR, ENV_PROBE_TARGET, ENV_RULES_JSON_PATH,
    ENV_TARGET_PATH, ENV_TOTAL_IMAGES, JobEnvironment, plan_jobs,
};
pub use orientation::{
    Dimensions, Orientation, parse_dimensions, portrait_variant, probe, variant_for,
};
pub use quarantine::{QuarantineOutcome, quarantine_item};
pub use summary::{JobFailure, RunSummary};

use std::fs;
use std::path::{Path, PathBuf};

use crate::classifier::ClassificationResult;
use crate::error::{BatchError, Result};
use crate::output::DispatchProgress;
use crate::process::{ProcessOutput, ProcessRunner};

/// Runs dispatch jobs sequentially through a [`ProcessRunner`].
pub struct Dispatcher<'a, R: ProcessRunner> {
    config: &'a RunConfig,
    runner: R,
    progress: DispatchProgress,
}

impl<'a, R: ProcessRunner> Dispatcher<'a, R> {
    #[must_use]
    pub fn new(config: &'a RunConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            progress: DispatchProgress::hidden(),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: DispatchProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Dispatches every matched item and quarantines every unmatched one.
    ///
    /// `input_root` is the root `result` was classified from; quarantine copies
    /// keep their path relative to it.
    ///
    /// # Errors
    /// Fails before any job runs if the configuration does not validate or the
    /// output root cannot be created. Failures of individual jobs and copies are
    /// reported in the returned [`RunSummary`] instead.
    pub fn dispatch(&self, result: &ClassificationResult, input_root: &Path) -> Result<RunSummary> {
        self.config.validate()?;
        let output_root = &self.config.output_root;
        fs::create_dir_all(output_root).map_err(|e| BatchError::io(e, output_root, "create"))?;
        let input_root = dunce::canonicalize(input_root).unwrap_or_else(|_| input_root.to_path_buf());
        let rules_path = check_rules_file(self.config.rules_file.as_deref());

        let mut summary = RunSummary {
            matched_count: result.matched.len(),
            unmatched_count: result.unmatched.len(),
            ..RunSummary::default()
        };

        let jobs = self.plan(result, rules_path.as_deref(), &mut summary);
        self.run_jobs(jobs, &mut summary);
        self.quarantine(result, &input_root, &mut summary);

        tracing::info!(
            processed = summary.processed_count,
            errors = summary.error_count,
            skipped = summary.skipped_count,
            quarantined = summary.quarantined_files,
            "dispatch complete"
        );
        Ok(summary)
    }

    fn plan(
        &self,
        result: &ClassificationResult,
        rules_path: Option<&Path>,
        summary: &mut RunSummary,
    ) -> Vec<DispatchJob> {
        let mut jobs = Vec::new();
        for item in &result.matched {
            match plan_jobs(item, self.config, rules_path) {
                Ok(planned) if planned.is_empty() => {
                    tracing::warn!(path = %item.path.display(), "no image files, skipping");
                    summary.skipped_count += 1;
                }
                Ok(planned) => jobs.extend(planned),
                Err(e) => {
                    tracing::error!(path = %item.path.display(), error = %e, "cannot plan job");
                    summary.record_failure(JobFailure {
                        target: item.path.clone(),
                        identifier: item.id().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        jobs
    }

    fn run_jobs(&self, jobs: Vec<DispatchJob>, summary: &mut RunSummary) {
        self.progress.set_length(jobs.len() as u64);
        for (index, mut job) in jobs.into_iter().enumerate() {
            self.progress.start_job(&job.script_identifier);
            tracing::info!(
                job = index + 1,
                target = %job.target_path.display(),
                id = %job.script_identifier,
                files = job.files.len(),
                "dispatching"
            );
            match self.run_job(&mut job) {
                Ok(output) => {
                    tracing::info!(
                        id = job.resolved_identifier(),
                        elapsed_ms = output.duration.as_millis(),
                        "job finished"
                    );
                    summary.processed_count += 1;
                }
                Err(e) => {
                    log_job_error(&job, &e);
                    summary.record_failure(JobFailure {
                        target: job.target_path.clone(),
                        identifier: job.resolved_identifier().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
            self.progress.inc();
        }
        self.progress.finish();
    }

    fn quarantine(
        &self,
        result: &ClassificationResult,
        input_root: &Path,
        summary: &mut RunSummary,
    ) {
        let quarantine_root = self.config.quarantine_root();
        for item in &result.unmatched {
            let outcome = quarantine_item(item, input_root, &quarantine_root);
            summary.quarantined_files += outcome.copied;
            summary.quarantine_errors += outcome.errors.len();
        }
    }

    /// Resolves orientation, then invokes with retries.
    fn run_job(&self, job: &mut DispatchJob) -> Result<ProcessOutput> {
        self.resolve_orientation(job)?;

        let invocation = job.invocation(self.config);
        let program = invocation.program_name();
        let attempts = self.config.max_retries.saturating_add(1);
        let mut attempt = 1;
        loop {
            let result = self
                .runner
                .run(&invocation)
                .and_then(|output| output.into_result(&program));
            match result {
                Ok(output) => return Ok(output),
                Err(e) if attempt < attempts => {
                    tracing::warn!(attempt, error = %e, "job failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn resolve_orientation(&self, job: &mut DispatchJob) -> Result<()> {
        let id = job.script_identifier.as_str();
        if !self.config.is_orientation_sensitive(id) {
            return Ok(());
        }
        match &self.config.orientation {
            OrientationPolicy::Delegate => {
                job.alternate_identifier = Some(portrait_variant(id));
            }
            OrientationPolicy::Probe { script } => {
                let file = job.files.first().ok_or_else(|| {
                    BatchError::Probe(format!("no file to probe for {id}"))
                })?;
                let orientation = probe(&self.runner, self.config, script, file)?;
                let variant = variant_for(id, orientation);
                tracing::debug!(id, variant = %variant, "orientation resolved");
                job.orientation_variant = Some(variant);
            }
        }
        Ok(())
    }
}

/// Returns the rules path to export, warning about anything suspicious.
///
/// The file is passed through by path; a missing file is exported as empty.
fn check_rules_file(path: Option<&Path>) -> Option<PathBuf> {
    let path = path?;
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "rules file not readable, continuing without it");
            return None;
        }
    };
    if let Err(e) = serde_json::from_str::<serde_json::Value>(&content) {
        tracing::warn!(path = %path.display(), error = %e, "rules file is not valid JSON");
    }
    Some(path.to_path_buf())
}

fn log_job_error(job: &DispatchJob, err: &BatchError) {
    tracing::error!(
        target = %job.target_path.display(),
        id = job.resolved_identifier(),
        error = %err,
        "job failed"
    );
    if let BatchError::ProcessExit { stdout, stderr, .. } = err {
        if !stdout.trim().is_empty() {
            tracing::error!("stdout:\n{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            tracing::error!("stderr:\n{}", stderr.trim_end());
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
