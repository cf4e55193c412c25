use crate::cli::{Cli, RunArgs};
use crate::config::{ConfigKey, ConfigStore};
use crate::error::Result;
use crate::output::{DispatchProgress, print_batch_error};
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::router::Dispatcher;
use crate::{EXIT_CONFIG_ERROR, EXIT_JOB_FAILURES, EXIT_SUCCESS};

use super::context::{build_run_config, classify_input, load_allow_list, remember_run, require_path};

#[must_use]
pub fn run_run(args: &RunArgs, cli: &Cli) -> i32 {
    match run_run_impl(args, cli, SystemProcessRunner::new()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_batch_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Classifies, dispatches, and prints the run summary.
///
/// # Errors
/// Returns an error for anything that stops the run before dispatch starts:
/// unresolved settings, missing paths, an unreadable allow-list or input folder.
pub(crate) fn run_run_impl<R: ProcessRunner>(args: &RunArgs, cli: &Cli, runner: R) -> Result<i32> {
    let store = ConfigStore::new(cli.config.clone());
    let mut saved = store.load();

    let input = require_path(args.scan.input.as_deref(), &saved, ConfigKey::InputDir, "--input")?;
    let run_config = build_run_config(args, &saved)?;
    run_config.validate()?;

    if args.save {
        remember_run(&mut saved, &input, &run_config, args.scan.allow_list.as_deref());
        let path = store.save(&saved)?;
        tracing::info!(path = %path.display(), "settings saved");
    }

    let allow_list = load_allow_list(&args.scan, &saved)?;
    let result = classify_input(&args.scan, &allow_list, &input, run_config.scan_exclusions())?;

    let summary = Dispatcher::new(&run_config, runner)
        .with_progress(DispatchProgress::new(0, cli.quiet))
        .dispatch(&result, &input)?;

    let formatter = args.scan.format.formatter(cli.color.into(), cli.verbose);
    print!("{}", formatter.format_summary(&summary)?);

    if summary.has_failures() {
        Ok(EXIT_JOB_FAILURES)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
