use crate::cli::{ClassifyArgs, Cli};
use crate::config::{ConfigKey, ConfigStore};
use crate::error::Result;
use crate::output::print_batch_error;
use crate::router::DEFAULT_QUARANTINE_DIR;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{classify_input, load_allow_list, require_path, resolve_path};

#[must_use]
pub fn run_classify(args: &ClassifyArgs, cli: &Cli) -> i32 {
    match run_classify_impl(args, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            print_batch_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Classifies the input folder and renders the result. Nothing is dispatched
/// and nothing is copied.
///
/// # Errors
/// Returns an error if the input folder is unset or unreadable, or the
/// allow-list cannot be loaded.
pub(crate) fn run_classify_impl(args: &ClassifyArgs, cli: &Cli) -> Result<String> {
    let saved = ConfigStore::new(cli.config.clone()).load();
    let input = require_path(args.scan.input.as_deref(), &saved, ConfigKey::InputDir, "--input")?;
    let excluded = resolve_path(args.output.as_deref(), &saved, ConfigKey::OutputDir)
        .map(|output| [output.join(DEFAULT_QUARANTINE_DIR), output])
        .into_iter()
        .flatten();

    let allow_list = load_allow_list(&args.scan, &saved)?;
    let result = classify_input(&args.scan, &allow_list, &input, excluded)?;

    args.scan
        .format
        .formatter(cli.color.into(), cli.verbose)
        .format_classification(&result)
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
