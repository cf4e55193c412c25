use std::fmt::Write;
use std::path::Path;

use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::config::{AppConfig, ConfigKey, ConfigStore, FileSystem};
use crate::error::Result;
use crate::output::{OutputFormat, print_batch_error};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    let store = ConfigStore::new(cli.config.clone());
    match run_config_impl(&args.action, &store) {
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

/// Performs a `config` action and returns what to print.
///
/// # Errors
/// Returns an error for an unknown key, or when the config location is
/// unknown or cannot be written.
pub(crate) fn run_config_impl<F: FileSystem>(
    action: &ConfigAction,
    store: &ConfigStore<F>,
) -> Result<String> {
    match action {
        ConfigAction::Show { format } => {
            let config = store.load();
            match format {
                OutputFormat::Text => Ok(format_config_text(&config, store.path().ok().as_deref())),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&config)? + "\n"),
            }
        }
        ConfigAction::Set { key, value } => {
            let key: ConfigKey = key.parse()?;
            let mut config = store.load();
            config.set(key, value.clone());
            let path = store.save(&config)?;
            Ok(match config.get(key) {
                Some(value) => format!("{key} = {value} ({})\n", path.display()),
                None => format!("{key} cleared ({})\n", path.display()),
            })
        }
        ConfigAction::Path => Ok(format!("{}\n", store.path()?.display())),
    }
}

/// Renders every known key, unset ones included.
#[must_use]
pub fn format_config_text(config: &AppConfig, path: Option<&Path>) -> String {
    let mut out = String::new();
    if let Some(path) = path {
        let _ = writeln!(out, "# {}", path.display());
    }
    for (key, value) in config.entries() {
        let _ = writeln!(
            out,
            "{:<14} {}",
            key.json_name(),
            value.unwrap_or("(unset)")
        );
    }
    if !config.extra.is_empty() {
        let _ = writeln!(out, "# {} other key(s) kept as-is", config.extra.len());
    }
    out
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
