//! Settings shared by the commands: command-line flags first, then `config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::allowlist::AllowList;
use crate::classifier::{ClassificationResult, Classifier};
use crate::cli::{OrientationArg, RunArgs, ScanArgs};
use crate::config::{AppConfig, ConfigKey};
use crate::error::{BatchError, Result};
use crate::router::{OrientationPolicy, RunConfig};

/// The flag's value, or the saved setting for `key`.
#[must_use]
pub fn resolve_path(flag: Option<&Path>, config: &AppConfig, key: ConfigKey) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| config.path(key))
}

/// Like [`resolve_path`], but the setting is mandatory.
///
/// # Errors
/// Returns `Config` naming both the flag and the config key when neither is set.
pub fn require_path(
    flag: Option<&Path>,
    config: &AppConfig,
    key: ConfigKey,
    flag_name: &str,
) -> Result<PathBuf> {
    resolve_path(flag, config, key).ok_or_else(|| {
        BatchError::Config(format!(
            "{flag_name} is required (or set it once with `ps-batch-runner config set {key} <path>`)"
        ))
    })
}

/// Loads the allow-list a scan should use.
///
/// Order: `--allow-list`, `--legacy-script`, `allowListPath` from config,
/// then the built-in list.
///
/// # Errors
/// Returns an error if the chosen source cannot be read or parsed.
pub fn load_allow_list(scan: &ScanArgs, config: &AppConfig) -> Result<AllowList> {
    if let Some(script) = &scan.legacy_script {
        let list = AllowList::import_script(script)?;
        tracing::info!(script = %script.display(), entries = list.len(), "allow-list imported from script");
        return Ok(checked(list));
    }
    resolve_allow_list(scan.allow_list.as_deref(), config).map(checked)
}

/// Loads the list file named by `flag` or `allowListPath`, else the built-in list.
///
/// # Errors
/// Returns an error if a named list file cannot be read or parsed.
pub fn resolve_allow_list(flag: Option<&Path>, config: &AppConfig) -> Result<AllowList> {
    match resolve_path(flag, config, ConfigKey::AllowListPath) {
        Some(path) => AllowList::load(&path),
        None => {
            tracing::debug!("using built-in allow-list");
            Ok(AllowList::builtin())
        }
    }
}

fn checked(list: AllowList) -> AllowList {
    if list.is_empty() {
        tracing::warn!("allow-list is empty; every item will be quarantined");
    }
    let irregular = list.irregular_entries();
    if !irregular.is_empty() {
        tracing::warn!(entries = ?irregular, "allow-list entries do not look like SKU codes");
    }
    list
}

/// Classifies `input` as the scan flags describe, never entering any of the
/// `excluded` folders.
///
/// # Errors
/// See [`Classifier::classify`].
pub fn classify_input(
    scan: &ScanArgs,
    allow_list: &AllowList,
    input: &Path,
    excluded: impl IntoIterator<Item = PathBuf>,
) -> Result<ClassificationResult> {
    Classifier::new(allow_list)
        .with_mode(scan.mode.into())
        .with_policy(scan.extraction_policy())
        .with_excluded(excluded)
        .classify(input)
}

/// Builds the dispatch settings for `run`.
///
/// # Errors
/// Returns `Config` when the executable, script, output folder, or (for the
/// probe policy) the probe script is given neither as a flag nor in config.
pub fn build_run_config(args: &RunArgs, config: &AppConfig) -> Result<RunConfig> {
    let executable = require_path(
        args.photoshop.as_deref(),
        config,
        ConfigKey::PhotoshopPath,
        "--photoshop",
    )?;
    let script = require_path(args.script.as_deref(), config, ConfigKey::JsxPath, "--script")?;
    let output_root = require_path(args.output.as_deref(), config, ConfigKey::OutputDir, "--output")?;

    let orientation = match args.orientation {
        OrientationArg::Delegate => OrientationPolicy::Delegate,
        OrientationArg::Probe => OrientationPolicy::Probe {
            script: require_path(
                args.probe_script.as_deref(),
                config,
                ConfigKey::ProbeJsxPath,
                "--probe-script",
            )?,
        },
    };

    Ok(RunConfig::new(executable, script, output_root)
        .with_rules_file(resolve_path(args.rules.as_deref(), config, ConfigKey::RulesJsonPath))
        .with_orientation(orientation)
        .with_granularity(args.granularity.into())
        .with_arg_style(args.arg_style())
        .with_timeout((args.timeout > 0).then(|| Duration::from_secs(args.timeout)))
        .with_max_retries(args.retries)
        .with_log_file(args.script_log.clone())
        .with_action_set(args.action_set.as_str())
        .with_quarantine_dir(args.quarantine_dir.as_str()))
}

/// Records the paths a run resolved so later runs can omit the flags.
pub fn remember_run(config: &mut AppConfig, input: &Path, run: &RunConfig, allow_list: Option<&Path>) {
    let mut remember = |key, path: &Path| config.set(key, Some(path.to_string_lossy().into_owned()));
    remember(ConfigKey::InputDir, input);
    remember(ConfigKey::OutputDir, &run.output_root);
    remember(ConfigKey::PhotoshopPath, &run.executable);
    remember(ConfigKey::JsxPath, &run.script);
    if let Some(rules) = &run.rules_file {
        remember(ConfigKey::RulesJsonPath, rules);
    }
    if let OrientationPolicy::Probe { script } = &run.orientation {
        remember(ConfigKey::ProbeJsxPath, script);
    }
    if let Some(list) = allow_list {
        remember(ConfigKey::AllowListPath, list);
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
